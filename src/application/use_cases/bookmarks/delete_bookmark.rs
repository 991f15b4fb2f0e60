use uuid::Uuid;

use crate::application::access::{self, BookmarkAccessError};
use crate::application::ports::bookmark_repository::BookmarkRepository;

pub struct DeleteBookmark<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> DeleteBookmark<'a, R> {
    pub async fn execute(&self, user_id: Uuid, bookmark_id: Uuid) -> Result<(), BookmarkAccessError> {
        access::require_owner(self.repo, user_id, bookmark_id).await?;
        let deleted = self
            .repo
            .delete(bookmark_id)
            .await
            .map_err(BookmarkAccessError::Store)?;
        if !deleted {
            return Err(BookmarkAccessError::Gone);
        }
        tracing::debug!(user_id = %user_id, bookmark_id = %bookmark_id, "bookmark_deleted");
        Ok(())
    }
}
