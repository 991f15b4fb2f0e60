use uuid::Uuid;

use crate::application::access::{self, BookmarkAccessError};
use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::{Bookmark, BookmarkChanges};

pub struct EditBookmark<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> EditBookmark<'a, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        bookmark_id: Uuid,
        changes: &BookmarkChanges,
    ) -> Result<Bookmark, BookmarkAccessError> {
        let current = access::require_owner(self.repo, user_id, bookmark_id).await?;
        if changes.is_empty() {
            return Ok(current);
        }
        self.repo
            .update(bookmark_id, changes)
            .await
            .map_err(BookmarkAccessError::Store)?
            .ok_or(BookmarkAccessError::Gone)
    }
}
