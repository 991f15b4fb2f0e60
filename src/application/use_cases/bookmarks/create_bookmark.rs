use uuid::Uuid;

use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::{Bookmark, NewBookmark};

pub struct CreateBookmark<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> CreateBookmark<'a, R> {
    pub async fn execute(&self, user_id: Uuid, bookmark: &NewBookmark) -> anyhow::Result<Bookmark> {
        let created = self.repo.create_for_user(user_id, bookmark).await?;
        tracing::debug!(user_id = %user_id, bookmark_id = %created.id, "bookmark_created");
        Ok(created)
    }
}
