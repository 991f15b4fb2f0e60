use uuid::Uuid;

use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::Bookmark;

pub struct ListBookmarks<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> ListBookmarks<'a, R> {
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Vec<Bookmark>> {
        self.repo.list_for_user(user_id).await
    }
}
