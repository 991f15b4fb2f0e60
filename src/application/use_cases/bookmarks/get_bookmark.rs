use uuid::Uuid;

use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::Bookmark;

pub struct GetBookmark<'a, R: BookmarkRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BookmarkRepository + ?Sized> GetBookmark<'a, R> {
    // Unlike edit/delete, a foreign bookmark is reported as absent rather than forbidden
    pub async fn execute(&self, user_id: Uuid, bookmark_id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        self.repo.find_for_user(bookmark_id, user_id).await
    }
}
