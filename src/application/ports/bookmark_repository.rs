use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::bookmarks::bookmark::{Bookmark, BookmarkChanges, NewBookmark};

#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Oldest first.
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Bookmark>>;

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<Option<Bookmark>>;

    // No owner filter; callers gate on `Bookmark::user_id` themselves
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Bookmark>>;

    async fn create_for_user(
        &self,
        user_id: Uuid,
        bookmark: &NewBookmark,
    ) -> anyhow::Result<Bookmark>;

    // Returns None if the row no longer exists
    async fn update(&self, id: Uuid, changes: &BookmarkChanges)
    -> anyhow::Result<Option<Bookmark>>;

    // Returns false if the row no longer exists
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}
