use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::{Bookmark, BookmarkChanges, NewBookmark};

/// Rows kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryBookmarkRepository {
    rows: RwLock<Vec<Bookmark>>,
}

impl MemoryBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookmarkRepository for MemoryBookmarkRepository {
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Bookmark>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|b| b.id == id && b.user_id == user_id)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|b| b.id == id).cloned())
    }

    async fn create_for_user(
        &self,
        user_id: Uuid,
        bookmark: &NewBookmark,
    ) -> anyhow::Result<Bookmark> {
        let now = chrono::Utc::now();
        let row = Bookmark {
            id: Uuid::new_v4(),
            user_id,
            title: bookmark.title.clone(),
            link: bookmark.link.clone(),
            description: bookmark.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &BookmarkChanges,
    ) -> anyhow::Result<Option<Bookmark>> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        changes.apply_to(row);
        row.updated_at = chrono::Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|b| b.id != id);
        Ok(rows.len() != before)
    }
}
