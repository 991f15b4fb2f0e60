use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use crate::infrastructure::db::PgPool;

pub struct SqlxBookmarkRepository {
    pub pool: PgPool,
}

impl SqlxBookmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(r: PgRow) -> Bookmark {
    Bookmark {
        id: r.get("id"),
        user_id: r.get("user_id"),
        title: r.get("title"),
        link: r.get("link"),
        description: r.get("description"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl BookmarkRepository for SqlxBookmarkRepository {
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Bookmark>> {
        let rows = sqlx::query(
            r#"SELECT id, user_id, title, link, description, created_at, updated_at
               FROM bookmarks
               WHERE user_id = $1
               ORDER BY created_at ASC, id ASC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(map_row).collect())
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        let row = sqlx::query(
            r#"SELECT id, user_id, title, link, description, created_at, updated_at
               FROM bookmarks WHERE id = $1 AND user_id = $2"#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_row))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Bookmark>> {
        let row = sqlx::query(
            r#"SELECT id, user_id, title, link, description, created_at, updated_at
               FROM bookmarks WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_row))
    }

    async fn create_for_user(
        &self,
        user_id: Uuid,
        bookmark: &NewBookmark,
    ) -> anyhow::Result<Bookmark> {
        let row = sqlx::query(
            r#"INSERT INTO bookmarks (user_id, title, link, description)
               VALUES ($1, $2, $3, $4)
               RETURNING id, user_id, title, link, description, created_at, updated_at"#,
        )
        .bind(user_id)
        .bind(&bookmark.title)
        .bind(&bookmark.link)
        .bind(&bookmark.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_row(row))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &BookmarkChanges,
    ) -> anyhow::Result<Option<Bookmark>> {
        // $4 says whether description was supplied at all, $5 is its new value (may be NULL)
        let row = sqlx::query(
            r#"UPDATE bookmarks SET
                   title = COALESCE($2, title),
                   link = COALESCE($3, link),
                   description = CASE WHEN $4 THEN $5 ELSE description END,
                   updated_at = now()
               WHERE id = $1
               RETURNING id, user_id, title, link, description, created_at, updated_at"#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.link.as_deref())
        .bind(changes.description.is_some())
        .bind(changes.description.clone().flatten())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(map_row))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
