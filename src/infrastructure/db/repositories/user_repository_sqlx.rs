use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{UserRepository, UserRow, UserStoreError};
use crate::domain::users::user::{User, UserChanges};
use crate::infrastructure::db::PgPool;

const UNIQUE_VIOLATION: &str = "23505";

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(r: &PgRow) -> User {
    User {
        id: r.get("id"),
        email: r.get("email"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

fn map_write_error(err: sqlx::Error) -> UserStoreError {
    let unique = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false);
    if unique {
        UserStoreError::EmailTaken
    } else {
        UserStoreError::Other(err.into())
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, UserStoreError> {
        let row = sqlx::query(
            r#"INSERT INTO users (email, password_hash) VALUES ($1, $2)
               RETURNING id, email, first_name, last_name, created_at, updated_at"#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(map_user(&row))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"SELECT id, email, first_name, last_name, created_at, updated_at, password_hash
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| UserRow {
            user: map_user(&r),
            password_hash: r.get("password_hash"),
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, email, first_name, last_name, created_at, updated_at
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn update_user(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(
            r#"UPDATE users SET
                   email = COALESCE($2, email),
                   first_name = COALESCE($3, first_name),
                   last_name = COALESCE($4, last_name),
                   updated_at = now()
               WHERE id = $1
               RETURNING id, email, first_name, last_name, created_at, updated_at"#,
        )
        .bind(id)
        .bind(changes.email.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;
        Ok(row.as_ref().map(map_user))
    }
}
