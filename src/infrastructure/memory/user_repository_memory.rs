use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::user_repository::{UserRepository, UserRow, UserStoreError};
use crate::domain::users::user::{User, UserChanges};

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    rows: RwLock<Vec<UserRow>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, UserStoreError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.user.email == email) {
            return Err(UserStoreError::EmailTaken);
        }
        let now = chrono::Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        rows.push(UserRow {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.user.id == id).map(|r| r.user.clone()))
    }

    async fn update_user(
        &self,
        id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserStoreError> {
        let mut rows = self.rows.write().await;
        if let Some(email) = &changes.email {
            if rows.iter().any(|r| r.user.id != id && &r.user.email == email) {
                return Err(UserStoreError::EmailTaken);
            }
        }
        let Some(row) = rows.iter_mut().find(|r| r.user.id == id) else {
            return Ok(None);
        };
        changes.apply_to(&mut row.user);
        row.user.updated_at = chrono::Utc::now();
        Ok(Some(row.user.clone()))
    }
}
