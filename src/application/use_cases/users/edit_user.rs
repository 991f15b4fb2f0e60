use uuid::Uuid;

use crate::application::ports::user_repository::{UserRepository, UserStoreError};
use crate::domain::users::user::{User, UserChanges};

pub struct EditUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> EditUser<'a, R> {
    // Ok(None) when the account behind the token is gone
    pub async fn execute(
        &self,
        user_id: Uuid,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserStoreError> {
        self.repo.update_user(user_id, changes).await
    }
}
