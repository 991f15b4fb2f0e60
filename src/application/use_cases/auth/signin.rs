use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct Signin<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Signin<'a, R> {
    /// `None` for an unknown email and for a wrong password alike.
    pub async fn execute(&self, req: &SigninRequest) -> anyhow::Result<Option<User>> {
        let row = match self.repo.find_by_email(&req.email).await? {
            Some(r) => r,
            None => return Ok(None),
        };
        let parsed =
            PasswordHash::new(&row.password_hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(row.user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::auth::signup::{Signup, SignupRequest};
    use crate::infrastructure::memory::MemoryUserRepository;

    async fn registered() -> MemoryUserRepository {
        let repo = MemoryUserRepository::new();
        Signup { repo: &repo }
            .execute(&SignupRequest {
                email: "email@email.com".into(),
                password: "123".into(),
            })
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn correct_password_signs_in() {
        let repo = registered().await;
        let uc = Signin { repo: &repo };
        let user = uc
            .execute(&SigninRequest {
                email: "email@email.com".into(),
                password: "123".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.map(|u| u.email), Some("email@email.com".to_string()));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_both_yield_none() {
        let repo = registered().await;
        let uc = Signin { repo: &repo };
        let wrong = uc
            .execute(&SigninRequest {
                email: "email@email.com".into(),
                password: "nope".into(),
            })
            .await
            .unwrap();
        let unknown = uc
            .execute(&SigninRequest {
                email: "nobody@email.com".into(),
                password: "123".into(),
            })
            .await
            .unwrap();
        assert!(wrong.is_none());
        assert!(unknown.is_none());
    }
}
