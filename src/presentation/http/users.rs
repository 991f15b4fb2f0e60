use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, patch},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::users::edit_user::EditUser;
use crate::application::use_cases::users::get_me::GetMe;
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::user::{User, UserChanges};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl EditUserRequest {
    fn into_changes(self) -> Result<UserChanges, ApiError> {
        let email = match self.email {
            Some(raw) => Some(auth::validate_email(Some(raw))?),
            None => None,
        };
        Ok(UserChanges {
            email,
            first_name: self.first_name,
            last_name: self.last_name,
        })
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/me", get(me))
        .route("/", patch(edit_user))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/users/me", tag = "Users", responses(
    (status = 200, body = UserResponse),
    (status = 401, body = ErrorBody)
))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = auth::authenticated_user(&ctx.cfg, bearer)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc.execute(user_id).await?.ok_or(ApiError::Unauthorized)?;
    Ok(Json(user.into()))
}

#[utoipa::path(patch, path = "/users", tag = "Users", request_body = EditUserRequest, responses(
    (status = 200, body = UserResponse),
    (status = 400, body = ErrorBody),
    (status = 401, body = ErrorBody),
    (status = 409, body = ErrorBody)
))]
pub async fn edit_user(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    payload: Result<Json<EditUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = auth::authenticated_user(&ctx.cfg, bearer)?;
    let Json(req) = payload?;
    let changes = req.into_changes()?;
    let repo = ctx.user_repo();
    let uc = EditUser {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(user_id, &changes)
        .await?
        .ok_or(ApiError::Unauthorized)?;
    Ok(Json(user.into()))
}
