use axum::{
    Json, Router,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{StatusCode, request::Parts},
    routing::post,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::auth::signin::{Signin, SigninRequest};
use crate::application::use_cases::auth::signup::{Signup, SignupRequest};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::presentation::http::error::{ApiError, ErrorBody};
use crate::presentation::http::users::UserResponse;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthRequest {
    #[schema(value_type = String)]
    pub email: Option<String>,
    #[schema(value_type = String)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .with_state(ctx)
}

pub(crate) fn validate_email(raw: Option<String>) -> Result<String, ApiError> {
    let email = raw
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::BadRequest("email should not be empty".into()))?;
    if !EMAIL_RE.is_match(&email) {
        return Err(ApiError::BadRequest("email must be an email".into()));
    }
    Ok(email)
}

impl AuthRequest {
    fn into_credentials(self) -> Result<(String, String), ApiError> {
        let email = validate_email(self.email)?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::BadRequest("password should not be empty".into()))?;
        Ok((email, password))
    }
}

#[utoipa::path(post, path = "/auth/signup", tag = "Auth", request_body = AuthRequest, security(()), responses(
    (status = 201, body = AuthResponse),
    (status = 400, body = ErrorBody),
    (status = 409, body = ErrorBody)
))]
pub async fn signup(
    State(ctx): State<AppContext>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(req) = payload?;
    let (email, password) = req.into_credentials()?;
    let repo = ctx.user_repo();
    let uc = Signup {
        repo: repo.as_ref(),
    };
    let user = uc.execute(&SignupRequest { email, password }).await?;
    let access_token = issue_token(&ctx.cfg, user.id, &user.email)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(post, path = "/auth/signin", tag = "Auth", request_body = AuthRequest, security(()), responses(
    (status = 200, body = AuthResponse),
    (status = 400, body = ErrorBody),
    (status = 401, body = ErrorBody)
))]
pub async fn signin(
    State(ctx): State<AppContext>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(req) = payload?;
    let (email, password) = req.into_credentials()?;
    let repo = ctx.user_repo();
    let uc = Signin {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&SigninRequest { email, password })
        .await?
        .ok_or(ApiError::Unauthorized)?;
    let access_token = issue_token(&ctx.cfg, user.id, &user.email)?;
    Ok(Json(AuthResponse {
        access_token,
        user: user.into(),
    }))
}

pub fn issue_token(cfg: &Config, user_id: Uuid, email: &str) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: now + (cfg.jwt_expires_secs.max(0) as usize),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
    )?;
    Ok(token)
}

// --- Bearer extractor & JWT utils ---

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
            .map(|t| Bearer(t.trim().to_string()))
            .filter(|b| !b.0.is_empty())
            .ok_or(ApiError::Unauthorized)
    }
}

pub(crate) fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<Claims, ApiError> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret_pem.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "bearer_rejected");
        ApiError::Unauthorized
    })?;
    Ok(data.claims)
}

/// Resolves the bearer token into the caller's user id.
pub fn authenticated_user(cfg: &Config, bearer: Bearer) -> Result<Uuid, ApiError> {
    let claims = validate_bearer(cfg, bearer)?;
    Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthorized)
}
