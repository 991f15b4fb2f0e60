use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::use_cases::bookmarks::create_bookmark::CreateBookmark;
use crate::application::use_cases::bookmarks::delete_bookmark::DeleteBookmark;
use crate::application::use_cases::bookmarks::edit_bookmark::EditBookmark;
use crate::application::use_cases::bookmarks::get_bookmark::GetBookmark;
use crate::application::use_cases::bookmarks::list_bookmarks::ListBookmarks;
use crate::bootstrap::app_context::AppContext;
use crate::domain::bookmarks::bookmark::{self as domain, BookmarkChanges, NewBookmark};
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::error::{ApiError, ErrorBody};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub link: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Bookmark> for Bookmark {
    fn from(b: domain::Bookmark) -> Self {
        Bookmark {
            id: b.id,
            user_id: b.user_id,
            title: b.title,
            link: b.link,
            description: b.description,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

// Unknown keys (including any `userId`) are ignored; the owner always comes from the token.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookmarkRequest {
    #[schema(value_type = String)]
    pub title: Option<String>,
    #[schema(value_type = String)]
    pub link: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EditBookmarkRequest {
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub title: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub link: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub description: DoubleOption<String>,
}

/// Distinguishes an absent key from an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DoubleOption<T> {
    #[default]
    NotProvided,
    Null,
    Some(T),
}

fn deserialize_double_option<'de, D, T>(deserializer: D) -> Result<DoubleOption<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(|opt| match opt {
        None => DoubleOption::Null,
        Some(value) => DoubleOption::Some(value),
    })
}

fn required_text(field: &str, value: Option<String>) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{field} should not be empty")))
}

fn optional_required_text(
    field: &str,
    value: DoubleOption<String>,
) -> Result<Option<String>, ApiError> {
    match value {
        DoubleOption::NotProvided => Ok(None),
        DoubleOption::Null => Err(ApiError::BadRequest(format!("{field} cannot be null"))),
        DoubleOption::Some(v) => required_text(field, Some(v)).map(Some),
    }
}

impl CreateBookmarkRequest {
    pub fn into_new_bookmark(self) -> Result<NewBookmark, ApiError> {
        Ok(NewBookmark {
            title: required_text("title", self.title)?,
            link: required_text("link", self.link)?,
            description: self.description,
        })
    }
}

impl EditBookmarkRequest {
    pub fn into_changes(self) -> Result<BookmarkChanges, ApiError> {
        let description = match self.description {
            DoubleOption::NotProvided => None,
            DoubleOption::Null => Some(None),
            DoubleOption::Some(v) => Some(Some(v)),
        };
        Ok(BookmarkChanges {
            title: optional_required_text("title", self.title)?,
            link: optional_required_text("link", self.link)?,
            description,
        })
    }
}

#[utoipa::path(get, path = "/bookmarks", tag = "Bookmarks", responses(
    (status = 200, body = [Bookmark]),
    (status = 401, body = ErrorBody)
))]
pub async fn list_bookmarks(
    State(ctx): State<AppContext>,
    bearer: Bearer,
) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let user_id = auth::authenticated_user(&ctx.cfg, bearer)?;
    let repo = ctx.bookmark_repo();
    let uc = ListBookmarks {
        repo: repo.as_ref(),
    };
    let items = uc.execute(user_id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(get, path = "/bookmarks/{id}", tag = "Bookmarks",
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    responses(
        (status = 200, description = "The bookmark, or null when it is missing or not yours", body = Bookmark),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody)
    ))]
pub async fn get_bookmark(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Option<Bookmark>>, ApiError> {
    let user_id = auth::authenticated_user(&ctx.cfg, bearer)?;
    let Path(id) = path?;
    let repo = ctx.bookmark_repo();
    let uc = GetBookmark {
        repo: repo.as_ref(),
    };
    let found = uc.execute(user_id, id).await?;
    Ok(Json(found.map(Into::into)))
}

#[utoipa::path(post, path = "/bookmarks", tag = "Bookmarks", request_body = CreateBookmarkRequest, responses(
    (status = 201, body = Bookmark),
    (status = 400, body = ErrorBody),
    (status = 401, body = ErrorBody)
))]
pub async fn create_bookmark(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    payload: Result<Json<CreateBookmarkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Bookmark>), ApiError> {
    let user_id = auth::authenticated_user(&ctx.cfg, bearer)?;
    let Json(req) = payload?;
    let new_bookmark = req.into_new_bookmark()?;
    let repo = ctx.bookmark_repo();
    let uc = CreateBookmark {
        repo: repo.as_ref(),
    };
    let created = uc.execute(user_id, &new_bookmark).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(patch, path = "/bookmarks/{id}", tag = "Bookmarks", request_body = EditBookmarkRequest,
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    responses(
        (status = 200, body = Bookmark),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ))]
pub async fn edit_bookmark(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<EditBookmarkRequest>, JsonRejection>,
) -> Result<Json<Bookmark>, ApiError> {
    let user_id = auth::authenticated_user(&ctx.cfg, bearer)?;
    let Path(id) = path?;
    let Json(req) = payload?;
    let changes = req.into_changes()?;
    let repo = ctx.bookmark_repo();
    let uc = EditBookmark {
        repo: repo.as_ref(),
    };
    let updated = uc.execute(user_id, id, &changes).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/bookmarks/{id}", tag = "Bookmarks",
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    responses(
        (status = 204),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody),
        (status = 403, body = ErrorBody)
    ))]
pub async fn delete_bookmark(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let user_id = auth::authenticated_user(&ctx.cfg, bearer)?;
    let Path(id) = path?;
    let repo = ctx.bookmark_repo();
    let uc = DeleteBookmark {
        repo: repo.as_ref(),
    };
    uc.execute(user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/:id",
            get(get_bookmark)
                .patch(edit_bookmark)
                .delete(delete_bookmark),
        )
        .with_state(ctx)
}
