use uuid::Uuid;

use crate::application::ports::bookmark_repository::BookmarkRepository;
use crate::domain::bookmarks::bookmark::Bookmark;

// Missing and foreign-owned records produce the same `Forbidden`, so a
// non-owner learns nothing about which ids exist.

#[derive(thiserror::Error, Debug)]
pub enum BookmarkAccessError {
    #[error("access to resources denied")]
    Forbidden,
    /// Passed the gate but was removed before the mutation ran.
    #[error("bookmark no longer exists")]
    Gone,
    #[error("bookmark store failure")]
    Store(#[source] anyhow::Error),
}

pub async fn require_owner<R>(
    repo: &R,
    user_id: Uuid,
    bookmark_id: Uuid,
) -> Result<Bookmark, BookmarkAccessError>
where
    R: BookmarkRepository + ?Sized,
{
    let found = repo
        .find_by_id(bookmark_id)
        .await
        .map_err(BookmarkAccessError::Store)?;
    match found {
        Some(bookmark) if bookmark.is_owned_by(user_id) => Ok(bookmark),
        _ => {
            tracing::debug!(user_id = %user_id, bookmark_id = %bookmark_id, "bookmark_ownership_denied");
            Err(BookmarkAccessError::Forbidden)
        }
    }
}
