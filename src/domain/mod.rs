pub mod bookmarks;
pub mod users;
