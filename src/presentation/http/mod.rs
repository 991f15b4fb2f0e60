pub mod auth;
pub mod bookmarks;
pub mod error;
pub mod health;
pub mod users;
