pub mod create_bookmark;
pub mod delete_bookmark;
pub mod edit_bookmark;
pub mod get_bookmark;
pub mod list_bookmarks;
