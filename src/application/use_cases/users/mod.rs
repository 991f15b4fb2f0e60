pub mod edit_user;
pub mod get_me;
