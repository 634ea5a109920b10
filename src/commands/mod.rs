pub mod assign;
pub mod auth;
pub mod comment;
pub mod create;
pub mod delete;
pub mod home;
pub mod list;
pub mod lookup;
pub mod notifications;
pub mod profile;
pub mod session;
pub mod show;
pub mod status;
