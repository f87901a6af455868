pub mod auth;
pub mod comments;
pub mod health;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod search;
pub mod users;
