pub mod auth;
pub mod debug;
pub mod extract;
pub mod health;
pub mod user;
