pub mod auth;
pub mod board;
pub mod categories;
pub mod comments;
pub mod geolocation;
pub mod map;
pub mod reports;
pub mod users;
