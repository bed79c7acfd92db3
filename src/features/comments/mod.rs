//! Report detail view and its comment thread.

pub mod detail;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod thread;

pub use repository::{CommentRepository, PgCommentRepository};
pub use services::CommentService;
