mod comment_service;

pub use comment_service::{CommentOutcome, CommentService};
