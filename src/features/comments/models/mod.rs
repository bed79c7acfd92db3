mod comment;

pub use comment::{Comment, CommentRow, NewComment};
