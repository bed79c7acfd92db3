use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::reports::models::resolve_author_name;

/// Row shape of `comments LEFT JOIN profiles`
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub report_id: Uuid,
    pub user_id: String,
    pub author_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub report_id: Uuid,
    pub user_id: String,
    pub user_name: String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            report_id: row.report_id,
            user_id: row.user_id,
            user_name: resolve_author_name(row.author_name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub report_id: Uuid,
    pub user_id: String,
    pub content: String,
}
