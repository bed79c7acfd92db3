use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::comments::models::{Comment, CommentRow, NewComment};

/// Relational store of comments
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments on a report, oldest first
    async fn list_for_report(&self, report_id: Uuid) -> Result<Vec<Comment>>;

    async fn insert(&self, comment: &NewComment) -> Result<()>;
}

pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn list_for_report(&self, report_id: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.content, c.created_at, c.report_id, c.user_id,
                   p.full_name AS author_name
            FROM comments c
            LEFT JOIN profiles p ON p.id = c.user_id
            WHERE c.report_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(report_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list comments for report {}: {:?}", report_id, e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn insert(&self, comment: &NewComment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (report_id, user_id, content)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(comment.report_id)
        .bind(&comment.user_id)
        .bind(&comment.content)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to insert comment on report {}: {:?}",
                comment.report_id,
                e
            );
            AppError::Database(e)
        })?;

        tracing::info!(
            "User {} commented on report {}",
            comment.user_id,
            comment.report_id
        );
        Ok(())
    }
}
