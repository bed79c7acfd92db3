use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::Session;
use crate::features::comments::models::{Comment, NewComment};
use crate::features::comments::repository::CommentRepository;
use crate::features::reports::ReportRepository;
use crate::features::users::ProfileRepository;
use crate::shared::constants::{
    COMMENT_ADDED_MESSAGE, COMMENT_FAILED_MESSAGE, EMPTY_COMMENT_MESSAGE, LOGIN_TO_COMMENT_MESSAGE,
    REPORT_NOT_FOUND_MESSAGE,
};
use crate::shared::types::Notice;
use crate::shared::validation::not_blank;

/// A comment was stored. `comments` is the refetched thread, or `None`
/// when the refetch failed after the insert went through.
#[derive(Debug, Clone)]
pub struct CommentOutcome {
    pub comments: Option<Vec<Comment>>,
    pub notices: Vec<Notice>,
}

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    profiles: Arc<dyn ProfileRepository>,
    reports: Arc<dyn ReportRepository>,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        profiles: Arc<dyn ProfileRepository>,
        reports: Arc<dyn ReportRepository>,
    ) -> Self {
        Self {
            comments,
            profiles,
            reports,
        }
    }

    /// Comments on `report_id`, oldest first
    pub async fn list(&self, report_id: Uuid) -> Result<Vec<Comment>> {
        let mut comments = self.comments.list_for_report(report_id).await?;
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    /// Adds a comment and returns the whole thread fetched again.
    ///
    /// Session and content are checked before any call goes out. Once the
    /// row is stored the call succeeds even if the refetch does not.
    pub async fn add(
        &self,
        session: &Session,
        report_id: Uuid,
        content: &str,
    ) -> Result<CommentOutcome> {
        let user = session.require_user(LOGIN_TO_COMMENT_MESSAGE)?;
        if not_blank(content).is_err() {
            return Err(AppError::Validation(EMPTY_COMMENT_MESSAGE.to_string()));
        }

        let new_comment = NewComment {
            report_id,
            user_id: user.sub.clone(),
            content: content.trim().to_string(),
        };

        if self.reports.find(report_id).await?.is_none() {
            return Err(AppError::NotFound(REPORT_NOT_FOUND_MESSAGE.to_string()));
        }

        let inserted = match self.profiles.upsert(user).await {
            Ok(()) => self.comments.insert(&new_comment).await,
            Err(e) => Err(e),
        };
        if let Err(e) = inserted {
            tracing::error!("Comment insert failed on report {}: {}", report_id, e);
            return Err(AppError::ExternalServiceError(
                COMMENT_FAILED_MESSAGE.to_string(),
            ));
        }

        let comments = match self.list(report_id).await {
            Ok(comments) => Some(comments),
            Err(e) => {
                tracing::error!(
                    "Comment stored on report {} but refetch failed: {}",
                    report_id,
                    e
                );
                None
            }
        };

        Ok(CommentOutcome {
            comments,
            notices: vec![Notice::success(COMMENT_ADDED_MESSAGE)],
        })
    }
}
