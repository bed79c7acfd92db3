use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::Session;
use crate::features::comments::models::Comment;
use crate::features::comments::services::CommentService;
use crate::shared::constants::COMMENTS_READ_ONLY_MESSAGE;
use crate::shared::types::Notice;

/// Whether the viewer may write a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Composer {
    Editable,
    ReadOnly { message: String },
}

impl Composer {
    pub fn for_session(session: &Session) -> Self {
        if session.is_authenticated() {
            Composer::Editable
        } else {
            Composer::ReadOnly {
                message: COMMENTS_READ_ONLY_MESSAGE.to_string(),
            }
        }
    }
}

/// Comment list of one open report plus the text being composed
#[derive(Debug, Clone)]
pub struct CommentThread {
    report_id: Uuid,
    comments: Vec<Comment>,
    draft: String,
    loading: bool,
}

impl CommentThread {
    pub fn new(report_id: Uuid) -> Self {
        Self {
            report_id,
            comments: Vec::new(),
            draft: String::new(),
            loading: false,
        }
    }

    pub fn report_id(&self) -> Uuid {
        self.report_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn composer(&self, session: &Session) -> Composer {
        Composer::for_session(session)
    }

    /// Replaces the list, keeping it ordered oldest first
    pub fn replace(&mut self, mut comments: Vec<Comment>) {
        comments.sort_by_key(|c| c.created_at);
        self.comments = comments;
    }

    /// Loads the comments of the report being opened
    pub async fn open(&mut self, service: &CommentService) -> Result<()> {
        self.loading = true;
        let result = service.list(self.report_id).await;
        self.loading = false;
        self.replace(result?);
        Ok(())
    }

    /// Sends the draft. Once the comment is stored the draft is cleared and,
    /// if the refetch came back, the list replaced. On failure both stay as
    /// they were.
    pub async fn submit(&mut self, service: &CommentService, session: &Session) -> Result<Vec<Notice>> {
        self.loading = true;
        let result = service.add(session, self.report_id, &self.draft).await;
        self.loading = false;

        let outcome = result?;
        self.draft.clear();
        if let Some(comments) = outcome.comments {
            self.replace(comments);
        }
        Ok(outcome.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::{
        authenticated_session, comment_service, sample_comment, InMemoryCommentRepository,
    };
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    #[test]
    fn test_composer_read_only_for_anonymous() {
        let thread = CommentThread::new(Uuid::new_v4());
        assert_eq!(
            thread.composer(&Session::Anonymous),
            Composer::ReadOnly {
                message: "Faça login para adicionar comentários".to_string()
            }
        );
        assert_eq!(thread.composer(&authenticated_session()), Composer::Editable);
    }

    #[test]
    fn test_replace_sorts_stably() {
        let report_id = Uuid::new_v4();
        let t = Utc::now();
        let mut a = sample_comment(report_id);
        a.created_at = t;
        let mut b = sample_comment(report_id);
        b.created_at = t;
        let mut c = sample_comment(report_id);
        c.created_at = t - Duration::seconds(30);

        let mut thread = CommentThread::new(report_id);
        thread.replace(vec![a.clone(), b.clone(), c.clone()]);
        let ids: Vec<_> = thread.comments().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![c.id, a.id, b.id]);
    }

    #[tokio::test]
    async fn test_submit_clears_draft_and_refetches() {
        let report_id = Uuid::new_v4();
        let repository = Arc::new(InMemoryCommentRepository::with_comments(vec![
            sample_comment(report_id),
        ]));
        let service = comment_service(repository.clone(), &[report_id]);
        let mut thread = CommentThread::new(report_id);
        thread.open(&service).await.unwrap();
        assert_eq!(thread.comments().len(), 1);

        thread.set_draft("Mais um");
        let notices = thread
            .submit(&service, &authenticated_session())
            .await
            .unwrap();

        assert_eq!(notices.len(), 1);
        assert!(thread.draft().is_empty());
        assert_eq!(thread.comments().len(), 2);
        assert!(!thread.is_loading());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_draft() {
        let repository = Arc::new(InMemoryCommentRepository::default());
        repository.fail_insert(true);
        let report_id = Uuid::new_v4();
        let service = comment_service(repository, &[report_id]);
        let mut thread = CommentThread::new(report_id);

        thread.set_draft("Não vai");
        let err = thread
            .submit(&service, &authenticated_session())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ExternalServiceError(_)));
        assert_eq!(thread.draft(), "Não vai");
        assert!(thread.comments().is_empty());
    }

    #[tokio::test]
    async fn test_stored_comment_clears_draft_even_if_refetch_fails() {
        let report_id = Uuid::new_v4();
        let repository = Arc::new(InMemoryCommentRepository::with_comments(vec![
            sample_comment(report_id),
        ]));
        let service = comment_service(repository.clone(), &[report_id]);
        let mut thread = CommentThread::new(report_id);
        thread.open(&service).await.unwrap();

        repository.fail_list(true);
        thread.set_draft("oi");
        let notices = thread
            .submit(&service, &authenticated_session())
            .await
            .unwrap();

        assert_eq!(notices[0].message, "Comentário adicionado!");
        assert!(thread.draft().is_empty());
        assert_eq!(thread.comments().len(), 1);

        // nothing left to send twice
        let err = thread
            .submit(&service, &authenticated_session())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(repository.insert_calls(), 1);
    }
}
