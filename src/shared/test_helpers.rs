//! Fixtures and in-memory collaborators for unit and route tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{extract::Request, middleware::Next, Router};
use chrono::{Duration, Utc};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::{AuthenticatedUser, Session};
use crate::features::comments::models::{Comment, NewComment};
use crate::features::comments::{CommentRepository, CommentService};
use crate::features::reports::models::{resolve_author_name, NewReport, Report};
use crate::features::reports::ReportRepository;
use crate::features::users::ProfileRepository;
use crate::modules::storage::{ObjectStorage, StorageError};

pub fn sample_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user-3f9a".to_string(),
        email: Some("ana@example.com".to_string()),
        name: Some("Ana Souza".to_string()),
    }
}

pub fn authenticated_session() -> Session {
    Session::Authenticated(sample_user())
}

/// Layers `router` so every request carries `session`, standing in for `session_middleware`
pub fn with_session(router: Router, session: Session) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let session = session.clone();
            async move {
                request.extensions_mut().insert(session);
                next.run(request).await
            }
        },
    ))
}

pub fn sample_report(category: &str) -> Report {
    Report {
        id: Uuid::new_v4(),
        title: Sentence(2..5).fake(),
        description: Paragraph(1..3).fake(),
        category: category.to_string(),
        latitude: (-25.15..-25.03).fake(),
        longitude: (-50.22..-50.10).fake(),
        image_urls: vec![],
        created_at: Utc::now() - Duration::minutes((1..600).fake::<i64>()),
        user_id: format!("user-{}", (100..999).fake::<u32>()),
        user_name: Name().fake(),
    }
}

pub fn sample_comment(report_id: Uuid) -> Comment {
    Comment {
        id: Uuid::new_v4(),
        content: Sentence(3..8).fake(),
        created_at: Utc::now() - Duration::hours(1),
        report_id,
        user_id: format!("user-{}", (100..999).fake::<u32>()),
        user_name: Name().fake(),
    }
}

fn rejected(what: &str) -> AppError {
    AppError::Database(sqlx::Error::Protocol(format!("{} rejected", what)))
}

// =============================================================================
// REPORTS
// =============================================================================

#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: Mutex<Vec<Report>>,
    list_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    fail_list: AtomicBool,
    fail_insert: AtomicBool,
}

impl InMemoryReportRepository {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports: Mutex::new(reports),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn list(&self) -> Result<Vec<Report>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(rejected("list"));
        }
        let mut reports = self.reports.lock().unwrap().clone();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Report>> {
        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn insert(&self, report: &NewReport) -> Result<Report> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(rejected("insert"));
        }
        let stored = Report {
            id: Uuid::new_v4(),
            title: report.title.clone(),
            description: report.description.clone(),
            category: report.category.slug().to_string(),
            latitude: report.latitude,
            longitude: report.longitude,
            image_urls: report.image_urls.clone(),
            created_at: Utc::now(),
            user_id: report.user_id.clone(),
            user_name: resolve_author_name(None),
        };
        self.reports.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}

// =============================================================================
// COMMENTS
// =============================================================================

#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: Mutex<Vec<Comment>>,
    list_calls: AtomicUsize,
    insert_calls: AtomicUsize,
    fail_list: AtomicBool,
    fail_insert: AtomicBool,
}

impl InMemoryCommentRepository {
    pub fn with_comments(comments: Vec<Comment>) -> Self {
        Self {
            comments: Mutex::new(comments),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_for_report(&self, report_id: Uuid) -> Result<Vec<Comment>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(rejected("list"));
        }
        let mut comments: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.report_id == report_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }

    async fn insert(&self, comment: &NewComment) -> Result<()> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(rejected("insert"));
        }
        self.comments.lock().unwrap().push(Comment {
            id: Uuid::new_v4(),
            content: comment.content.clone(),
            created_at: Utc::now(),
            report_id: comment.report_id,
            user_id: comment.user_id.clone(),
            user_name: resolve_author_name(None),
        });
        Ok(())
    }
}

/// Comment service over `repository`, with one stored report per id in `report_ids`
pub fn comment_service(
    repository: Arc<InMemoryCommentRepository>,
    report_ids: &[Uuid],
) -> CommentService {
    let reports = report_ids
        .iter()
        .map(|id| Report {
            id: *id,
            ..sample_report("buraco")
        })
        .collect();
    CommentService::new(
        repository,
        Arc::new(InMemoryProfileRepository::default()),
        Arc::new(InMemoryReportRepository::with_reports(reports)),
    )
}

// =============================================================================
// PROFILES
// =============================================================================

#[derive(Default)]
pub struct InMemoryProfileRepository {
    upserted: Mutex<Vec<String>>,
}

impl InMemoryProfileRepository {
    pub fn upserted(&self) -> Vec<String> {
        self.upserted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert(&self, user: &AuthenticatedUser) -> Result<()> {
        self.upserted.lock().unwrap().push(user.sub.clone());
        Ok(())
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// Records uploads; fails the photos whose index is in `failing`
#[derive(Default)]
pub struct FakeStorage {
    uploaded: Mutex<Vec<String>>,
    failing: HashSet<usize>,
}

impl FakeStorage {
    pub fn failing_at(indices: &[usize]) -> Self {
        Self {
            failing: indices.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn uploaded_paths(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }
}

/// Photo index from a `{user}/{millis}-{index}.{ext}` key
fn index_of(path: &str) -> Option<usize> {
    path.rsplit_once('-')
        .and_then(|(_, rest)| rest.split('.').next())
        .and_then(|index| index.parse().ok())
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(
        &self,
        path: &str,
        _data: &[u8],
        _content_type: &str,
    ) -> std::result::Result<(), StorageError> {
        if index_of(path).is_some_and(|i| self.failing.contains(&i)) {
            return Err(StorageError::Upload {
                path: path.to_string(),
                message: "connection reset".to_string(),
            });
        }
        self.uploaded.lock().unwrap().push(path.to_string());
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("http://storage.test/report-images/{}", path)
    }
}
