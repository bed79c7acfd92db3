use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::comments::handlers::{self, CommentState};
use crate::features::comments::services::CommentService;
use crate::features::reports::ReportService;

/// Report detail and comment routes
///
/// Reading is public; posting needs a signed-in session.
pub fn routes(report_service: Arc<ReportService>, comment_service: Arc<CommentService>) -> Router {
    let state = CommentState {
        report_service,
        comment_service,
    };

    Router::new()
        .route("/api/reports/{id}", get(handlers::get_report_detail))
        .route(
            "/api/reports/{id}/comments",
            get(handlers::list_comments).post(handlers::add_comment),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::comments::dtos::{CommentResponseDto, ReportDetailResponseDto};
    use crate::features::comments::thread::Composer;
    use crate::shared::test_helpers::{
        authenticated_session, sample_comment, sample_report, with_session,
        InMemoryCommentRepository, InMemoryProfileRepository, InMemoryReportRepository,
    };
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use uuid::Uuid;

    struct Fixture {
        report_id: Uuid,
        comments: Arc<InMemoryCommentRepository>,
        router: Router,
    }

    fn fixture() -> Fixture {
        let report = sample_report("iluminacao");
        let report_id = report.id;
        let reports = Arc::new(InMemoryReportRepository::with_reports(vec![report]));
        let comments = Arc::new(InMemoryCommentRepository::with_comments(vec![
            sample_comment(report_id),
        ]));
        let router = routes(
            Arc::new(ReportService::new(reports.clone())),
            Arc::new(CommentService::new(
                comments.clone(),
                Arc::new(InMemoryProfileRepository::default()),
                reports,
            )),
        );
        Fixture {
            report_id,
            comments,
            router,
        }
    }

    #[tokio::test]
    async fn test_detail_for_anonymous_is_read_only() {
        let f = fixture();
        let server = TestServer::new(f.router).unwrap();

        let response = server.get(&format!("/api/reports/{}", f.report_id)).await;
        response.assert_status_ok();
        let body: ApiResponse<ReportDetailResponseDto> = response.json();
        let detail = body.data.unwrap();
        assert_eq!(detail.report.category_label, "Iluminação");
        assert_eq!(detail.comments.len(), 1);
        assert!(matches!(detail.composer, Composer::ReadOnly { .. }));
        assert_eq!(detail.coordinates_display.matches('.').count(), 2);
    }

    #[tokio::test]
    async fn test_detail_missing_report() {
        let f = fixture();
        let server = TestServer::new(f.router).unwrap();
        let response = server.get(&format!("/api/reports/{}", Uuid::new_v4())).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_comment_anonymous_rejected() {
        let f = fixture();
        let server = TestServer::new(f.router).unwrap();

        let response = server
            .post(&format!("/api/reports/{}/comments", f.report_id))
            .json(&json!({ "content": "Oi" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(f.comments.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_add_comment_returns_refetched_thread() {
        let f = fixture();
        let server = TestServer::new(with_session(f.router, authenticated_session())).unwrap();

        let response = server
            .post(&format!("/api/reports/{}/comments", f.report_id))
            .json(&json!({ "content": "Ainda está quebrado" }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: ApiResponse<Vec<CommentResponseDto>> = response.json();
        let comments = body.data.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].content, "Ainda está quebrado");
        assert_eq!(body.message.as_deref(), Some("Comentário adicionado!"));
    }

    #[tokio::test]
    async fn test_add_blank_comment() {
        let f = fixture();
        let server = TestServer::new(with_session(f.router, authenticated_session())).unwrap();

        let response = server
            .post(&format!("/api/reports/{}/comments", f.report_id))
            .json(&json!({ "content": "   " }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ApiResponse<()> = response.json();
        assert_eq!(body.message.as_deref(), Some("Digite um comentário"));
    }

    #[tokio::test]
    async fn test_add_comment_to_unknown_report() {
        let f = fixture();
        let server = TestServer::new(with_session(f.router, authenticated_session())).unwrap();

        let response = server
            .post(&format!("/api/reports/{}/comments", Uuid::new_v4()))
            .json(&json!({ "content": "Oi" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: ApiResponse<()> = response.json();
        assert_eq!(body.message.as_deref(), Some("Reporte não encontrado"));
        assert_eq!(f.comments.insert_calls(), 0);
    }
}
