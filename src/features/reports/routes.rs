use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{ReportCreationService, ReportService};

/// Create routes for the reports feature
///
/// Listing is public; creating needs a signed-in session, resolved by
/// `session_middleware` applied by the caller.
pub fn routes(
    report_service: Arc<ReportService>,
    creation_service: Arc<ReportCreationService>,
) -> Router {
    let state = ReportState {
        report_service,
        creation_service,
    };

    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::dtos::ReportResponseDto;
    use crate::shared::test_helpers::{
        authenticated_session, sample_report, with_session, FakeStorage,
        InMemoryProfileRepository, InMemoryReportRepository,
    };
    use crate::shared::types::{ApiResponse, NoticeLevel};
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;

    fn app(repository: Arc<InMemoryReportRepository>) -> Router {
        let report_service = Arc::new(ReportService::new(repository.clone()));
        let creation_service = Arc::new(ReportCreationService::new(
            Arc::new(FakeStorage::default()),
            repository,
            Arc::new(InMemoryProfileRepository::default()),
        ));
        routes(report_service, creation_service)
    }

    fn report_form() -> MultipartForm {
        MultipartForm::new()
            .add_text("title", "Bueiro entupido")
            .add_text("description", "Alaga quando chove")
            .add_text("category", "bueiro")
            .add_text("latitude", "-25.1")
            .add_text("longitude", "-50.2")
    }

    #[tokio::test]
    async fn test_list_reports_with_filter() {
        let repository = Arc::new(InMemoryReportRepository::with_reports(vec![
            sample_report("buraco"),
            sample_report("bueiro"),
        ]));
        let server = TestServer::new(app(repository)).unwrap();

        let body: ApiResponse<Vec<ReportResponseDto>> = server.get("/api/reports").await.json();
        assert_eq!(body.data.unwrap().len(), 2);

        let response = server
            .get("/api/reports")
            .add_query_param("category", "bueiro")
            .await;
        response.assert_status_ok();
        let body: ApiResponse<Vec<ReportResponseDto>> = response.json();
        let reports = body.data.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].category_label, "Bueiro");
        assert_eq!(body.meta.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_list_reports_unknown_category() {
        let server =
            TestServer::new(app(Arc::new(InMemoryReportRepository::default()))).unwrap();
        let response = server
            .get("/api/reports")
            .add_query_param("category", "lixo")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_report_requires_session() {
        let repository = Arc::new(InMemoryReportRepository::default());
        let server = TestServer::new(app(repository.clone())).unwrap();

        let response = server.post("/api/reports").multipart(report_form()).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(repository.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_report_with_image() {
        let repository = Arc::new(InMemoryReportRepository::default());
        let app = with_session(app(repository.clone()), authenticated_session());
        let server = TestServer::new(app).unwrap();

        let form = report_form()
            .add_part(
                "images",
                Part::bytes(vec![1u8, 2, 3])
                    .file_name("foto.jpg")
                    .mime_type("image/jpeg"),
            )
            .add_part(
                "images",
                Part::bytes(vec![1u8])
                    .file_name("nota.txt")
                    .mime_type("text/plain"),
            );

        let response = server.post("/api/reports").multipart(form).await;
        response.assert_status(StatusCode::CREATED);

        let body: ApiResponse<ReportResponseDto> = response.json();
        let report = body.data.unwrap();
        assert_eq!(report.category, "bueiro");
        assert_eq!(report.latitude, -25.1);
        assert_eq!(report.image_urls.len(), 1);
        assert_eq!(body.message.as_deref(), Some("Reporte criado com sucesso!"));

        let notices = body.notices.unwrap();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, "nota.txt não é uma imagem válida");
        assert_eq!(repository.insert_calls(), 1);
    }

    #[tokio::test]
    async fn test_create_report_missing_fields() {
        let app = with_session(
            app(Arc::new(InMemoryReportRepository::default())),
            authenticated_session(),
        );
        let server = TestServer::new(app).unwrap();

        let form = MultipartForm::new()
            .add_text("title", "Só título")
            .add_text("description", "   ");
        let response = server.post("/api/reports").multipart(form).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ApiResponse<()> = response.json();
        assert_eq!(
            body.message.as_deref(),
            Some("Por favor, preencha todos os campos obrigatórios")
        );
    }

    #[tokio::test]
    async fn test_failed_submission_still_reports_rejected_files() {
        let repository = Arc::new(InMemoryReportRepository::default());
        let server = TestServer::new(app(repository.clone())).unwrap();

        let form = report_form().add_part(
            "images",
            Part::bytes(vec![1u8])
                .file_name("nota.txt")
                .mime_type("text/plain"),
        );
        let response = server.post("/api/reports").multipart(form).await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: ApiResponse<()> = response.json();
        assert_eq!(
            body.message.as_deref(),
            Some("Você precisa estar logado para criar um reporte")
        );
        let notices = body.notices.unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "nota.txt não é uma imagem válida");
        assert_eq!(repository.insert_calls(), 0);
    }
}
