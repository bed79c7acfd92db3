use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::features::auth::Session;
use crate::features::reports::dtos::{CreateReportForm, ListReportsQuery, ReportResponseDto};
use crate::features::reports::form::ReportForm;
use crate::features::reports::models::{CategoryFilter, ReportCategory};
use crate::features::reports::selection::{ImageSelection, SelectedFile};
use crate::features::reports::services::{ReportCreationService, ReportService};
use crate::shared::constants::{INVALID_COORDINATES_MESSAGE, REPORT_CREATED_MESSAGE};
use crate::shared::types::{ApiResponse, Meta};

/// State for report handlers
#[derive(Clone)]
pub struct ReportState {
    pub report_service: Arc<ReportService>,
    pub creation_service: Arc<ReportCreationService>,
}

/// List all reports, newest first, optionally filtered by category
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Reports matching the filter", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 400, description = "Unknown category")
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(state): State<ReportState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let filter = CategoryFilter::from_query(query.category.as_deref())?;
    let reports = state.report_service.list(filter).await?;
    let total = reports.len() as i64;
    let dtos: Vec<ReportResponseDto> = reports.into_iter().map(|r| r.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Create a report with up to 5 photos
///
/// Multipart fields: `title`, `description`, `category`, `latitude`, `longitude`
/// and any number of `images` parts.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body(content = CreateReportForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Missing fields or invalid values"),
        (status = 401, description = "Not signed in"),
        (status = 502, description = "Photo upload or insert failed")
    ),
    security(("bearer_auth" = [])),
    tag = "reports"
)]
pub async fn create_report(
    session: Session,
    State(state): State<ReportState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let mut form = ReportForm::default();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Falha ao ler o formulário: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "images" || name == "images[]" {
            let file_name = field.file_name().unwrap_or("imagem").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Falha ao ler a imagem: {}", e)))?;
            files.push(SelectedFile::new(file_name, content_type, data.to_vec()));
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Falha ao ler o campo {}: {}", name, e)))?;

        match name.as_str() {
            "title" => form.title = value,
            "description" => form.description = value,
            "category" if value.trim().is_empty() => form.category = None,
            "category" => form.category = Some(value.parse::<ReportCategory>()?),
            "latitude" => form.latitude = parse_coordinate(&value, form.latitude)?,
            "longitude" => form.longitude = parse_coordinate(&value, form.longitude)?,
            other => tracing::debug!("Ignoring unknown multipart field '{}'", other),
        }
    }

    let mut images = ImageSelection::new();
    let mut notices = images.add_files(files);

    // rejected files are reported whether or not the submission goes through
    let outcome = match state.creation_service.submit(&session, &form, &images).await {
        Ok(outcome) => outcome,
        Err(e) => return Ok(e.into_response_with_notices(notices)),
    };
    notices.extend(outcome.notices);

    let dto: ReportResponseDto = outcome.report.into();
    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(Some(dto), Some(REPORT_CREATED_MESSAGE.to_string()), None)
                .with_notices(notices),
        ),
    )
        .into_response())
}

/// Blank keeps `current` (the city center default)
fn parse_coordinate(value: &str, current: f64) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(current);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::Validation(INVALID_COORDINATES_MESSAGE.to_string()))
}
