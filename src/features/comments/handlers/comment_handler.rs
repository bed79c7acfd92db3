use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::Session;
use crate::features::comments::dtos::{
    CommentResponseDto, CreateCommentDto, ReportDetailResponseDto,
};
use crate::features::comments::services::CommentService;
use crate::features::comments::thread::Composer;
use crate::features::reports::ReportService;
use crate::shared::constants::COMMENT_ADDED_MESSAGE;
use crate::shared::types::{ApiResponse, Meta};

/// State for report detail and comment handlers
#[derive(Clone)]
pub struct CommentState {
    pub report_service: Arc<ReportService>,
    pub comment_service: Arc<CommentService>,
}

/// Get a report with its comments
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportDetailResponseDto>),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn get_report_detail(
    session: Session,
    State(state): State<CommentState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReportDetailResponseDto>>> {
    let report = state.report_service.get(id).await?;
    let comments = state.comment_service.list(id).await?;
    let dto = ReportDetailResponseDto::new(report, comments, Composer::for_session(&session));
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// List comments on a report, oldest first
#[utoipa::path(
    get,
    path = "/api/reports/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Comments on the report", body = ApiResponse<Vec<CommentResponseDto>>)
    ),
    tag = "comments"
)]
pub async fn list_comments(
    State(state): State<CommentState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<CommentResponseDto>>>> {
    let comments = state.comment_service.list(id).await?;
    let total = comments.len() as i64;
    let dtos: Vec<CommentResponseDto> = comments.into_iter().map(|c| c.into()).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, Some(Meta { total }))))
}

/// Add a comment; responds with the refetched thread when it could be loaded
#[utoipa::path(
    post,
    path = "/api/reports/{id}/comments",
    params(
        ("id" = Uuid, Path, description = "Report ID")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment added", body = ApiResponse<Vec<CommentResponseDto>>),
        (status = 400, description = "Empty comment"),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "Report not found"),
        (status = 502, description = "Insert failed")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn add_comment(
    session: Session,
    State(state): State<CommentState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<CommentResponseDto>>>)> {
    let outcome = state.comment_service.add(&session, id, &dto.content).await?;
    let dtos: Option<Vec<CommentResponseDto>> = outcome
        .comments
        .map(|comments| comments.into_iter().map(|c| c.into()).collect());
    let meta = dtos.as_ref().map(|d| Meta {
        total: d.len() as i64,
    });

    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(dtos, Some(COMMENT_ADDED_MESSAGE.to_string()), meta)
                .with_notices(outcome.notices),
        ),
    ))
}
