use crate::features::auth::dto::SessionHeaderDto;
use crate::features::auth::model::Session;
use crate::features::auth::service::SessionService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Current session as shown in the page header
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Header view of the current session", body = ApiResponse<SessionHeaderDto>),
        (status = 401, description = "Invalid bearer token")
    ),
    tag = "auth",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_session(
    session: Session,
    State(service): State<Arc<SessionService>>,
) -> Json<ApiResponse<SessionHeaderDto>> {
    Json(ApiResponse::success(Some(service.header(&session)), None, None))
}
