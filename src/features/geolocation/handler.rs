use std::sync::Arc;

use axum::Json;

use crate::core::extractor::AppJson;
use crate::features::geolocation::dto::{DeviceFixDto, LocateResponseDto};
use crate::features::geolocation::helper::GeolocationHelper;
use crate::features::geolocation::source::ReportedPosition;
use crate::features::reports::form::ReportForm;
use crate::shared::types::ApiResponse;

/// Resolve the position for a new report draft
///
/// Falls back to the Ponta Grossa city center when the device has no fix.
#[utoipa::path(
    post,
    path = "/api/geolocation/locate",
    request_body = DeviceFixDto,
    responses(
        (status = 200, description = "Position for the draft", body = ApiResponse<LocateResponseDto>),
        (status = 400, description = "Malformed body")
    ),
    tag = "geolocation"
)]
pub async fn locate(AppJson(fix): AppJson<DeviceFixDto>) -> Json<ApiResponse<LocateResponseDto>> {
    let helper = GeolocationHelper::new(Arc::new(ReportedPosition::new(fix)));
    let mut form = ReportForm::default();
    let outcome = helper.locate(&mut form).await;

    let dto = LocateResponseDto {
        latitude: form.latitude,
        longitude: form.longitude,
        located: outcome.position.is_some(),
    };
    let message = outcome.notice.message.clone();

    Json(ApiResponse::success(Some(dto), Some(message), None).with_notices(vec![outcome.notice]))
}
