use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::map::dto::MapResponseDto;
use crate::features::map::view::{MapView, MapViewport};
use crate::features::reports::dtos::ListReportsQuery;
use crate::features::reports::models::CategoryFilter;
use crate::features::reports::ReportService;
use crate::shared::types::{ApiResponse, Meta};

#[derive(Clone)]
pub struct MapState {
    pub report_service: Arc<ReportService>,
    pub viewport: Arc<MapViewport>,
}

/// Map viewport and one marker per report matching the filter
#[utoipa::path(
    get,
    path = "/api/map",
    params(ListReportsQuery),
    responses(
        (status = 200, description = "Viewport and markers", body = ApiResponse<MapResponseDto>),
        (status = 400, description = "Unknown category")
    ),
    tag = "map"
)]
pub async fn get_map(
    State(state): State<MapState>,
    Query(query): Query<ListReportsQuery>,
) -> Result<Json<ApiResponse<MapResponseDto>>> {
    let filter = CategoryFilter::from_query(query.category.as_deref())?;
    let store = state.report_service.load_store(filter).await?;

    let view = MapView::new(state.viewport.as_ref().clone(), store.filtered());
    let markers = view.markers();
    let total = markers.len() as i64;
    let dto = MapResponseDto {
        viewport: view.viewport().clone(),
        markers,
    };

    Ok(Json(ApiResponse::success(Some(dto), None, Some(Meta { total }))))
}
