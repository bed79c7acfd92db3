use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::categories::dtos::CategoryOptionDto;
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// List category filter options
///
/// The first entry is the `all` sentinel.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Category options", body = ApiResponse<Vec<CategoryOptionDto>>),
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Json<ApiResponse<Vec<CategoryOptionDto>>> {
    Json(ApiResponse::success(Some(service.filter_options()), None, None))
}

/// Get category by slug
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    params(
        ("slug" = String, Path, description = "Category slug")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryOptionDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryOptionDto>>> {
    let category = service.get_by_slug(&slug)?;
    Ok(Json(ApiResponse::success(Some(category), None, None)))
}
