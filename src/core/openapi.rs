use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::comments::{
    dtos as comments_dtos, handlers as comments_handlers, thread as comments_thread,
};
use crate::features::geolocation::{dto as geolocation_dto, handler as geolocation_handler};
use crate::features::map::{dto as map_dto, handler as map_handler, view as map_view};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta, Notice, NoticeLevel};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Session
        auth::handler::get_session,
        // Reports
        reports_handlers::list_reports,
        reports_handlers::create_report,
        // Report detail & comments
        comments_handlers::get_report_detail,
        comments_handlers::list_comments,
        comments_handlers::add_comment,
        // Map
        map_handler::get_map,
        // Geolocation
        geolocation_handler::locate,
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::get_category,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Notice,
            NoticeLevel,
            // Session
            auth::dto::SessionHeaderDto,
            auth::dto::HeaderUserDto,
            ApiResponse<auth::dto::SessionHeaderDto>,
            // Reports
            reports_models::ReportCategory,
            reports_dtos::ReportResponseDto,
            reports_dtos::CreateReportForm,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            // Comments
            comments_dtos::CommentResponseDto,
            comments_dtos::CreateCommentDto,
            comments_dtos::ReportDetailResponseDto,
            comments_thread::Composer,
            ApiResponse<comments_dtos::ReportDetailResponseDto>,
            ApiResponse<Vec<comments_dtos::CommentResponseDto>>,
            // Map
            map_view::MapViewport,
            map_view::MapMarker,
            map_view::MarkerPopup,
            map_dto::MapResponseDto,
            ApiResponse<map_dto::MapResponseDto>,
            // Geolocation
            geolocation_dto::DeviceErrorCode,
            geolocation_dto::DeviceFixDto,
            geolocation_dto::LocateResponseDto,
            ApiResponse<geolocation_dto::LocateResponseDto>,
            // Categories
            categories_dtos::CategoryOptionDto,
            ApiResponse<categories_dtos::CategoryOptionDto>,
            ApiResponse<Vec<categories_dtos::CategoryOptionDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Session shown in the page header"),
        (name = "reports", description = "Street problem reports"),
        (name = "comments", description = "Comments on reports"),
        (name = "map", description = "Map viewport and markers"),
        (name = "geolocation", description = "Device position for new reports"),
        (name = "categories", description = "Report categories (public)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Conecta Rua API",
        version = "0.1.0",
        description = "API documentation for Conecta Rua",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
