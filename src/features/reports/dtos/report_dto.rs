use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::reports::models::Report;

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Stored category slug
    pub category: String,
    pub category_label: String,
    pub marker_color: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            category_label: r.category_label().to_string(),
            marker_color: r.marker_color().to_string(),
            id: r.id,
            title: r.title,
            description: r.description,
            category: r.category,
            latitude: r.latitude,
            longitude: r.longitude,
            image_urls: r.image_urls,
            created_at: r.created_at,
            user_id: r.user_id,
            user_name: r.user_name,
        }
    }
}

/// Query parameters for listing reports
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListReportsQuery {
    /// Category slug, or `all`
    pub category: Option<String>,
}

/// Multipart body for creating a report (documentation only; parsed field by field)
#[derive(Debug, ToSchema)]
pub struct CreateReportForm {
    pub title: String,
    pub description: String,
    /// Category slug
    pub category: String,
    /// Defaults to the city center when omitted
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Up to 5 images, 10MB each
    #[schema(value_type = Vec<String>, format = Binary)]
    pub images: Vec<Vec<u8>>,
}
