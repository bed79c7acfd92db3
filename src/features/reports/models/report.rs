use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::reports::models::ReportCategory;
use crate::shared::constants::ANONYMOUS_USER_NAME;

/// Row shape of `reports LEFT JOIN profiles`
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub author_name: Option<String>,
}

/// A reported street problem with its author's display name resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Stored slug; may be one this client does not know
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
}

impl Report {
    pub fn category_label(&self) -> &'static str {
        ReportCategory::label_for(&self.category)
    }

    pub fn marker_color(&self) -> &'static str {
        ReportCategory::color_for(&self.category)
    }

    pub fn first_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            latitude: row.latitude,
            longitude: row.longitude,
            image_urls: row.image_urls,
            created_at: row.created_at,
            user_id: row.user_id,
            user_name: resolve_author_name(row.author_name),
        }
    }
}

/// Profile name, or "Usuário anônimo" when missing or blank
pub fn resolve_author_name(name: Option<String>) -> String {
    name.map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| ANONYMOUS_USER_NAME.to_string())
}

/// Data for inserting a new report
#[derive(Debug, Clone)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    pub latitude: f64,
    pub longitude: f64,
    pub image_urls: Vec<String>,
    pub user_id: String,
}
