use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{NewReport, Report, ReportRow};

/// Relational store of reports
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// All reports, newest first, with author names resolved
    async fn list(&self) -> Result<Vec<Report>>;

    async fn find(&self, id: Uuid) -> Result<Option<Report>>;

    async fn insert(&self, report: &NewReport) -> Result<Report>;
}

const REPORT_COLUMNS: &str = r#"
    r.id, r.title, r.description, r.category, r.latitude, r.longitude,
    r.image_urls, r.created_at, r.user_id, p.full_name AS author_name
"#;

pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    async fn list(&self) -> Result<Vec<Report>> {
        let sql = format!(
            "SELECT {REPORT_COLUMNS} FROM reports r \
             LEFT JOIN profiles p ON p.id = r.user_id \
             ORDER BY r.created_at DESC"
        );

        let rows = sqlx::query_as::<_, ReportRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Report::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Report>> {
        let sql = format!(
            "SELECT {REPORT_COLUMNS} FROM reports r \
             LEFT JOIN profiles p ON p.id = r.user_id \
             WHERE r.id = $1"
        );

        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch report {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(row.map(Report::from))
    }

    async fn insert(&self, report: &NewReport) -> Result<Report> {
        let sql = format!(
            "WITH r AS ( \
                INSERT INTO reports (title, description, category, latitude, longitude, image_urls, user_id) \
                VALUES ($1, $2, $3, $4, $5, $6, $7) \
                RETURNING * \
             ) \
             SELECT {REPORT_COLUMNS} FROM r \
             LEFT JOIN profiles p ON p.id = r.user_id"
        );

        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(&report.title)
            .bind(&report.description)
            .bind(report.category.slug())
            .bind(report.latitude)
            .bind(report.longitude)
            .bind(&report.image_urls)
            .bind(&report.user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert report: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Created report {} by user {}", row.id, row.user_id);
        Ok(row.into())
    }
}
