use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CategoryFilter, Report};
use crate::features::reports::repository::ReportRepository;
use crate::features::reports::store::ReportStore;
use crate::shared::constants::REPORT_NOT_FOUND_MESSAGE;

/// Read side of reports: list, filter and detail
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
}

impl ReportService {
    pub fn new(reports: Arc<dyn ReportRepository>) -> Self {
        Self { reports }
    }

    /// Fresh store holding every report, newest first, with `filter` selected
    pub async fn load_store(&self, filter: CategoryFilter) -> Result<ReportStore> {
        let mut store = ReportStore::default();
        store.refresh(self.reports.as_ref()).await?;
        store.set_filter(filter);
        Ok(store)
    }

    /// Reports matching `filter`, newest first
    pub async fn list(&self, filter: CategoryFilter) -> Result<Vec<Report>> {
        let store = self.load_store(filter).await?;
        Ok(store.filtered().into_iter().cloned().collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Report> {
        self.reports
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(REPORT_NOT_FOUND_MESSAGE.to_string()))
    }
}
