use crate::core::error::Result;
use crate::features::reports::models::{CategoryFilter, Report};
use crate::features::reports::repository::ReportRepository;

/// Returns the reports matching `filter`, preserving order
pub fn filter_reports<'a>(reports: &'a [Report], filter: &CategoryFilter) -> Vec<&'a Report> {
    reports
        .iter()
        .filter(|report| filter.matches(&report.category))
        .collect()
}

/// The full report collection plus the selected category filter.
///
/// The filtered view is always derived, never stored.
#[derive(Debug, Clone, Default)]
pub struct ReportStore {
    reports: Vec<Report>,
    filter: CategoryFilter,
}

impl ReportStore {
    pub fn new(reports: Vec<Report>) -> Self {
        Self {
            reports,
            filter: CategoryFilter::All,
        }
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn filtered(&self) -> Vec<&Report> {
        filter_reports(&self.reports, &self.filter)
    }

    pub fn get(&self, id: uuid::Uuid) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Replaces the collection with a fresh fetch. On failure the previous
    /// collection is kept and the error returned.
    pub async fn refresh(&mut self, repository: &dyn ReportRepository) -> Result<()> {
        let reports = repository.list().await.inspect_err(|e| {
            tracing::error!("Failed to refresh reports: {}", e);
        })?;
        self.reports = reports;
        Ok(())
    }
}
