use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::Session;
use crate::features::map::{MapView, MapViewport};
use crate::features::reports::models::{CategoryFilter, Report};
use crate::features::reports::repository::ReportRepository;
use crate::features::reports::services::CreationOutcome;
use crate::features::reports::store::ReportStore;

#[derive(Debug, Clone, Default)]
pub struct Board {
    store: ReportStore,
    show_create: bool,
    show_auth_prompt: bool,
    selected: Option<Uuid>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, reports: &dyn ReportRepository) -> Result<()> {
        self.store.refresh(reports).await
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    pub fn is_create_open(&self) -> bool {
        self.show_create
    }

    pub fn is_auth_prompt_open(&self) -> bool {
        self.show_auth_prompt
    }

    /// Signed-in users get the create dialog, everyone else the login prompt
    pub fn open_create(&mut self, session: &Session) {
        if session.is_authenticated() {
            self.show_create = true;
        } else {
            self.show_auth_prompt = true;
        }
    }

    pub fn close_create(&mut self) {
        self.show_create = false;
    }

    pub fn close_auth_prompt(&mut self) {
        self.show_auth_prompt = false;
    }

    /// A submission succeeded: refetch once and close the dialog
    pub async fn report_created(
        &mut self,
        outcome: &CreationOutcome,
        reports: &dyn ReportRepository,
    ) -> Result<()> {
        tracing::debug!("Report {} created, refreshing board", outcome.report.id);
        self.show_create = false;
        self.store.refresh(reports).await
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.store.set_filter(filter);
    }

    pub fn visible_reports(&self) -> Vec<&Report> {
        self.store.filtered()
    }

    pub fn map_view(&self, viewport: MapViewport) -> MapView<'_> {
        MapView::new(viewport, self.visible_reports())
    }

    pub fn select_report(&mut self, report_id: Uuid) {
        self.selected = Some(report_id);
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected_report(&self) -> Option<&Report> {
        self.selected.and_then(|id| self.store.get(id))
    }
}
