use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::map::handler::{self, MapState};
use crate::features::map::view::MapViewport;
use crate::features::reports::ReportService;

pub fn routes(report_service: Arc<ReportService>, viewport: MapViewport) -> Router {
    let state = MapState {
        report_service,
        viewport: Arc::new(viewport),
    };

    Router::new()
        .route("/api/map", get(handler::get_map))
        .with_state(state)
}
