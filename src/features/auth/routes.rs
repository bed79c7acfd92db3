use crate::features::auth::handler;
use crate::features::auth::service::SessionService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Session routes; expect `session_middleware` to be layered by the caller
pub fn routes(service: Arc<SessionService>) -> Router {
    Router::new()
        .route("/api/session", get(handler::get_session))
        .with_state(service)
}
