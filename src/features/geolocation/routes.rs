use axum::{routing::post, Router};

use crate::features::geolocation::handler;

pub fn routes() -> Router {
    Router::new().route("/api/geolocation/locate", post(handler::locate))
}
