//! Map markers for the reports in the current filter.

pub mod dto;
pub mod handler;
pub mod routes;
pub mod view;

pub use view::{MapMarker, MapView, MapViewport, MarkerPopup};
