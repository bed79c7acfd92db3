use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::config::MapConfig;
use crate::features::reports::models::Report;

/// Static map configuration; never derived from the reports shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapViewport {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub tile_url: String,
    pub tile_attribution: String,
}

impl From<&MapConfig> for MapViewport {
    fn from(config: &MapConfig) -> Self {
        Self {
            center_lat: config.center_lat,
            center_lon: config.center_lon,
            zoom: config.zoom,
            tile_url: config.tile_url.clone(),
            tile_attribution: config.tile_attribution.clone(),
        }
    }
}

impl Default for MapViewport {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarkerPopup {
    pub title: String,
    pub category_label: String,
    pub description: String,
    pub image_url: Option<String>,
    /// "Por: {author}"
    pub author_line: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapMarker {
    pub report_id: Uuid,
    pub lat: f64,
    pub lon: f64,
    pub color: String,
    pub popup: MarkerPopup,
}

impl From<&Report> for MapMarker {
    fn from(report: &Report) -> Self {
        Self {
            report_id: report.id,
            lat: report.latitude,
            lon: report.longitude,
            color: report.marker_color().to_string(),
            popup: MarkerPopup {
                title: report.title.clone(),
                category_label: report.category_label().to_string(),
                description: report.description.clone(),
                image_url: report.first_image().map(String::from),
                author_line: format!("Por: {}", report.user_name),
            },
        }
    }
}

/// Markers for the reports currently visible
pub struct MapView<'a> {
    viewport: MapViewport,
    reports: Vec<&'a Report>,
}

impl<'a> MapView<'a> {
    pub fn new(viewport: MapViewport, reports: Vec<&'a Report>) -> Self {
        Self { viewport, reports }
    }

    pub fn viewport(&self) -> &MapViewport {
        &self.viewport
    }

    /// One marker per visible report, in report order
    pub fn markers(&self) -> Vec<MapMarker> {
        self.reports.iter().map(|r| MapMarker::from(*r)).collect()
    }

    /// Hands the report behind a clicked marker to `on_select`.
    /// Returns false when no visible report has that id.
    pub fn click(&self, report_id: Uuid, on_select: impl FnOnce(&Report)) -> bool {
        match self.reports.iter().find(|r| r.id == report_id) {
            Some(report) => {
                on_select(report);
                true
            }
            None => false,
        }
    }
}
