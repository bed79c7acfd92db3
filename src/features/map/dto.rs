use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::map::view::{MapMarker, MapViewport};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MapResponseDto {
    pub viewport: MapViewport,
    pub markers: Vec<MapMarker>,
}
