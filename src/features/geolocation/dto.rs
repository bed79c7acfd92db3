use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Failure codes of the device location API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeviceErrorCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
}

/// What the device obtained: a fix, or the reason it has none
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceFixDto {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub error: Option<DeviceErrorCode>,
}

/// Coordinates to place in the report draft
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocateResponseDto {
    pub latitude: f64,
    pub longitude: f64,
    /// False when the city-center default is being used
    pub located: bool,
}
