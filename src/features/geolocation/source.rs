use async_trait::async_trait;
use std::time::Duration;

use crate::features::geolocation::dto::{DeviceErrorCode, DeviceFixDto};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Radius in meters, when the device reports one
    pub accuracy: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Timed out waiting for a position")]
    Timeout,

    #[error("Position unavailable")]
    Unavailable,

    #[error("Geolocation not supported")]
    Unsupported,
}

/// The platform's location service
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self, options: &PositionOptions)
        -> Result<Position, GeolocationError>;
}

/// A fix already obtained by the device and posted to us
pub struct ReportedPosition {
    fix: DeviceFixDto,
}

impl ReportedPosition {
    pub fn new(fix: DeviceFixDto) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl PositionSource for ReportedPosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, GeolocationError> {
        if let Some(code) = self.fix.error {
            return Err(match code {
                DeviceErrorCode::PermissionDenied => GeolocationError::PermissionDenied,
                DeviceErrorCode::Timeout => GeolocationError::Timeout,
                DeviceErrorCode::PositionUnavailable => GeolocationError::Unavailable,
                DeviceErrorCode::Unsupported => GeolocationError::Unsupported,
            });
        }

        match (self.fix.latitude, self.fix.longitude) {
            (Some(latitude), Some(longitude))
                if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) =>
            {
                Ok(Position {
                    latitude,
                    longitude,
                    accuracy: self.fix.accuracy,
                })
            }
            _ => Err(GeolocationError::Unavailable),
        }
    }
}
