use std::sync::Arc;

use crate::features::geolocation::source::{
    GeolocationError, Position, PositionOptions, PositionSource,
};
use crate::features::reports::form::ReportForm;
use crate::shared::constants::{
    GEOLOCATION_UNSUPPORTED_MESSAGE, LOCATION_FALLBACK_MESSAGE, LOCATION_FOUND_MESSAGE,
};
use crate::shared::types::Notice;

#[derive(Debug, Clone, PartialEq)]
pub struct LocateOutcome {
    /// The fix, when one was obtained
    pub position: Option<Position>,
    pub notice: Notice,
}

/// Fills a report draft's coordinates from the device location, once per call.
pub struct GeolocationHelper {
    source: Arc<dyn PositionSource>,
    options: PositionOptions,
}

impl GeolocationHelper {
    pub fn new(source: Arc<dyn PositionSource>) -> Self {
        Self {
            source,
            options: PositionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PositionOptions) -> Self {
        self.options = options;
        self
    }

    /// On success overwrites the draft's position. On failure the draft keeps
    /// its current (default) position and a warning is returned.
    pub async fn locate(&self, form: &mut ReportForm) -> LocateOutcome {
        let lookup = self.source.current_position(&self.options);
        let result = match tokio::time::timeout(self.options.timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(GeolocationError::Timeout),
        };

        match result {
            Ok(position) => {
                form.set_position(position.latitude, position.longitude);
                tracing::debug!(
                    "Located device at {}, {}",
                    position.latitude,
                    position.longitude
                );
                LocateOutcome {
                    position: Some(position),
                    notice: Notice::success(LOCATION_FOUND_MESSAGE),
                }
            }
            Err(GeolocationError::Unsupported) => LocateOutcome {
                position: None,
                notice: Notice::warning(GEOLOCATION_UNSUPPORTED_MESSAGE),
            },
            Err(e) => {
                tracing::warn!("Geolocation failed, keeping default position: {}", e);
                LocateOutcome {
                    position: None,
                    notice: Notice::warning(LOCATION_FALLBACK_MESSAGE),
                }
            }
        }
    }
}
