//! Device location for new report drafts.

pub mod dto;
pub mod handler;
pub mod helper;
pub mod routes;
pub mod source;

pub use helper::{GeolocationHelper, LocateOutcome};
pub use source::{GeolocationError, Position, PositionOptions, PositionSource, ReportedPosition};
