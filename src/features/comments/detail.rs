use chrono::{DateTime, FixedOffset, Utc};

/// Brasília time (UTC-3, no daylight saving since 2019)
const DISPLAY_OFFSET_SECONDS: i32 = 3 * 3600;

/// `dd/mm/yyyy HH:MM` in local city time
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    match FixedOffset::west_opt(DISPLAY_OFFSET_SECONDS) {
        Some(offset) => timestamp
            .with_timezone(&offset)
            .format("%d/%m/%Y %H:%M")
            .to_string(),
        None => timestamp.format("%d/%m/%Y %H:%M").to_string(),
    }
}

/// Six decimal places, latitude first
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{:.6}, {:.6}", latitude, longitude)
}
