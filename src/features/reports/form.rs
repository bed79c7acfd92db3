use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::ReportCategory;
use crate::shared::constants::{
    DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, INVALID_COORDINATES_MESSAGE, REQUIRED_FIELDS_MESSAGE,
};
use crate::shared::validation::not_blank;

/// Draft of a new report as filled in by the user
#[derive(Debug, Clone, Validate)]
pub struct ReportForm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    #[validate(custom(function = "not_blank"))]
    pub description: String,

    #[validate(required)]
    pub category: Option<ReportCategory>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Default for ReportForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: None,
            latitude: DEFAULT_CENTER_LAT,
            longitude: DEFAULT_CENTER_LON,
        }
    }
}

impl ReportForm {
    /// Checks required fields, mapping failures to the message shown to the user
    pub fn check(&self) -> Result<ReportCategory> {
        if let Err(errors) = self.validate() {
            let fields = errors.field_errors();
            let coordinates_only = fields
                .keys()
                .all(|field| *field == "latitude" || *field == "longitude");
            let message = if coordinates_only {
                INVALID_COORDINATES_MESSAGE
            } else {
                REQUIRED_FIELDS_MESSAGE
            };
            return Err(AppError::Validation(message.to_string()));
        }

        self.category
            .ok_or_else(|| AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))
    }

    pub fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.latitude = latitude;
        self.longitude = longitude;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ReportForm {
        ReportForm {
            title: "Poste apagado".to_string(),
            description: "Rua escura à noite".to_string(),
            category: Some(ReportCategory::Lighting),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_position_is_city_center() {
        let form = ReportForm::default();
        assert_eq!(form.latitude, -25.0916);
        assert_eq!(form.longitude, -50.1668);
    }

    #[test]
    fn test_check_accepts_filled_form() {
        assert_eq!(filled().check().unwrap(), ReportCategory::Lighting);
    }

    #[test]
    fn test_check_rejects_blank_fields() {
        for form in [
            ReportForm { title: "   ".into(), ..filled() },
            ReportForm { description: "\n".into(), ..filled() },
            ReportForm { category: None, ..filled() },
        ] {
            let err = form.check().unwrap_err();
            assert!(
                matches!(err, AppError::Validation(ref msg) if msg == REQUIRED_FIELDS_MESSAGE)
            );
        }
    }

    #[test]
    fn test_check_rejects_out_of_range_coordinates() {
        let form = ReportForm { latitude: 120.0, ..filled() };
        let err = form.check().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Coordenadas inválidas"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = filled();
        form.set_position(1.0, 2.0);
        form.reset();
        assert!(form.title.is_empty());
        assert_eq!(form.latitude, DEFAULT_CENTER_LAT);
    }
}
