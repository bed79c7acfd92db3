use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::core::error::AppError;
use crate::shared::constants::{ALL_CATEGORIES_LABEL, INVALID_CATEGORY_MESSAGE};

/// Neutral marker color for categories this client does not know
pub const FALLBACK_MARKER_COLOR: &str = "#6b7280";

/// Label used for categories this client does not know
pub const FALLBACK_CATEGORY_LABEL: &str = "Outros";

/// Fixed set of problem categories a report can be filed under.
///
/// Serialized as the slug stored in the `reports.category` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ReportCategory {
    #[serde(rename = "buraco")]
    Pothole,
    #[serde(rename = "iluminacao")]
    Lighting,
    #[serde(rename = "bueiro")]
    StormDrain,
    #[serde(rename = "calcada")]
    Sidewalk,
    #[serde(rename = "sinalizacao")]
    Signage,
    #[serde(rename = "outros")]
    Other,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 6] = [
        ReportCategory::Pothole,
        ReportCategory::Lighting,
        ReportCategory::StormDrain,
        ReportCategory::Sidewalk,
        ReportCategory::Signage,
        ReportCategory::Other,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ReportCategory::Pothole => "buraco",
            ReportCategory::Lighting => "iluminacao",
            ReportCategory::StormDrain => "bueiro",
            ReportCategory::Sidewalk => "calcada",
            ReportCategory::Signage => "sinalizacao",
            ReportCategory::Other => "outros",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportCategory::Pothole => "Buraco",
            ReportCategory::Lighting => "Iluminação",
            ReportCategory::StormDrain => "Bueiro",
            ReportCategory::Sidewalk => "Calçada",
            ReportCategory::Signage => "Sinalização",
            ReportCategory::Other => "Outros",
        }
    }

    pub fn marker_color(&self) -> &'static str {
        match self {
            ReportCategory::Pothole => "#ef4444",
            ReportCategory::Lighting => "#f59e0b",
            ReportCategory::StormDrain => "#06b6d4",
            ReportCategory::Sidewalk => "#8b5cf6",
            ReportCategory::Signage => "#f97316",
            ReportCategory::Other => FALLBACK_MARKER_COLOR,
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }

    /// Label for a stored slug, falling back to "Outros"
    pub fn label_for(slug: &str) -> &'static str {
        Self::from_slug(slug)
            .map(|c| c.label())
            .unwrap_or(FALLBACK_CATEGORY_LABEL)
    }

    /// Marker color for a stored slug, falling back to neutral gray
    pub fn color_for(slug: &str) -> &'static str {
        Self::from_slug(slug)
            .map(|c| c.marker_color())
            .unwrap_or(FALLBACK_MARKER_COLOR)
    }
}

impl std::fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for ReportCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s.trim())
            .ok_or_else(|| AppError::Validation(INVALID_CATEGORY_MESSAGE.to_string()))
    }
}

/// Category filter applied to the report list and the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ReportCategory),
}

impl CategoryFilter {
    pub const ALL_SLUG: &'static str = "all";

    pub fn slug(&self) -> &'static str {
        match self {
            CategoryFilter::All => Self::ALL_SLUG,
            CategoryFilter::Only(category) => category.slug(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES_LABEL,
            CategoryFilter::Only(category) => category.label(),
        }
    }

    /// Exact match against a stored category slug
    pub fn matches(&self, stored_slug: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => category.slug() == stored_slug,
        }
    }

    /// `None`, empty and `all` all mean no filtering
    pub fn from_query(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(str::trim) {
            None | Some("") => Ok(CategoryFilter::All),
            Some(slug) => slug.parse(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == Self::ALL_SLUG {
            return Ok(CategoryFilter::All);
        }
        s.parse::<ReportCategory>().map(CategoryFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip_for_every_category() {
        for category in ReportCategory::ALL {
            assert_eq!(ReportCategory::from_slug(category.slug()), Some(category));
        }
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(ReportCategory::Lighting.label(), "Iluminação");
        assert_eq!(ReportCategory::Pothole.marker_color(), "#ef4444");
        assert_eq!(ReportCategory::StormDrain.marker_color(), "#06b6d4");
    }

    #[test]
    fn test_unknown_slug_falls_back_to_neutral() {
        assert_eq!(ReportCategory::label_for("arvore"), "Outros");
        assert_eq!(ReportCategory::color_for("arvore"), "#6b7280");
        assert_eq!(ReportCategory::color_for("calcada"), "#8b5cf6");
    }

    #[test]
    fn test_serde_uses_slugs() {
        let json = serde_json::to_string(&ReportCategory::Signage).unwrap();
        assert_eq!(json, "\"sinalizacao\"");
        let parsed: ReportCategory = serde_json::from_str("\"bueiro\"").unwrap();
        assert_eq!(parsed, ReportCategory::StormDrain);
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches("anything"));
        let only = CategoryFilter::Only(ReportCategory::Pothole);
        assert!(only.matches("buraco"));
        assert!(!only.matches("Buraco"));
        assert!(!only.matches("bueiro"));
    }

    #[test]
    fn test_filter_from_query() {
        assert_eq!(CategoryFilter::from_query(None).unwrap(), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_query(Some("all")).unwrap(), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_query(Some("calcada")).unwrap(),
            CategoryFilter::Only(ReportCategory::Sidewalk)
        );
        let err = CategoryFilter::from_query(Some("lixo")).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "Categoria inválida"));
    }
}
