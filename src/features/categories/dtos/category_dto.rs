use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{CategoryFilter, ReportCategory};

/// One entry of the category filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryOptionDto {
    pub slug: String,
    pub label: String,
    /// Marker color; absent for the "all" option
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<CategoryFilter> for CategoryOptionDto {
    fn from(filter: CategoryFilter) -> Self {
        Self {
            slug: filter.slug().to_string(),
            label: filter.label().to_string(),
            color: match filter {
                CategoryFilter::All => None,
                CategoryFilter::Only(category) => Some(category.marker_color().to_string()),
            },
        }
    }
}

impl From<ReportCategory> for CategoryOptionDto {
    fn from(category: ReportCategory) -> Self {
        CategoryFilter::Only(category).into()
    }
}
