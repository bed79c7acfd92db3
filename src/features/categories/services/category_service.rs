use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryOptionDto;
use crate::features::reports::models::{CategoryFilter, ReportCategory};
use crate::shared::constants::INVALID_CATEGORY_MESSAGE;

/// The fixed category set, presented for filters and the create form
#[derive(Debug, Default)]
pub struct CategoryService;

impl CategoryService {
    pub fn new() -> Self {
        Self
    }

    /// Filter options, "all" first
    pub fn filter_options(&self) -> Vec<CategoryOptionDto> {
        std::iter::once(CategoryFilter::All)
            .chain(ReportCategory::ALL.into_iter().map(CategoryFilter::Only))
            .map(CategoryOptionDto::from)
            .collect()
    }

    pub fn get_by_slug(&self, slug: &str) -> Result<CategoryOptionDto> {
        ReportCategory::from_slug(slug)
            .map(CategoryOptionDto::from)
            .ok_or_else(|| AppError::NotFound(INVALID_CATEGORY_MESSAGE.to_string()))
    }
}
