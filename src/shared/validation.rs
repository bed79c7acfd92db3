use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Extension taken from an uploaded file name before it becomes part of a storage key
    /// - Valid: "jpg", "PNG", "heic"
    /// - Invalid: "", "tar.gz", "../x", "a very long extension"
    pub static ref FILE_EXTENSION_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]{1,10}$").unwrap();
}

/// Rejects strings that are empty once surrounding whitespace is trimmed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
