//! Category and keyword tag handling for beats.
//!
//! Tags arrive either as repeated form fields or as one comma-separated
//! string. Both shapes normalize to a trimmed, ordered list; the first
//! category is the beat's primary category.

use crate::error::CoreError;

/// Split a raw tag value on commas, trimming whitespace and dropping blanks.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Ensure `tags` is a non-empty list of non-blank entries.
///
/// `field` names the offending input in the error message.
pub fn validate_tags(field: &str, tags: &[String]) -> Result<(), CoreError> {
    if tags.is_empty() {
        return Err(CoreError::Validation(format!(
            "'{field}' must contain at least one entry"
        )));
    }
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation(format!(
            "'{field}' must not contain blank entries"
        )));
    }
    Ok(())
}

/// The primary category of a beat: its first tag, or `""` when there is none.
pub fn primary_category(category: &[String]) -> String {
    category.first().cloned().unwrap_or_default()
}
