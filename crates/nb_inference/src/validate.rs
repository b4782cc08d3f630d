use nb_core::{Result, ValidationError};

/// Minimum article length, in characters, after trimming.
pub const MIN_ARTICLE_CHARS: usize = 50;

/// Reject empty or too-short articles before any expensive work.
pub fn validate_article(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput.into());
    }
    if trimmed.chars().count() < MIN_ARTICLE_CHARS {
        return Err(ValidationError::TooShort.into());
    }
    Ok(trimmed)
}
