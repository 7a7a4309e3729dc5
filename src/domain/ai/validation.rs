use super::error::GenerationError;

pub const DEFAULT_ITEM_COUNT: u32 = 5;
pub const MAX_ITEM_COUNT: u32 = 20;

/// Reject blank text fields
pub fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, GenerationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(GenerationError::Invalid(format!("{field} cannot be empty")));
    }
    Ok(value)
}

/// Requested number of generated items, defaulting when absent
pub fn item_count(requested: Option<u32>) -> Result<u32, GenerationError> {
    let count = requested.unwrap_or(DEFAULT_ITEM_COUNT);
    if !(1..=MAX_ITEM_COUNT).contains(&count) {
        return Err(GenerationError::Invalid(format!(
            "count must be between 1 and {MAX_ITEM_COUNT}"
        )));
    }
    Ok(count)
}
