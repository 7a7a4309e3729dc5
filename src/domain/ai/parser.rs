//! Turning raw provider text into structured values.
//!
//! Models often wrap JSON in a markdown code fence even when asked not to,
//! so the fence is stripped before parsing. Anything else that is not the
//! expected shape fails the whole payload.

use super::error::ResponseFormatError;
use serde::de::DeserializeOwned;

const FENCE: &str = "```";

/// Remove a leading code fence (bare or tagged `json`) and a trailing fence,
/// then trim.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix(FENCE))
        .unwrap_or(trimmed);
    let body = body.strip_suffix(FENCE).unwrap_or(body);
    body.trim()
}

/// Parse a (possibly fenced) JSON array into `T`s.
///
/// An empty array is rejected: a generation request always asks for at
/// least one item.
pub fn parse_json_array<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, ResponseFormatError> {
    let items: Vec<serde_json::Value> = serde_json::from_str(strip_code_fence(raw))?;
    if items.is_empty() {
        return Err(ResponseFormatError::Empty);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| ResponseFormatError::InvalidItem {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}
