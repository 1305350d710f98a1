//! Field validation shared by the entity constructors.

use crate::error::{CoreError, CoreResult};

/// Trims `value` and rejects it if nothing is left.
pub(crate) fn non_empty<'a>(value: &'a str, what: &str) -> CoreResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_argument(format!(
            "{what} must be provided and non-empty"
        )));
    }
    Ok(trimmed)
}

/// Returns whether every character is an ASCII digit.
pub(crate) fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Returns whether `value` is a 10- or 13-digit ISBN without separators.
pub(crate) fn is_isbn(value: &str) -> bool {
    matches!(value.len(), 10 | 13) && is_digits(value)
}

/// Trims and validates an ISBN.
pub(crate) fn isbn(value: &str) -> CoreResult<&str> {
    let trimmed = non_empty(value, "ISBN")?;
    if !is_isbn(trimmed) {
        return Err(CoreError::invalid_argument(format!(
            "ISBN must be exactly 10 or 13 digits, got {trimmed:?}"
        )));
    }
    Ok(trimmed)
}

/// Trims and validates a numeric user id.
pub(crate) fn user_id(value: &str) -> CoreResult<&str> {
    let trimmed = non_empty(value, "User ID")?;
    if !is_digits(trimmed) {
        return Err(CoreError::invalid_argument(format!(
            "User ID must be a numeric string, got {trimmed:?}"
        )));
    }
    Ok(trimmed)
}
