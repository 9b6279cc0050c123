//! Size limits applied to a normalized form before anything is sent.

use crate::error::CoreError;

use super::fields::Fields;

/// Maximum characters in any single value or list element.
pub const MAX_FIELD_CHARS: usize = 5000;

/// Maximum characters across all values combined.
pub const MAX_TOTAL_CHARS: usize = 20_000;

/// Reject forms with an oversized field or an oversized total.
///
/// Lengths are counted in Unicode scalar values.
pub fn validate_lengths(fields: &Fields) -> Result<(), CoreError> {
    let mut total = 0usize;
    for item in fields.values().flat_map(|v| v.items()) {
        let len = item.chars().count();
        if len > MAX_FIELD_CHARS {
            return Err(CoreError::Validation(format!(
                "Each field must be at most {MAX_FIELD_CHARS} characters."
            )));
        }
        total += len;
    }

    if total > MAX_TOTAL_CHARS {
        return Err(CoreError::Validation(format!(
            "Combined input is too long (max {MAX_TOTAL_CHARS} characters)."
        )));
    }
    Ok(())
}
