//! Shared range-validation helpers used by the section validators.

/// Push an error if `value` is below `min`.
pub(crate) fn validate_min(errors: &mut Vec<String>, name: &str, value: u64, min: u64) {
    if value < min {
        errors.push(format!("{name} = {value} must be at least {min}"));
    }
}

/// Push an error if `value` is outside `[min, max]` (float).
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is empty or only whitespace.
pub(crate) fn validate_non_blank(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}
