//! Casting of flat request fields.

use crate::error::DomainError;

/// Parse the leading decimal number of `raw`, ignoring any trailing text.
///
/// `"12.5km"` parses as `12.5`, `"abc"` and `""` yield `None`. NaN never comes
/// back as `Some`.
pub fn parse_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .map_or(s.len(), |(i, _)| i);

    (1..=end)
        .rev()
        .find_map(|n| s[..n].parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

/// Cast a boolean field. Accepts `true/false`, `1/0` and `yes/no`.
pub fn cast_bool(field: &str, raw: &str) -> Result<bool, DomainError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(DomainError::validation(format!(
            "{field}: cast to Boolean failed for value \"{other}\""
        ))),
    }
}

/// Cast a whole-number field. The entire value must be numeric.
pub fn cast_integer(field: &str, raw: &str) -> Result<i32, DomainError> {
    let cast_failed = || {
        DomainError::validation(format!("{field}: cast to Number failed for value \"{raw}\""))
    };

    let value: f64 = raw.trim().parse().map_err(|_| cast_failed())?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(cast_failed());
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(cast_failed());
    }
    Ok(value as i32)
}

/// Split a comma-separated facilities field. Entries are kept verbatim.
pub fn split_facilities(raw: Option<&str>) -> Result<Vec<String>, DomainError> {
    let raw = raw.ok_or_else(|| DomainError::validation("facilities is required"))?;
    Ok(raw.split(',').map(str::to_string).collect())
}
