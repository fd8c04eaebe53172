//! Flat request-body fields.
//!
//! Bodies arrive as urlencoded forms (every value text) or flat JSON (any
//! scalar). Fields are normalised to text and cast later by the domain.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a scalar field as text. `null` reads as absent.
pub(crate) fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
