//! Forgiving deserializers for catalog snapshots.
//!
//! Catalog exports come from an authoring tool that writes `null` for blank
//! fields and occasionally numbers where text is expected. A single bad field
//! must not make the whole catalog unusable, so these helpers degrade to the
//! field's empty value instead of failing.

use serde::{Deserialize, Deserializer};

use crate::catalog::TextZone;

/// Deserializes a text field, mapping `null` and non-string values to `""`.
///
/// # Accepted Formats
///
/// * **String**: kept as is
/// * **Null / missing**: empty string
/// * **Anything else** (number, bool, array, object): empty string
pub fn de_string_forgiving<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match opt {
        Some(serde_json::Value::String(s)) => s,
        _ => String::new(),
    })
}

/// Deserializes `textZone`, mapping `null`, unknown names and non-string
/// values to [`TextZone::Unspecified`].
pub fn de_text_zone_forgiving<'de, D>(deserializer: D) -> Result<TextZone, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(v) = opt else {
        return Ok(TextZone::Unspecified);
    };
    match v {
        serde_json::Value::String(s) => {
            let s = s.trim().to_lowercase();
            Ok(serde_json::from_value(serde_json::Value::String(s)).unwrap_or_default())
        }
        _ => Ok(TextZone::Unspecified),
    }
}
