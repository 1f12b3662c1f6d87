//! Structured reply expected from the generative service

use super::business_record::DayHours;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Parsed enhancement reply
///
/// Every field is optional; `null`, absent keys and values of the wrong
/// type all read as `None`, so one bad field never costs the others.
/// List fields keep their well-typed items and drop the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementPayload {
    #[serde(deserialize_with = "lenient_list")]
    pub enhanced_yoga_styles: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_list")]
    pub enhanced_amenities: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_list")]
    pub enhanced_languages: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub enhanced_description: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub enhanced_opening_hours: Option<Vec<DayHours>>,
    #[serde(deserialize_with = "lenient")]
    pub enhanced_phone_number: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub enhanced_website: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub enhanced_email: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub meditation_offered: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub teacher_training: Option<bool>,
    /// Kept as a JSON number so `15` is written back as `15`, not `15.0`
    #[serde(deserialize_with = "lenient")]
    pub drop_in_price_usd: Option<serde_json::Number>,
    #[serde(deserialize_with = "lenient")]
    pub price_range: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub confidence_score: Option<f64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            debug!(error = %e, "Ignoring mistyped reply field");
            Ok(None)
        }
    }
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        other => {
            debug!(value = %other, "Ignoring reply field that is not a list");
            Ok(None)
        }
    }
}

impl EnhancementPayload {
    /// Confidence clamped to 0-100, 0 when absent
    pub fn confidence(&self) -> u8 {
        self.confidence_score
            .filter(|c| c.is_finite())
            .map(|c| c.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0)
    }
}
