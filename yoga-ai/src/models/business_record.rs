//! Business record model
//!
//! A record is kept as the ordered JSON object it arrived as, so fields this
//! tool does not understand survive untouched and untouched records
//! re-serialize identically. Scoring, prompting and merging read it through
//! [`BusinessProfile`], a typed view in which every collection field has
//! already been normalized to a native list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON keys used by the dataset
pub mod keys {
    pub const NAME: &str = "name";
    pub const CATEGORY: &str = "category_name";
    pub const ADDRESS: &str = "address";
    pub const CITY: &str = "city";
    pub const WEBSITE: &str = "website";
    pub const PHONE: &str = "phone_number";
    pub const EMAIL: &str = "email_address";
    pub const DESCRIPTION: &str = "business_description";
    pub const INSTAGRAM: &str = "instagram_url";
    pub const FACEBOOK: &str = "facebook_url";
    pub const REVIEW_SCORE: &str = "review_score";
    pub const YOGA_STYLES: &str = "yoga_styles";
    pub const AMENITIES: &str = "amenities";
    pub const LANGUAGES: &str = "languages_spoken";
    pub const OPENING_HOURS: &str = "opening_hours";
    pub const MEDITATION: &str = "meditation_offered";
    pub const TEACHER_TRAINING: &str = "teacher_training";
    pub const DROP_IN_PRICE: &str = "drop_in_price_usd";
    pub const PRICE_RANGE: &str = "price_range";
    pub const CONFIDENCE: &str = "ai_enhancement_confidence";
    pub const ENHANCED: &str = "ai_enhanced";
    pub const ENHANCED_AT: &str = "ai_enhancement_timestamp";
}

/// Marker the dataset uses for "no opening hours"
pub const EMPTY_LIST_MARKER: &str = "[]";

/// One business record, field order preserved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessRecord(Map<String, Value>);

impl BusinessRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or replace a field. Existing keys keep their position.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Builder-style `set`, handy for fixtures
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn field_count(&self) -> usize {
        self.0.len()
    }

    /// Non-empty string value of `key`
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// True when `key` holds something other than null, `false`, zero, or
    /// an empty string, list or object
    pub fn has_value(&self, key: &str) -> bool {
        match self.0.get(key) {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(fields)) => !fields.is_empty(),
            Some(Value::Number(n)) => n.as_f64() != Some(0.0),
            Some(Value::Bool(true)) => true,
        }
    }

    /// Name for log lines
    pub fn display_name(&self) -> &str {
        self.text(keys::NAME).unwrap_or("Unknown")
    }

    /// Typed, normalized view of the record
    pub fn profile(&self) -> BusinessProfile {
        BusinessProfile {
            name: self.owned_text(keys::NAME),
            category: self.owned_text(keys::CATEGORY),
            address: self.owned_text(keys::ADDRESS),
            city: self.owned_text(keys::CITY),
            website: self.contact(keys::WEBSITE),
            phone_number: self.contact(keys::PHONE),
            email_address: self.contact(keys::EMAIL),
            description: self.owned_text(keys::DESCRIPTION),
            instagram_url: self.owned_text(keys::INSTAGRAM),
            facebook_url: self.owned_text(keys::FACEBOOK),
            has_review_score: !matches!(self.0.get(keys::REVIEW_SCORE), None | Some(Value::Null)),
            yoga_styles: self.list(keys::YOGA_STYLES),
            amenities: self.list(keys::AMENITIES),
            languages: self.list(keys::LANGUAGES),
            opening_hours: OpeningHours::from_value(self.0.get(keys::OPENING_HOURS)),
            meditation_offered: self.0.get(keys::MEDITATION).and_then(Value::as_bool),
            teacher_training: self.0.get(keys::TEACHER_TRAINING).and_then(Value::as_bool),
        }
    }

    fn owned_text(&self, key: &str) -> Option<String> {
        self.text(key).map(str::to_string)
    }

    /// Contact details sometimes arrive as bare numbers
    fn contact(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(value) if self.has_value(key) => Some(value.to_string()),
            _ => None,
        }
    }

    fn list(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(ListField::from_value)
            .map(ListField::normalize)
            .unwrap_or_default()
    }
}

/// Collection field as stored: a native list or a JSON-encoded string of one
#[derive(Debug, Clone, PartialEq)]
pub enum ListField {
    List(Vec<String>),
    Encoded(String),
}

impl ListField {
    /// `None` for null and for shapes that are neither list nor string
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::List(items.iter().filter_map(item_text).collect())),
            Value::String(s) => Some(Self::Encoded(s.clone())),
            _ => None,
        }
    }

    /// Canonical list. Undecodable strings become an empty list.
    pub fn normalize(self) -> Vec<String> {
        match self {
            Self::List(items) => items,
            Self::Encoded(raw) => decode_list(&raw),
        }
    }
}

/// Defensive decode of a JSON-encoded list; never fails
pub fn decode_list(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items.iter().filter_map(item_text).collect(),
        Ok(_) | Err(_) => {
            if !raw.is_empty() {
                tracing::debug!(raw = %raw, "Malformed list field, treating as empty");
            }
            Vec::new()
        }
    }
}

/// JSON-encode a list the way the dataset stores string-encoded fields
pub fn encode_list(items: &[String]) -> String {
    Value::from(items.to_vec()).to_string()
}

fn item_text(item: &Value) -> Option<String> {
    match item {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Opening hours for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub day: String,
    pub hours: String,
}

/// Normalized opening hours
#[derive(Debug, Clone, PartialEq)]
pub enum OpeningHours {
    /// Absent, null, empty, or the `"[]"` marker
    Missing,
    /// Structured day/hours list
    Schedule(Vec<DayHours>),
    /// Present but not in day/hours form (kept as text)
    Unstructured(String),
}

impl OpeningHours {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => Self::Missing,
            Some(Value::String(s)) if s.is_empty() || s == EMPTY_LIST_MARKER => Self::Missing,
            Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Array(items)) => Self::from_items(items, s.clone()),
                _ => Self::Unstructured(s.clone()),
            },
            Some(Value::Array(items)) => {
                Self::from_items(items.clone(), Value::Array(items.clone()).to_string())
            }
            Some(other) => Self::Unstructured(other.to_string()),
        }
    }

    fn from_items(items: Vec<Value>, raw: String) -> Self {
        if items.is_empty() {
            return Self::Missing;
        }
        match serde_json::from_value::<Vec<DayHours>>(Value::Array(items)) {
            Ok(days) => Self::Schedule(days),
            Err(_) => Self::Unstructured(raw),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Missing)
    }

    /// Text for prompts; empty when missing
    pub fn describe(&self) -> String {
        match self {
            Self::Missing => String::new(),
            Self::Schedule(days) => days
                .iter()
                .map(|d| format!("{}: {}", d.day, d.hours))
                .collect::<Vec<_>>()
                .join("; "),
            Self::Unstructured(text) => text.clone(),
        }
    }
}

/// Typed view of a [`BusinessRecord`]
///
/// Scalar strings are `Some` only when non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessProfile {
    pub name: Option<String>,
    pub category: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub description: Option<String>,
    pub instagram_url: Option<String>,
    pub facebook_url: Option<String>,
    pub has_review_score: bool,
    pub yoga_styles: Vec<String>,
    pub amenities: Vec<String>,
    pub languages: Vec<String>,
    pub opening_hours: OpeningHours,
    pub meditation_offered: Option<bool>,
    pub teacher_training: Option<bool>,
}

impl BusinessProfile {
    /// Description length in characters (0 when absent)
    pub fn description_len(&self) -> usize {
        self.description.as_deref().map_or(0, |d| d.chars().count())
    }
}
