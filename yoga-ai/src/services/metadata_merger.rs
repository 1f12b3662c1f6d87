//! Merge policy for enhancement results
//!
//! **Merge strategy:** never lose existing good data.
//! - Lists (styles, amenities, languages): replaced when the reply's list is non-empty
//! - Description: replaced only by a strictly longer one
//! - Opening hours, phone, website, email: filled only when missing
//! - Meditation / teacher training: reply value, else original, else `false`
//! - Drop-in price, price range: overwritten whenever the reply has a value
//! - Always stamps confidence, the enhanced flag, and the timestamp
//!
//! Pure: the caller supplies the clock and folds [`FieldUpdates`] into the
//! run statistics.

use crate::models::{keys, BusinessRecord, EnhancementPayload, FieldUpdates};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Merged record plus which fields changed
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub record: BusinessRecord,
    pub updates: FieldUpdates,
}

/// Combine `original` with a parsed reply
pub fn merge(
    original: &BusinessRecord,
    payload: &EnhancementPayload,
    now: DateTime<Utc>,
) -> MergeOutcome {
    let profile = original.profile();
    let mut record = original.clone();
    let mut updates = FieldUpdates::default();

    updates.yoga_styles = replace_list(&mut record, keys::YOGA_STYLES, &payload.enhanced_yoga_styles);
    updates.amenities = replace_list(&mut record, keys::AMENITIES, &payload.enhanced_amenities);
    updates.languages = replace_list(&mut record, keys::LANGUAGES, &payload.enhanced_languages);

    if let Some(description) = non_empty(&payload.enhanced_description) {
        if description.chars().count() > profile.description_len() {
            record.set(keys::DESCRIPTION, description);
            updates.description = true;
        }
    }

    if let Some(hours) = payload.enhanced_opening_hours.as_ref().filter(|h| !h.is_empty()) {
        if !profile.opening_hours.is_present() {
            // Stored the way the dataset stores it: a JSON-encoded string
            match serde_json::to_string(hours) {
                Ok(encoded) => {
                    record.set(keys::OPENING_HOURS, encoded);
                    updates.opening_hours = true;
                }
                Err(e) => tracing::warn!("Could not encode opening hours: {}", e),
            }
        }
    }

    updates.phone_number = fill_missing(&mut record, keys::PHONE, &payload.enhanced_phone_number);
    updates.website = fill_missing(&mut record, keys::WEBSITE, &payload.enhanced_website);
    updates.email = fill_missing(&mut record, keys::EMAIL, &payload.enhanced_email);

    record.set(
        keys::MEDITATION,
        payload
            .meditation_offered
            .or(profile.meditation_offered)
            .unwrap_or(false),
    );
    record.set(
        keys::TEACHER_TRAINING,
        payload
            .teacher_training
            .or(profile.teacher_training)
            .unwrap_or(false),
    );

    if let Some(price) = &payload.drop_in_price_usd {
        record.set(keys::DROP_IN_PRICE, Value::Number(price.clone()));
    }
    if let Some(range) = non_empty(&payload.price_range) {
        record.set(keys::PRICE_RANGE, range);
    }

    record.set(keys::CONFIDENCE, payload.confidence());
    record.set(keys::ENHANCED, true);
    record.set(
        keys::ENHANCED_AT,
        now.to_rfc3339_opts(SecondsFormat::Micros, true),
    );

    MergeOutcome { record, updates }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn replace_list(record: &mut BusinessRecord, key: &str, items: &Option<Vec<String>>) -> bool {
    match items {
        Some(items) if !items.is_empty() => {
            record.set(key, items.clone());
            true
        }
        _ => false,
    }
}

fn fill_missing(record: &mut BusinessRecord, key: &str, value: &Option<String>) -> bool {
    match non_empty(value) {
        Some(value) if !record.has_value(key) => {
            record.set(key, value);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayHours;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(value: Value) -> BusinessRecord {
        serde_json::from_value(value).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 14, 9, 30, 0).unwrap()
    }

    fn payload(value: Value) -> EnhancementPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_sparse_record_gets_filled() {
        let original = record(json!({ "name": "Ubud Yoga House", "address": "Jl. Raya Ubud" }));
        let reply = payload(json!({
            "enhanced_yoga_styles": ["Hatha", "Vinyasa"],
            "enhanced_amenities": [],
            "enhanced_description": "A calm studio in Ubud offering daily classes.",
            "confidence_score": 72
        }));

        let MergeOutcome { record: merged, updates } = merge(&original, &reply, now());

        assert_eq!(merged.get("yoga_styles"), Some(&json!(["Hatha", "Vinyasa"])));
        assert_eq!(merged.get("amenities"), None);
        assert_eq!(
            merged.text("business_description"),
            Some("A calm studio in Ubud offering daily classes.")
        );
        assert_eq!(merged.get("ai_enhanced"), Some(&json!(true)));
        assert_eq!(merged.get("ai_enhancement_confidence"), Some(&json!(72)));
        assert_eq!(
            merged.text("ai_enhancement_timestamp"),
            Some("2025-08-14T09:30:00.000000Z")
        );
        assert!(updates.yoga_styles && updates.description);
        assert!(!updates.amenities);
        assert_eq!(updates.count(), 2);
    }

    #[test]
    fn test_contact_fields_never_overwritten() {
        let original = record(json!({
            "phone_number": "+62 812 0000",
            "website": "https://original.id",
            "email_address": "hi@original.id"
        }));
        let reply = payload(json!({
            "enhanced_phone_number": "+62 999",
            "enhanced_website": "https://ai.id",
            "enhanced_email": "ai@ai.id"
        }));

        let outcome = merge(&original, &reply, now());

        assert_eq!(outcome.record.text("phone_number"), Some("+62 812 0000"));
        assert_eq!(outcome.record.text("website"), Some("https://original.id"));
        assert_eq!(outcome.record.text("email_address"), Some("hi@original.id"));
        assert!(!outcome.updates.phone_number);
        assert!(!outcome.updates.website);
        assert!(!outcome.updates.email);
    }

    #[test]
    fn test_contact_fields_filled_when_empty_string() {
        let original = record(json!({ "website": "", "phone_number": null }));
        let reply = payload(json!({
            "enhanced_website": "https://new.id",
            "enhanced_phone_number": "+62 361 1"
        }));

        let outcome = merge(&original, &reply, now());

        assert_eq!(outcome.record.text("website"), Some("https://new.id"));
        assert_eq!(outcome.record.text("phone_number"), Some("+62 361 1"));
        assert!(outcome.updates.website && outcome.updates.phone_number);
    }

    #[test]
    fn test_numeric_contact_fields_kept() {
        let original = record(json!({ "phone_number": 6281234567u64, "website": false }));
        let reply = payload(json!({
            "enhanced_phone_number": "+62 812 3456 7",
            "enhanced_website": "https://new.id"
        }));

        let outcome = merge(&original, &reply, now());

        assert_eq!(outcome.record.get("phone_number"), Some(&json!(6281234567u64)));
        assert!(!outcome.updates.phone_number);
        assert_eq!(outcome.record.text("website"), Some("https://new.id"));
        assert!(outcome.updates.website);
    }

    #[test]
    fn test_description_only_grows() {
        let original = record(json!({ "business_description": "A long and detailed description." }));

        let shorter = merge(&original, &payload(json!({ "enhanced_description": "Short." })), now());
        assert_eq!(
            shorter.record.text("business_description"),
            Some("A long and detailed description.")
        );
        assert!(!shorter.updates.description);

        let same_len = "x".repeat("A long and detailed description.".len());
        let tie = merge(&original, &payload(json!({ "enhanced_description": same_len })), now());
        assert!(!tie.updates.description);

        let longer = merge(
            &original,
            &payload(json!({ "enhanced_description": "A long and detailed description, now longer." })),
            now(),
        );
        assert!(longer.updates.description);
    }

    #[test]
    fn test_opening_hours_fill_only_when_missing() {
        let hours = json!([{ "day": "Monday", "hours": "7 AM to 7 PM" }]);

        let empty = record(json!({ "opening_hours": "[]" }));
        let filled = merge(&empty, &payload(json!({ "enhanced_opening_hours": hours })), now());
        let expected = serde_json::to_string(&[DayHours {
            day: "Monday".into(),
            hours: "7 AM to 7 PM".into(),
        }])
        .unwrap();
        assert_eq!(filled.record.text("opening_hours"), Some(expected.as_str()));
        assert!(filled.updates.opening_hours);

        let existing = record(json!({ "opening_hours": "Daily 6am-8pm" }));
        let kept = merge(&existing, &payload(json!({ "enhanced_opening_hours": hours })), now());
        assert_eq!(kept.record.text("opening_hours"), Some("Daily 6am-8pm"));
        assert!(!kept.updates.opening_hours);

        let no_reply_hours = merge(&empty, &payload(json!({ "enhanced_opening_hours": [] })), now());
        assert_eq!(no_reply_hours.record.text("opening_hours"), Some("[]"));
    }

    #[test]
    fn test_booleans_fall_back() {
        let original = record(json!({ "meditation_offered": true }));

        let no_reply = merge(&original, &EnhancementPayload::default(), now());
        assert_eq!(no_reply.record.get("meditation_offered"), Some(&json!(true)));
        assert_eq!(no_reply.record.get("teacher_training"), Some(&json!(false)));

        let reply = payload(json!({ "meditation_offered": false, "teacher_training": true }));
        let overridden = merge(&original, &reply, now());
        assert_eq!(overridden.record.get("meditation_offered"), Some(&json!(false)));
        assert_eq!(overridden.record.get("teacher_training"), Some(&json!(true)));
    }

    #[test]
    fn test_pricing_overwritten_when_supplied() {
        let original = record(json!({ "drop_in_price_usd": 10, "price_range": "budget" }));

        let untouched = merge(&original, &payload(json!({ "drop_in_price_usd": null })), now());
        assert_eq!(untouched.record.get("drop_in_price_usd"), Some(&json!(10)));
        assert_eq!(untouched.record.text("price_range"), Some("budget"));

        let reply = payload(json!({ "drop_in_price_usd": 15, "price_range": "mid-range" }));
        let updated = merge(&original, &reply, now());
        assert_eq!(updated.record.get("drop_in_price_usd"), Some(&json!(15)));
        assert_eq!(updated.record.text("price_range"), Some("mid-range"));
    }

    #[test]
    fn test_lists_replaced_when_reply_non_empty() {
        let original = record(json!({ "amenities": "[\"Mats\"]", "languages_spoken": ["English"] }));
        let reply = payload(json!({
            "enhanced_amenities": ["Mats", "Showers", "Cafe"],
            "enhanced_languages": []
        }));

        let outcome = merge(&original, &reply, now());

        assert_eq!(outcome.record.get("amenities"), Some(&json!(["Mats", "Showers", "Cafe"])));
        assert_eq!(outcome.record.get("languages_spoken"), Some(&json!(["English"])));
        assert!(outcome.updates.amenities);
        assert!(!outcome.updates.languages);
    }

    #[test]
    fn test_unrelated_fields_untouched() {
        let original = record(json!({ "name": "Keep", "google_place_id": "abc", "review_score": 4.2 }));
        let outcome = merge(&original, &EnhancementPayload::default(), now());
        assert_eq!(outcome.record.text("name"), Some("Keep"));
        assert_eq!(outcome.record.text("google_place_id"), Some("abc"));
        assert_eq!(outcome.record.get("review_score"), Some(&json!(4.2)));
        assert_eq!(outcome.record.get("ai_enhancement_confidence"), Some(&json!(0)));
    }
}
