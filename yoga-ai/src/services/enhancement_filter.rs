//! Threshold filter over completeness scores

use super::completeness_scorer::score;
use crate::models::BusinessRecord;

/// Default completeness threshold
pub const DEFAULT_THRESHOLD: u8 = 70;

/// True iff the record scores below `threshold`
pub fn needs_enhancement(record: &BusinessRecord, threshold: u8) -> bool {
    score(record) < threshold
}

/// Split records into (needs enhancement, sufficient), input order preserved
pub fn partition(
    records: Vec<BusinessRecord>,
    threshold: u8,
) -> (Vec<BusinessRecord>, Vec<BusinessRecord>) {
    records
        .into_iter()
        .partition(|record| needs_enhancement(record, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> BusinessRecord {
        serde_json::from_value(value).unwrap()
    }

    fn samples() -> Vec<BusinessRecord> {
        vec![
            BusinessRecord::new().with("name", "Empty"),
            record(json!({ "name": "Web", "website": "https://w.id" })),
            record(json!({
                "name": "Rich",
                "website": "https://r.id",
                "opening_hours": "Daily",
                "phone_number": "+62",
                "review_score": 4.5,
                "yoga_styles": ["Hatha", "Yin", "Vinyasa"],
                "amenities": ["Mats"]
            })),
        ]
    }

    #[test]
    fn test_default_threshold() {
        let s = samples();
        assert!(needs_enhancement(&s[0], DEFAULT_THRESHOLD));
        assert!(needs_enhancement(&s[1], DEFAULT_THRESHOLD));
        // 15 + 15 + 10 + 10 + 15 + 5 = 70, not below 70
        assert!(!needs_enhancement(&s[2], DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_threshold_zero_selects_nothing() {
        assert!(samples().iter().all(|r| !needs_enhancement(r, 0)));
    }

    #[test]
    fn test_raising_threshold_only_adds_records() {
        let s = samples();
        for low in 0..=100u8 {
            for high in low..=100u8 {
                for r in &s {
                    if needs_enhancement(r, low) {
                        assert!(needs_enhancement(r, high), "threshold {low} -> {high}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_partition_preserves_order() {
        let (needs, sufficient) = partition(samples(), DEFAULT_THRESHOLD);
        let names: Vec<&str> = needs.iter().map(|r| r.display_name()).collect();
        assert_eq!(names, ["Empty", "Web"]);
        assert_eq!(sufficient.len(), 1);
        assert_eq!(sufficient[0].display_name(), "Rich");
    }
}
