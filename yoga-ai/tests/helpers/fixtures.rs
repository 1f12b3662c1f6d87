//! Record builders and dataset files

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;
use yoga_ai::models::BusinessRecord;
use yoga_ai::services::{BatchConfig, Clock};

/// Name and address only; scores 0
pub fn sparse_record(name: &str) -> BusinessRecord {
    BusinessRecord::new()
        .with("name", name)
        .with("address", "Jl. Raya Ubud No. 1")
}

/// Scores 100
pub fn complete_record(name: &str) -> BusinessRecord {
    serde_json::from_value(json!({
        "name": name,
        "category_name": "Yoga studio",
        "address": "Jl. Pantai Berawa",
        "city": "Canggu",
        "website": "https://example.id",
        "phone_number": "+62 361 000000",
        "review_score": 4.8,
        "opening_hours": [{ "day": "Monday", "hours": "7 AM to 8 PM" }],
        "yoga_styles": ["Hatha", "Vinyasa", "Yin"],
        "business_description": "x".repeat(200),
        "amenities": "[\"Mats\", \"Showers\", \"Cafe\"]",
        "languages_spoken": ["English"],
        "instagram_url": "https://instagram.com/example",
        "facebook_url": "https://facebook.com/example"
    }))
    .unwrap()
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 14, 12, 0, 0).unwrap()
}

pub fn fixed_clock() -> Clock {
    Box::new(fixed_now)
}

/// Defaults with no pause between calls
pub fn test_config(max_cost: f64, chunk_size: usize) -> BatchConfig {
    BatchConfig {
        max_cost,
        chunk_size,
        request_pause: Duration::ZERO,
        ..BatchConfig::default()
    }
}

/// Write `{ "businesses": [...] }` into `dir`
pub fn write_input(dir: &Path, records: &[BusinessRecord]) -> PathBuf {
    let path = dir.join("input.json");
    let document = json!({
        "metadata": { "total_businesses": records.len() },
        "businesses": records,
    });
    std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}

pub fn read_output(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
