//! Dataset documents (input and output shapes)

use super::business_record::BusinessRecord;
use super::run_statistics::RunStatistics;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const OUTPUT_SOURCE: &str = "Bali Yoga Studios & Retreats AI Enhancement";
pub const OUTPUT_DESCRIPTION: &str =
    "AI-enhanced dataset of yoga studios and retreat centers in Bali";

/// Input document; other top-level keys are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputDocument {
    #[serde(default)]
    pub businesses: Vec<BusinessRecord>,
}

/// Output document metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub total_businesses: usize,
    /// `YYYY-MM-DD`
    pub generation_date: String,
    pub source: String,
    pub description: String,
    /// Key count of the first record (0 when empty)
    pub columns: usize,
    pub enhancement_stats: RunStatistics,
    /// Approximate spend, see `services::cost`
    pub enhancement_cost_usd: f64,
    pub run_id: Uuid,
}

/// Output document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDocument {
    pub metadata: DatasetMetadata,
    pub businesses: Vec<BusinessRecord>,
}

impl OutputDocument {
    pub fn new(
        businesses: Vec<BusinessRecord>,
        stats: RunStatistics,
        cost_usd: f64,
        run_id: Uuid,
        generated_on: NaiveDate,
    ) -> Self {
        let columns = businesses.first().map_or(0, BusinessRecord::field_count);
        Self {
            metadata: DatasetMetadata {
                total_businesses: businesses.len(),
                generation_date: generated_on.format("%Y-%m-%d").to_string(),
                source: OUTPUT_SOURCE.to_string(),
                description: OUTPUT_DESCRIPTION.to_string(),
                columns,
                enhancement_stats: stats,
                enhancement_cost_usd: cost_usd,
                run_id,
            },
            businesses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_counts() {
        let records = vec![
            BusinessRecord::new().with("name", "A").with("city", "Ubud"),
            BusinessRecord::new().with("name", "B"),
        ];
        let doc = OutputDocument::new(
            records,
            RunStatistics::default(),
            0.5,
            Uuid::nil(),
            NaiveDate::from_ymd_opt(2025, 8, 14).unwrap(),
        );
        assert_eq!(doc.metadata.total_businesses, 2);
        assert_eq!(doc.metadata.columns, 2);
        assert_eq!(doc.metadata.generation_date, "2025-08-14");
    }

    #[test]
    fn test_empty_output_has_zero_columns() {
        let doc = OutputDocument::new(
            Vec::new(),
            RunStatistics::default(),
            0.0,
            Uuid::nil(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        assert_eq!(doc.metadata.columns, 0);
    }

    #[test]
    fn test_input_ignores_extra_keys() {
        let doc: InputDocument =
            serde_json::from_str(r#"{"metadata": {"x": 1}, "businesses": [{"name": "A"}]}"#)
                .unwrap();
        assert_eq!(doc.businesses.len(), 1);
    }
}
