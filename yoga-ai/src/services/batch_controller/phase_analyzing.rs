//! ANALYZING: score every record and summarize current data quality

use crate::models::BusinessRecord;
use crate::services::completeness_scorer::ScoreBreakdown;
use crate::services::cost::projected_cost_range;
use serde::Serialize;

/// Records with a field present, and their share of the dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Coverage {
    pub count: usize,
    pub percent: f64,
}

impl Coverage {
    fn of(count: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        Self { count, percent }
    }
}

/// Completeness report shown before the operator confirms a run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletenessReport {
    pub total_businesses: usize,
    /// Mean completeness score, 0 for an empty dataset
    pub average_score: f64,
    pub needing_enhancement: Coverage,
    pub websites: Coverage,
    pub opening_hours: Coverage,
    pub yoga_styles: Coverage,
    pub descriptions: Coverage,
    pub phone_numbers: Coverage,
    pub projected_cost_low: f64,
    pub projected_cost_high: f64,
    pub max_cost: f64,
}

impl CompletenessReport {
    pub fn from_records(records: &[BusinessRecord], threshold: u8, max_cost: f64) -> Self {
        let total = records.len();
        let mut score_sum = 0u64;
        let mut needing = 0;
        let (mut websites, mut hours, mut styles, mut descriptions, mut phones) = (0, 0, 0, 0, 0);

        for record in records {
            let profile = record.profile();
            let breakdown = ScoreBreakdown::from_profile(&profile);
            let score = breakdown.total();
            tracing::debug!(
                business = %record.display_name(),
                score,
                breakdown = ?breakdown,
                "Completeness score"
            );
            score_sum += u64::from(score);
            if score < threshold {
                needing += 1;
            }

            websites += profile.website.is_some() as usize;
            hours += profile.opening_hours.is_present() as usize;
            styles += !profile.yoga_styles.is_empty() as usize;
            descriptions += profile.description.is_some() as usize;
            phones += profile.phone_number.is_some() as usize;
        }

        let average_score = if total == 0 {
            0.0
        } else {
            score_sum as f64 / total as f64
        };
        let (projected_cost_low, projected_cost_high) = projected_cost_range(needing);

        Self {
            total_businesses: total,
            average_score,
            needing_enhancement: Coverage::of(needing, total),
            websites: Coverage::of(websites, total),
            opening_hours: Coverage::of(hours, total),
            yoga_styles: Coverage::of(styles, total),
            descriptions: Coverage::of(descriptions, total),
            phone_numbers: Coverage::of(phones, total),
            projected_cost_low,
            projected_cost_high,
            max_cost,
        }
    }

    pub fn display_lines(&self) -> Vec<String> {
        let coverage = |label: &str, c: &Coverage| {
            format!("   Businesses with {}: {} ({:.1}%)", label, c.count, c.percent)
        };

        vec![
            format!("Total yoga businesses: {}", self.total_businesses),
            format!("Average completeness: {:.1}%", self.average_score),
            format!(
                "Businesses needing enhancement: {} ({:.1}%)",
                self.needing_enhancement.count, self.needing_enhancement.percent
            ),
            "Current data quality:".to_string(),
            coverage("websites", &self.websites),
            coverage("opening hours", &self.opening_hours),
            coverage("yoga styles", &self.yoga_styles),
            coverage("descriptions", &self.descriptions),
            coverage("phone numbers", &self.phone_numbers),
            "Estimated costs:".to_string(),
            format!("   Minimum: ${:.2}", self.projected_cost_low),
            format!("   Maximum: ${:.2}", self.projected_cost_high),
            format!("   Your limit: ${:.2}", self.max_cost),
        ]
    }
}
