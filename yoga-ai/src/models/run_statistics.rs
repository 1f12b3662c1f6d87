//! Enhancement run statistics
//!
//! Counters are incremented once per record per applied field, never per
//! list item. The struct is written verbatim into the output metadata.

use serde::{Deserialize, Serialize};

/// Fields a single merge actually changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldUpdates {
    pub yoga_styles: bool,
    pub amenities: bool,
    pub languages: bool,
    pub description: bool,
    pub opening_hours: bool,
    pub phone_number: bool,
    pub website: bool,
    pub email: bool,
}

impl FieldUpdates {
    pub fn count(&self) -> usize {
        [
            self.yoga_styles,
            self.amenities,
            self.languages,
            self.description,
            self.opening_hours,
            self.phone_number,
            self.website,
            self.email,
        ]
        .iter()
        .filter(|applied| **applied)
        .count()
    }
}

/// Process-lifetime counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub total_processed: usize,
    pub successfully_enhanced: usize,
    pub failed_enhancements: usize,
    pub parse_failures: usize,
    pub service_failures: usize,
    /// Eligible records skipped once the cost ceiling was reached
    pub not_processed: usize,
    pub yoga_styles_added: usize,
    pub amenities_added: usize,
    pub languages_added: usize,
    pub descriptions_enhanced: usize,
    pub emails_added: usize,
    pub websites_added: usize,
    pub opening_hours_added: usize,
    pub phone_numbers_added: usize,
}

impl RunStatistics {
    /// Fold one successful merge into the counters
    pub fn record_success(&mut self, updates: &FieldUpdates) {
        self.total_processed += 1;
        self.successfully_enhanced += 1;
        self.yoga_styles_added += updates.yoga_styles as usize;
        self.amenities_added += updates.amenities as usize;
        self.languages_added += updates.languages as usize;
        self.descriptions_enhanced += updates.description as usize;
        self.opening_hours_added += updates.opening_hours as usize;
        self.phone_numbers_added += updates.phone_number as usize;
        self.websites_added += updates.website as usize;
        self.emails_added += updates.email as usize;
    }

    pub fn record_parse_failure(&mut self) {
        self.total_processed += 1;
        self.failed_enhancements += 1;
        self.parse_failures += 1;
    }

    pub fn record_service_failure(&mut self) {
        self.total_processed += 1;
        self.failed_enhancements += 1;
        self.service_failures += 1;
    }

    pub fn record_not_processed(&mut self, count: usize) {
        self.not_processed += count;
    }

    /// Operator-facing summary, one line per counter
    pub fn display_lines(&self) -> Vec<String> {
        vec![
            format!("Total businesses processed: {}", self.total_processed),
            format!("Successfully enhanced: {}", self.successfully_enhanced),
            format!(
                "Failed enhancements: {} ({} parse, {} service)",
                self.failed_enhancements, self.parse_failures, self.service_failures
            ),
            format!("Not processed (cost limit): {}", self.not_processed),
            format!("Yoga styles added/improved: {}", self.yoga_styles_added),
            format!("Amenities added/improved: {}", self.amenities_added),
            format!("Languages added/improved: {}", self.languages_added),
            format!("Descriptions enhanced: {}", self.descriptions_enhanced),
            format!("Websites added: {}", self.websites_added),
            format!("Opening hours added: {}", self.opening_hours_added),
            format!("Phone numbers added: {}", self.phone_numbers_added),
            format!("Emails added: {}", self.emails_added),
        ]
    }
}
