//! Completeness scoring
//!
//! Weighted presence rubric over a record's fields, 0-100:
//!
//! | Field          | Condition                       | Points     |
//! |----------------|---------------------------------|------------|
//! | website        | non-empty                       | 15         |
//! | opening hours  | present, not the `[]` marker    | 15         |
//! | phone number   | non-empty                       | 10         |
//! | review score   | not null                        | 10         |
//! | yoga styles    | ≥3 / ≥1 entries                 | 15 / 10    |
//! | description    | >150 / >75 / >25 chars          | 15 / 10 / 5|
//! | amenities      | ≥3 / ≥1 entries                 | 10 / 5     |
//! | languages      | ≥1 entry                        | 5          |
//! | social links   | instagram and facebook / either | 5 / 3      |
//!
//! Pure logic, no side effects. The total is capped at 100.

use crate::models::{BusinessProfile, BusinessRecord};

/// Maximum score
pub const MAX_SCORE: u8 = 100;

/// Per-field points for one record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub website: u8,
    pub opening_hours: u8,
    pub phone_number: u8,
    pub review_score: u8,
    pub yoga_styles: u8,
    pub description: u8,
    pub amenities: u8,
    pub languages: u8,
    pub social: u8,
}

impl ScoreBreakdown {
    pub fn from_profile(profile: &BusinessProfile) -> Self {
        Self {
            website: if profile.website.is_some() { 15 } else { 0 },
            opening_hours: if profile.opening_hours.is_present() { 15 } else { 0 },
            phone_number: if profile.phone_number.is_some() { 10 } else { 0 },
            review_score: if profile.has_review_score { 10 } else { 0 },
            yoga_styles: tiered(profile.yoga_styles.len(), &[(3, 15), (1, 10)]),
            description: match profile.description_len() {
                n if n > 150 => 15,
                n if n > 75 => 10,
                n if n > 25 => 5,
                _ => 0,
            },
            amenities: tiered(profile.amenities.len(), &[(3, 10), (1, 5)]),
            languages: tiered(profile.languages.len(), &[(1, 5)]),
            social: match (profile.instagram_url.is_some(), profile.facebook_url.is_some()) {
                (true, true) => 5,
                (true, false) | (false, true) => 3,
                (false, false) => 0,
            },
        }
    }

    /// Sum of all fields, capped at [`MAX_SCORE`]
    pub fn total(&self) -> u8 {
        let sum: u32 = [
            self.website,
            self.opening_hours,
            self.phone_number,
            self.review_score,
            self.yoga_styles,
            self.description,
            self.amenities,
            self.languages,
            self.social,
        ]
        .iter()
        .map(|p| u32::from(*p))
        .sum();
        sum.min(u32::from(MAX_SCORE)) as u8
    }
}

/// First tier whose minimum count is met
fn tiered(count: usize, tiers: &[(usize, u8)]) -> u8 {
    tiers
        .iter()
        .find(|(min, _)| count >= *min)
        .map_or(0, |(_, points)| *points)
}

/// Completeness score of a record
pub fn score(record: &BusinessRecord) -> u8 {
    score_profile(&record.profile())
}

/// Completeness score of an already-normalized profile
pub fn score_profile(profile: &BusinessProfile) -> u8 {
    ScoreBreakdown::from_profile(profile).total()
}
