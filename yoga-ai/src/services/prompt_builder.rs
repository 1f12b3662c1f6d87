//! Enhancement prompt construction
//!
//! Deterministic: the same record always yields the same prompt text. The
//! prompt restates every known field, pins the exact reply schema, adds
//! regional context, and asks for JSON only.

use crate::models::BusinessProfile;

/// System instruction sent with every request
pub const SYSTEM_INSTRUCTION: &str = "You are an expert at extracting and enhancing yoga business information in Bali. Always return valid JSON.";

const DEFAULT_NAME: &str = "Unknown Business";
const DEFAULT_CATEGORY: &str = "Yoga studio";

const RESPONSE_SCHEMA: &str = r#"{
    "enhanced_yoga_styles": ["list of yoga styles offered, e.g., Hatha, Vinyasa, Yin, etc."],
    "enhanced_amenities": ["specific amenities offered, e.g., mats, showers, pool, etc."],
    "enhanced_languages": ["languages spoken by instructors, e.g., English, Indonesian, etc."],
    "enhanced_description": "professional 1-2 sentence business description",
    "enhanced_opening_hours": [{"day": "Monday", "hours": "7 AM to 7 PM"}, ...] or null if unknown,
    "enhanced_phone_number": "phone number in international format or null if unknown",
    "enhanced_website": "website URL or null if unknown",
    "enhanced_email": "email address or null if unknown",
    "meditation_offered": true/false,
    "teacher_training": true/false,
    "drop_in_price_usd": 15 (approximate drop-in class price in USD or null),
    "price_range": "budget/mid-range/luxury",
    "confidence_score": 85
}"#;

const RULES: &[&str] = &[
    "For yoga styles: Be specific (not just \"yoga\" but actual styles taught)",
    "For amenities: Include physical facilities and services",
    "For languages: Focus on languages used for instruction",
    "For description: Create a professional, accurate description",
    "Only include information you're confident about",
    "If no additional info can be inferred, return null or empty arrays",
    "Confidence score: 0-100 based on how certain you are about the enhancements",
    "For opening hours: Use the format shown above with day and hours",
    "For price: Estimate based on location and amenities if unknown",
];

const REGIONAL_CONTEXT: &[&str] = &[
    "Ubud is known as Bali's yoga hub with many studios and retreats",
    "Canggu and Seminyak are popular beach areas with yoga studios",
    "Many studios offer teacher training programs",
    "Common amenities include mats, props, showers, and cafes",
    "Typical drop-in prices range from $8-20 USD",
    "Many studios offer both group and private classes",
];

/// Build the user prompt for one business
pub fn build_prompt(profile: &BusinessProfile) -> String {
    let text = |v: &Option<String>| v.as_deref().unwrap_or_default().to_string();

    let details = [
        format!("Name: {}", profile.name.as_deref().unwrap_or(DEFAULT_NAME)),
        format!("Category: {}", profile.category.as_deref().unwrap_or(DEFAULT_CATEGORY)),
        format!("Location: {}, {}, Bali", text(&profile.address), text(&profile.city)),
        format!("Website: {}", text(&profile.website)),
        format!("Current Description: {}", text(&profile.description)),
        format!("Current Yoga Styles: {:?}", profile.yoga_styles),
        format!("Current Amenities: {:?}", profile.amenities),
        format!("Current Languages: {:?}", profile.languages),
        format!("Current Opening Hours: {}", profile.opening_hours.describe()),
        format!("Current Phone: {}", text(&profile.phone_number)),
        format!("Current Email: {}", text(&profile.email_address)),
        format!("Instagram: {}", text(&profile.instagram_url)),
        format!("Facebook: {}", text(&profile.facebook_url)),
    ];
    let details: String = details.iter().map(|line| format!("- {}\n", line)).collect();

    let rules: String = RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {}\n", i + 1, rule))
        .collect();
    let context: String = REGIONAL_CONTEXT.iter().map(|hint| format!("- {}\n", hint)).collect();

    format!(
        "You are analyzing a yoga business in Bali to extract and enhance information.\n\n\
         BUSINESS DETAILS:\n{details}\n\
         TASK: Enhance and expand this yoga business's information. \
         Use the existing data as context but improve and add to it.\n\n\
         Please return ONLY valid JSON in this exact format:\n\
         {RESPONSE_SCHEMA}\n\n\
         RULES:\n{rules}\n\
         CONTEXT ABOUT BALI YOGA SCENE:\n{context}"
    )
}
