//! Approximate cost accounting
//!
//! Token counts are estimated as characters / 4, not measured. The ceiling
//! derived from these numbers is therefore approximate; the provider may bill
//! a different amount for the same calls.

/// Projected cost per eligible record, low end (USD)
pub const PROJECTED_COST_PER_RECORD_LOW: f64 = 0.01;
/// Projected cost per eligible record, high end (USD)
pub const PROJECTED_COST_PER_RECORD_HIGH: f64 = 0.025;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// USD per 1K tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_1k: f64,
    pub output_per_1k: f64,
}

/// Rates of [`DEFAULT_MODEL`], also used for models missing from the table
const DEFAULT_PRICING: ModelPricing = ModelPricing { input_per_1k: 0.00015, output_per_1k: 0.0006 };

const PRICING_TABLE: &[(&str, ModelPricing)] = &[
    (DEFAULT_MODEL, DEFAULT_PRICING),
    ("gpt-4o", ModelPricing { input_per_1k: 0.0025, output_per_1k: 0.01 }),
    ("gpt-4.1", ModelPricing { input_per_1k: 0.002, output_per_1k: 0.008 }),
    ("gpt-4.1-mini", ModelPricing { input_per_1k: 0.0004, output_per_1k: 0.0016 }),
    ("gpt-4.1-nano", ModelPricing { input_per_1k: 0.0001, output_per_1k: 0.0004 }),
];

/// Exact-name lookup in the pricing table
pub fn lookup_pricing(model: &str) -> Option<ModelPricing> {
    PRICING_TABLE
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, pricing)| *pricing)
}

/// Pricing for `model`, falling back to the default model's rates
pub fn pricing_for(model: &str) -> ModelPricing {
    lookup_pricing(model).unwrap_or_else(|| {
        tracing::warn!(
            model = %model,
            fallback = DEFAULT_MODEL,
            "No pricing known for model, estimating with fallback rates"
        );
        DEFAULT_PRICING
    })
}

/// Rough token count: characters / 4, rounded down
pub fn approx_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Estimated cost of one exchange
pub fn estimate_call_cost(pricing: &ModelPricing, prompt: &str, reply: &str) -> f64 {
    let input_tokens = approx_tokens(prompt) as f64;
    let output_tokens = approx_tokens(reply) as f64;
    input_tokens * pricing.input_per_1k / 1000.0 + output_tokens * pricing.output_per_1k / 1000.0
}

/// Projected (low, high) spend for `eligible` records
pub fn projected_cost_range(eligible: usize) -> (f64, f64) {
    (
        eligible as f64 * PROJECTED_COST_PER_RECORD_LOW,
        eligible as f64 * PROJECTED_COST_PER_RECORD_HIGH,
    )
}

/// Running spend for one run
///
/// Owned by the batch controller and lent to the client per call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostLedger {
    total_usd: f64,
    charged_calls: usize,
}

impl CostLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charge(&mut self, amount_usd: f64) {
        self.total_usd += amount_usd;
        self.charged_calls += 1;
    }

    pub fn total(&self) -> f64 {
        self.total_usd
    }

    pub fn charged_calls(&self) -> usize {
        self.charged_calls
    }

    /// True once spend has reached `ceiling_usd`
    pub fn has_reached(&self, ceiling_usd: f64) -> bool {
        self.total_usd >= ceiling_usd
    }
}
