//! Enhancement client
//!
//! One attempt per record: build the prompt, send it, charge the estimated
//! cost, parse the reply. Failures come back as [`EnhanceError`] and the
//! caller keeps the original record.

use super::cost::{estimate_call_cost, pricing_for, CostLedger, ModelPricing};
use super::openai_client::{ChatRequest, GenerativeService};
use super::prompt_builder::{build_prompt, SYSTEM_INSTRUCTION};
use crate::error::EnhanceError;
use crate::models::{BusinessRecord, EnhancementPayload};
use serde_json::Value;
use std::sync::Arc;

/// Output length bound sent with every request
pub const MAX_OUTPUT_TOKENS: u32 = 800;
/// Sampling temperature sent with every request
pub const TEMPERATURE: f32 = 0.7;

/// Sends enhancement requests for single records
pub struct EnhancementClient {
    service: Arc<dyn GenerativeService>,
    pricing: ModelPricing,
}

impl EnhancementClient {
    pub fn new(service: Arc<dyn GenerativeService>) -> Self {
        let pricing = pricing_for(service.model_name());
        Self { service, pricing }
    }

    /// Request an enhancement for `record`
    ///
    /// The call's estimated cost is charged to `ledger` as soon as a reply
    /// arrives, including replies that then fail to parse.
    pub async fn enhance(
        &self,
        record: &BusinessRecord,
        ledger: &mut CostLedger,
    ) -> Result<EnhancementPayload, EnhanceError> {
        let prompt = build_prompt(&record.profile());
        let request = ChatRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            user: prompt,
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        };

        let reply = self.service.complete(&request).await?;

        let cost = estimate_call_cost(&self.pricing, &request.user, &reply);
        ledger.charge(cost);
        tracing::debug!(
            business = %record.display_name(),
            cost_usd = cost,
            running_total_usd = ledger.total(),
            "Charged enhancement call"
        );

        parse_reply(&reply)
    }
}

/// Parse a reply into the payload schema
///
/// Best effort: a surrounding Markdown code fence is tolerated and fields of
/// the wrong type are dropped. Only a reply that is not a JSON object fails.
pub fn parse_reply(reply: &str) -> Result<EnhancementPayload, EnhanceError> {
    let body = strip_code_fence(reply);
    let value: Value = serde_json::from_str(body)
        .map_err(|e| EnhanceError::ParseFailure(format!("Invalid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(EnhanceError::ParseFailure(
            "Reply is not a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| EnhanceError::ParseFailure(format!("Unreadable reply: {}", e)))
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
