//! ENHANCING: chunked calls under the cost ceiling
//!
//! The ceiling is checked before every call. Once spend has reached it, the
//! current record and every eligible record not yet attempted pass through
//! unmodified and are counted as not processed. One call is in flight at a
//! time.

use super::BatchController;
use crate::error::EnhanceError;
use crate::models::{BusinessRecord, RunSession, RunStatistics};
use crate::services::cost::CostLedger;
use crate::services::metadata_merger::merge;
use crate::services::request_pacer::RequestPacer;

impl BatchController {
    /// Phase 3: ENHANCING
    ///
    /// Returns (attempted records in eligible order, records skipped at the
    /// ceiling). Every eligible record ends up in exactly one of the two.
    pub(super) async fn phase_enhancing(
        &self,
        session: &RunSession,
        eligible: Vec<BusinessRecord>,
        ledger: &mut CostLedger,
        stats: &mut RunStatistics,
    ) -> (Vec<BusinessRecord>, Vec<BusinessRecord>) {
        let chunk_size = self.config.chunk_size.max(1);
        let max_cost = self.config.max_cost;
        let total_chunks = eligible.len().div_ceil(chunk_size);

        tracing::info!(
            run_id = %session.run_id,
            eligible = eligible.len(),
            chunks = total_chunks,
            max_cost_usd = max_cost,
            "Phase 3: ENHANCING"
        );

        let mut pacer = RequestPacer::new(self.config.request_pause);
        let mut attempted = Vec::with_capacity(eligible.len());
        let mut skipped = Vec::new();
        let mut remaining = eligible.into_iter();

        'chunks: for chunk_number in 1..=total_chunks {
            let chunk: Vec<BusinessRecord> = remaining.by_ref().take(chunk_size).collect();
            let chunk_start_cost = ledger.total();

            tracing::info!(
                chunk = chunk_number,
                of = total_chunks,
                records = chunk.len(),
                current_cost_usd = ledger.total(),
                max_cost_usd = max_cost,
                "Processing chunk"
            );

            let chunk_len = chunk.len();
            let mut records = chunk.into_iter().enumerate();
            while let Some((index, record)) = records.next() {
                if ledger.has_reached(max_cost) {
                    skipped.push(record);
                    skipped.extend(records.by_ref().map(|(_, r)| r));
                    skipped.extend(remaining.by_ref());
                    stats.record_not_processed(skipped.len());

                    tracing::warn!(
                        max_cost_usd = max_cost,
                        spent_usd = ledger.total(),
                        not_processed = skipped.len(),
                        "Cost limit reached, remaining businesses pass through unmodified"
                    );
                    log_chunk_cost(chunk_number, chunk_start_cost, ledger);
                    break 'chunks;
                }

                tracing::info!(
                    "[{}/{}] Enhancing: {}",
                    index + 1,
                    chunk_len,
                    record.display_name()
                );

                pacer.wait().await;
                let processed = self.enhance_one(record, ledger, stats).await;
                attempted.push(processed);
            }

            log_chunk_cost(chunk_number, chunk_start_cost, ledger);
        }

        (attempted, skipped)
    }

    /// One attempt; the original record is kept on any failure
    async fn enhance_one(
        &self,
        record: BusinessRecord,
        ledger: &mut CostLedger,
        stats: &mut RunStatistics,
    ) -> BusinessRecord {
        match self.client.enhance(&record, ledger).await {
            Ok(payload) => {
                let outcome = merge(&record, &payload, (self.clock)());
                stats.record_success(&outcome.updates);
                tracing::info!(
                    business = %record.display_name(),
                    fields_updated = outcome.updates.count(),
                    confidence = payload.confidence(),
                    "Enhanced successfully"
                );
                outcome.record
            }
            Err(e) => {
                match &e {
                    EnhanceError::ParseFailure(_) => stats.record_parse_failure(),
                    EnhanceError::ServiceFailure(_) => stats.record_service_failure(),
                }
                tracing::warn!(
                    business = %record.display_name(),
                    error = %e,
                    "Enhancement failed, keeping original"
                );
                record
            }
        }
    }
}

fn log_chunk_cost(chunk_number: usize, chunk_start_cost: f64, ledger: &CostLedger) {
    tracing::info!(
        chunk = chunk_number,
        chunk_cost_usd = ledger.total() - chunk_start_cost,
        total_cost_usd = ledger.total(),
        "Chunk finished"
    );
}
