//! Batch controller
//!
//! # Phase progression
//! LOADING → ANALYZING → ENHANCING → WRITING → COMPLETED
//!
//! - **LOADING**: read the input document
//! - **ANALYZING**: score every record, print the completeness report, ask
//!   for confirmation. Ends the run in `NothingToDo` or `Cancelled` without
//!   writing anything.
//! - **ENHANCING**: chunked, strictly sequential calls under a cost ceiling
//!   (see `phase_enhancing`)
//! - **WRITING**: attempted records (eligible order), then sufficient records
//!   (input order), then records skipped at the ceiling
//!
//! The cost ledger and run statistics are owned here and lent to the
//! client and merge policy per record.

use crate::error::{PipelineError, PipelineResult};
use crate::models::{BusinessRecord, OutputDocument, RunPhase, RunSession, RunStatistics};
use crate::services::confirmation::Confirmation;
use crate::services::cost::CostLedger;
use crate::services::dataset_io::{load_dataset, write_dataset};
use crate::services::enhancement_client::EnhancementClient;
use crate::services::enhancement_filter::{partition, DEFAULT_THRESHOLD};
use chrono::{DateTime, Local, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod phase_analyzing;
mod phase_enhancing;

pub use phase_analyzing::{CompletenessReport, Coverage};

pub const DEFAULT_MAX_COST_USD: f64 = 30.0;
pub const DEFAULT_CHUNK_SIZE: usize = 50;
pub const DEFAULT_REQUEST_PAUSE_MS: u64 = 500;

/// Run parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Cost ceiling in USD, checked before every call
    pub max_cost: f64,
    /// Records per chunk (at least 1)
    pub chunk_size: usize,
    pub threshold: u8,
    /// Minimum spacing between consecutive calls
    pub request_pause: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_cost: DEFAULT_MAX_COST_USD,
            chunk_size: DEFAULT_CHUNK_SIZE,
            threshold: DEFAULT_THRESHOLD,
            request_pause: Duration::from_millis(DEFAULT_REQUEST_PAUSE_MS),
        }
    }
}

/// Time source for merge timestamps and the output date
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Result of a run that got past loading
#[derive(Debug)]
pub struct RunOutcome {
    /// Final phase is always terminal
    pub session: RunSession,
    pub report: CompletenessReport,
    pub stats: RunStatistics,
    pub cost_usd: f64,
    /// Set when the output file was written
    pub output_path: Option<PathBuf>,
    /// Set when writing failed; stats are still valid
    pub write_failure: Option<PipelineError>,
}

/// Result of the LOADING and ANALYZING phases
pub struct Analysis {
    pub session: RunSession,
    pub records: Vec<BusinessRecord>,
    pub report: CompletenessReport,
}

/// Run LOADING and ANALYZING only
///
/// Used directly in analyze-only mode; no credentials are needed.
pub fn analyze_dataset(input: &Path, config: &BatchConfig) -> PipelineResult<Analysis> {
    let mut session = RunSession::new();
    tracing::info!(run_id = %session.run_id, input = %input.display(), "Phase 1: LOADING");

    let records = match load_dataset(input) {
        Ok(records) => records,
        Err(e) => {
            session.transition_to(RunPhase::Failed);
            return Err(e);
        }
    };

    session.transition_to(RunPhase::Analyzing);
    tracing::info!(run_id = %session.run_id, "Phase 2: ANALYZING");

    let report = CompletenessReport::from_records(&records, config.threshold, config.max_cost);
    for line in report.display_lines() {
        println!("{}", line);
    }

    Ok(Analysis {
        session,
        records,
        report,
    })
}

/// Sequential enhancement pipeline
pub struct BatchController {
    client: EnhancementClient,
    confirmation: Box<dyn Confirmation>,
    config: BatchConfig,
    clock: Clock,
}

impl BatchController {
    pub fn new(
        client: EnhancementClient,
        confirmation: Box<dyn Confirmation>,
        config: BatchConfig,
    ) -> Self {
        Self {
            client,
            confirmation,
            config,
            clock: Box::new(Utc::now),
        }
    }

    /// Replace the system clock
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Execute the complete run
    ///
    /// Only a missing or unreadable input is an error here; a failed write
    /// is reported through [`RunOutcome::write_failure`] so the statistics
    /// can still be shown.
    pub async fn run(&self, input: &Path, output: &Path) -> PipelineResult<RunOutcome> {
        let Analysis {
            mut session,
            records,
            report,
        } = analyze_dataset(input, &self.config)?;

        let terminal = |session: RunSession, report: CompletenessReport| RunOutcome {
            session,
            report,
            stats: RunStatistics::default(),
            cost_usd: 0.0,
            output_path: None,
            write_failure: None,
        };

        let (eligible, sufficient) = partition(records, self.config.threshold);

        if eligible.is_empty() {
            tracing::info!("All businesses meet the completeness threshold");
            session.transition_to(RunPhase::NothingToDo);
            return Ok(terminal(session, report));
        }

        tracing::info!(eligible = eligible.len(), "Ready to enhance businesses");
        if !self
            .confirmation
            .confirm(report.projected_cost_low, report.projected_cost_high)
        {
            tracing::info!("Enhancement cancelled by operator");
            session.transition_to(RunPhase::Cancelled);
            return Ok(terminal(session, report));
        }

        session.transition_to(RunPhase::Enhancing);
        let mut ledger = CostLedger::new();
        let mut stats = RunStatistics::default();
        let (attempted, skipped) = self
            .phase_enhancing(&session, eligible, &mut ledger, &mut stats)
            .await;

        session.transition_to(RunPhase::Writing);
        tracing::info!(run_id = %session.run_id, output = %output.display(), "Phase 4: WRITING");

        let mut businesses = attempted;
        businesses.extend(sufficient);
        businesses.extend(skipped);

        let generated_on = (self.clock)().with_timezone(&Local).date_naive();
        let document = OutputDocument::new(
            businesses,
            stats.clone(),
            ledger.total(),
            session.run_id,
            generated_on,
        );

        let (output_path, write_failure) = match write_dataset(output, &document) {
            Ok(()) => {
                session.transition_to(RunPhase::Completed);
                (Some(output.to_path_buf()), None)
            }
            Err(e) => {
                tracing::error!("{}", e);
                session.transition_to(RunPhase::Failed);
                (None, Some(e))
            }
        };

        tracing::info!(
            run_id = %session.run_id,
            elapsed_seconds = session.elapsed_seconds(),
            cost_usd = ledger.total(),
            "Run finished"
        );

        Ok(RunOutcome {
            session,
            report,
            stats,
            cost_usd: ledger.total(),
            output_path,
            write_failure,
        })
    }
}
