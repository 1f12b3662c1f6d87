//! Enhancement run state machine
//!
//! A run progresses LOADING → ANALYZING → ENHANCING → WRITING → COMPLETED.
//! ANALYZING may end the run early (`NothingToDo`, `Cancelled`, or
//! `AnalyzedOnly`); a write failure ends it in `Failed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Enhancement run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunPhase {
    /// Reading the input document
    Loading,
    /// Scoring every record, building the completeness report
    Analyzing,
    /// Calling the generative service chunk by chunk
    Enhancing,
    /// Persisting the combined document
    Writing,
    /// Output written
    Completed,
    /// Analyze-only mode finished
    AnalyzedOnly,
    /// Every record already met the threshold
    NothingToDo,
    /// Operator declined the confirmation prompt
    Cancelled,
    /// Output could not be written
    Failed,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed | Self::AnalyzedOnly | Self::NothingToDo | Self::Cancelled | Self::Failed
        )
    }
}

/// Phase transition, returned for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub run_id: Uuid,
    pub old_phase: RunPhase,
    pub new_phase: RunPhase,
    pub transitioned_at: DateTime<Utc>,
}

/// In-memory run session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSession {
    /// Unique run identifier, also written into the output metadata
    pub run_id: Uuid,
    pub phase: RunPhase,
    pub started_at: DateTime<Utc>,
    /// Set on entering a terminal phase
    pub ended_at: Option<DateTime<Utc>>,
}

impl RunSession {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            phase: RunPhase::Loading,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// Transition to new phase
    pub fn transition_to(&mut self, new_phase: RunPhase) -> PhaseTransition {
        let transition = PhaseTransition {
            run_id: self.run_id,
            old_phase: self.phase,
            new_phase,
            transitioned_at: Utc::now(),
        };
        self.phase = new_phase;

        if new_phase.is_terminal() {
            self.ended_at = Some(transition.transitioned_at);
        }

        tracing::info!(
            run_id = %self.run_id,
            from = ?transition.old_phase,
            to = ?new_phase,
            "Run phase transition"
        );

        transition
    }

    /// Elapsed seconds, to now or to the end of the run
    pub fn elapsed_seconds(&self) -> i64 {
        let end = self.ended_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_seconds()
    }
}

impl Default for RunSession {
    fn default() -> Self {
        Self::new()
    }
}
