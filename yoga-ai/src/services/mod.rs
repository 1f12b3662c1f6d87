//! Service modules for the enhancement pipeline
//!
//! - Completeness scoring and threshold filtering
//! - Prompt building, the generative service seam, and cost accounting
//! - Merge policy
//! - Dataset I/O and the batch controller

pub mod batch_controller;
pub mod completeness_scorer;
pub mod confirmation;
pub mod cost;
pub mod dataset_io;
pub mod enhancement_client;
pub mod enhancement_filter;
pub mod metadata_merger;
pub mod openai_client;
pub mod prompt_builder;
pub mod request_pacer;

pub use batch_controller::{
    analyze_dataset, Analysis, BatchConfig, BatchController, Clock, CompletenessReport, Coverage,
    RunOutcome,
};
pub use completeness_scorer::{score, ScoreBreakdown, MAX_SCORE};
pub use confirmation::{AutoConfirm, Confirmation, StdinConfirmation};
pub use cost::{CostLedger, ModelPricing, DEFAULT_MODEL};
pub use dataset_io::{default_input_path, default_output_path, load_dataset, write_dataset};
pub use enhancement_client::{parse_reply, EnhancementClient};
pub use enhancement_filter::{needs_enhancement, partition, DEFAULT_THRESHOLD};
pub use metadata_merger::{merge, MergeOutcome};
pub use openai_client::{ChatRequest, GenerativeService, OpenAiChatService, OpenAiConfig};
pub use prompt_builder::{build_prompt, SYSTEM_INSTRUCTION};
pub use request_pacer::RequestPacer;
