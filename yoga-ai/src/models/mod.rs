//! Data models for yoga-ai
//!
//! - Business records and their normalized profile view
//! - Enhancement reply payload
//! - Run statistics and the run state machine
//! - Input/output dataset documents

pub mod business_record;
pub mod dataset;
pub mod enhancement;
pub mod run_session;
pub mod run_statistics;

pub use business_record::{
    decode_list, encode_list, keys, BusinessProfile, BusinessRecord, DayHours, ListField,
    OpeningHours,
};
pub use dataset::{DatasetMetadata, InputDocument, OutputDocument};
pub use enhancement::EnhancementPayload;
pub use run_session::{PhaseTransition, RunPhase, RunSession};
pub use run_statistics::{FieldUpdates, RunStatistics};
