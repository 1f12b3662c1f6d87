//! Test Helper Utilities
//!
//! Shared utilities for testing yoga-ai

#![allow(dead_code)]

pub mod fixtures;
pub mod log_capture;
pub mod scripted_service;

pub use fixtures::{
    complete_record, fixed_clock, fixed_now, read_output, sparse_record, test_config,
    write_input,
};
pub use log_capture::{capture_logs, LogCapture};
pub use scripted_service::{call_cost, ScriptedConfirmation, ScriptedService};
