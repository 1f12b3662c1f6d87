//! Scripted collaborators for the batch controller

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use yoga_ai::models::BusinessRecord;
use yoga_ai::services::cost::{estimate_call_cost, pricing_for};
use yoga_ai::services::{build_prompt, ChatRequest, Confirmation, GenerativeService, DEFAULT_MODEL};
use yoga_ai::EnhanceError;

/// Replies with a fixed script, in order
///
/// `Err` entries become service failures. Once the script runs out every
/// call fails with "script exhausted".
#[derive(Clone, Default)]
pub struct ScriptedService {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl ScriptedService {
    pub fn new(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            requests: Arc::default(),
        }
    }

    /// Same successful reply for every call
    pub fn always(reply: &str, calls: usize) -> Self {
        Self::new(vec![Ok(reply.to_string()); calls])
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.user.clone())
            .collect()
    }
}

#[async_trait]
impl GenerativeService for ScriptedService {
    async fn complete(&self, request: &ChatRequest) -> Result<String, EnhanceError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(EnhanceError::ServiceFailure(message)),
            None => Err(EnhanceError::ServiceFailure("script exhausted".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        DEFAULT_MODEL
    }
}

/// Estimated cost the client will charge for `record` answered with `reply`
pub fn call_cost(record: &BusinessRecord, reply: &str) -> f64 {
    estimate_call_cost(&pricing_for(DEFAULT_MODEL), &build_prompt(&record.profile()), reply)
}

/// Fixed answer, remembering each projected range it was shown
#[derive(Clone)]
pub struct ScriptedConfirmation {
    answer: bool,
    asked: Arc<Mutex<Vec<(f64, f64)>>>,
}

impl ScriptedConfirmation {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Arc::default(),
        }
    }

    pub fn asked(&self) -> Vec<(f64, f64)> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirmation for ScriptedConfirmation {
    fn confirm(&self, low_usd: f64, high_usd: f64) -> bool {
        self.asked.lock().unwrap().push((low_usd, high_usd));
        self.answer
    }
}
