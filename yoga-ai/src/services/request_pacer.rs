//! Fixed minimum spacing between generative service calls

use std::time::{Duration, Instant};

/// Enforces a minimum interval between consecutive calls
///
/// The first call goes out immediately.
#[derive(Debug)]
pub struct RequestPacer {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RequestPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Sleep until `min_interval` has passed since the previous call
    pub async fn wait(&mut self) {
        if let Some(last_time) = self.last_request {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Request pacing: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        self.last_request = Some(Instant::now());
    }
}
