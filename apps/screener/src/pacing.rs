//! Call pacing for rate-limited LLM quotas.

use std::time::Duration;

use tokio::time::{sleep, sleep_until, Instant};
use tracing::debug;

/// Keeps successive calls at least `interval` apart.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Waits until `interval` has passed since the previous `ready`.
    /// The first call never waits.
    pub async fn ready(&mut self) {
        if let Some(last) = self.last {
            let due = last + self.interval;
            if due > Instant::now() {
                debug!(
                    "pacing: waiting {}ms",
                    due.saturating_duration_since(Instant::now()).as_millis()
                );
                sleep_until(due).await;
            }
        }
        self.last = Some(Instant::now());
    }

    /// Sleeps for the full interval regardless of history.
    pub async fn pause(&self) {
        if !self.interval.is_zero() {
            sleep(self.interval).await;
        }
    }
}
