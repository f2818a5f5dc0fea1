//! Progress reporting for pending jobs.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// One pending iteration of a poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// 1-based attempt number that returned a pending status.
    pub attempt: u32,

    /// Time covered by the attempts so far (`attempt * interval`).
    pub elapsed: Duration,

    /// Display label, e.g. `"Creating... (3s)"`.
    pub message: String,
}

/// Receives progress while a job is pending.
///
/// Observers only report; they never influence the poll outcome.
#[async_trait]
pub trait ProgressObserver: Send + Sync {
    async fn on_progress(&self, update: ProgressUpdate);
}

/// Observer that discards every update.
pub struct NoopObserver;

#[async_trait]
impl ProgressObserver for NoopObserver {
    async fn on_progress(&self, _update: ProgressUpdate) {}
}

/// Observer that keeps every update, for inspection after the poll.
#[derive(Default)]
pub struct RecordingObserver {
    updates: Mutex<Vec<ProgressUpdate>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates
            .lock()
            .map(|updates| updates.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProgressObserver for RecordingObserver {
    async fn on_progress(&self, update: ProgressUpdate) {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(update);
        }
    }
}

/// Format an elapsed duration the way the loading screen shows it.
///
/// Whole seconds print as `"3s"`, anything else with one decimal (`"1.5s"`).
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.subsec_millis() == 0 {
        format!("{}s", elapsed.as_secs())
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}
