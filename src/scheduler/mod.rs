pub mod tasks;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

type Task = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Fixed-interval background jobs on the tokio timer.
///
/// Each job first runs one full period after `start`. Missed ticks are
/// skipped rather than replayed.
pub struct Scheduler {
    pending: Vec<(String, Duration, Task)>,
    running: Vec<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            running: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Add a job that runs every `period`
    pub fn add_repeated_job<F>(&mut self, name: &str, period: Duration, task: F) -> Result<()>
    where
        F: Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static,
    {
        if period.is_zero() {
            anyhow::bail!("Job '{}' needs a non-zero period", name);
        }
        self.pending.push((name.to_string(), period, Arc::new(task)));
        info!("Scheduled task '{}' every {:?}", name, period);
        Ok(())
    }

    /// Start all added jobs
    pub fn start(&mut self) {
        for (name, period, task) in self.pending.drain(..) {
            let cancel = self.cancel.clone();
            self.running.push(tokio::spawn(async move {
                let mut ticker = interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = ticker.tick() => {
                            info!("Running scheduled task: {}", name);
                            task().await;
                        }
                    }
                }
            }));
        }
        info!("Scheduler started");
    }

    /// Cancel all jobs and wait for them to stop
    pub async fn shutdown(&mut self) {
        self.cancel.cancel();
        for handle in self.running.drain(..) {
            if let Err(e) = handle.await {
                warn!("Scheduled task ended abnormally: {}", e);
            }
        }
        info!("Scheduler stopped");
    }
}
