// Fixed-interval sampling loop: drives a provider for a bounded window into a capacity-bounded sequence.
// Failed acquisitions are skipped; the loop still sleeps and re-measures elapsed time.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::config::{MAX_SAMPLES, SAMPLE_INTERVAL_MS};
use crate::models::Sample;
use crate::provider::LinkTelemetryProvider;

/// How long, how often and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    pub duration_secs: u64,
    pub interval_ms: u64,
    pub max_capacity: usize,
}

impl SamplingPlan {
    /// Plan with the fixed 100 ms interval and 600-sample cap.
    pub fn for_duration(duration_secs: u64) -> Self {
        Self {
            duration_secs,
            interval_ms: SAMPLE_INTERVAL_MS,
            max_capacity: MAX_SAMPLES,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    /// `duration / interval`, clamped to `max_capacity`. A zero interval counts as 1 ms.
    pub fn target_count(&self) -> usize {
        let per_window = self.duration_secs.saturating_mul(1000) / self.interval_ms.max(1);
        usize::try_from(per_window)
            .unwrap_or(usize::MAX)
            .min(self.max_capacity)
    }
}

/// Result of one run of the loop.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Time-ordered; timestamps are ms since the loop started.
    pub samples: Vec<Sample>,
    pub target_count: usize,
    pub attempts: usize,
    pub failures: usize,
    pub elapsed: Duration,
    /// Stopped early by the shutdown signal.
    pub cancelled: bool,
}

impl Collection {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Some, but fewer than the target number of samples.
    pub fn is_partial(&self) -> bool {
        !self.samples.is_empty() && self.samples.len() < self.target_count
    }

    /// Observed time per sample (interval plus acquisition latency), if any were taken.
    pub fn effective_interval_ms(&self) -> Option<u64> {
        let n = u64::try_from(self.samples.len()).ok().filter(|&n| n > 0)?;
        Some(self.elapsed.as_millis() as u64 / n)
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

/// Runs the loop to completion. Never fails; an empty collection is a valid outcome.
pub async fn collect<P: LinkTelemetryProvider>(provider: &P, plan: SamplingPlan) -> Collection {
    collect_until(provider, plan, std::future::pending()).await
}

/// As [`collect`], but `shutdown` completing during the inter-sample sleep ends the run
/// early, keeping whatever was collected.
pub async fn collect_until<P, F>(provider: &P, plan: SamplingPlan, shutdown: F) -> Collection
where
    P: LinkTelemetryProvider,
    F: Future<Output = ()>,
{
    let target_count = plan.target_count();
    let window = plan.duration();
    let interval = Duration::from_millis(plan.interval_ms);

    let mut samples = Vec::with_capacity(target_count);
    let mut attempts = 0usize;
    let mut failures = 0usize;
    let mut cancelled = false;

    tokio::pin!(shutdown);
    let start = Instant::now();

    while samples.len() < target_count {
        let elapsed = start.elapsed();
        if elapsed >= window {
            break;
        }

        attempts += 1;
        match provider.acquire().await {
            Ok(sample) => samples.push(sample.at(elapsed.as_millis() as u64)),
            Err(e) => {
                failures += 1;
                debug!(error = %e, operation = "acquire", attempt = attempts, "no sample");
            }
        }

        tokio::select! {
            _ = sleep(interval) => {}
            _ = &mut shutdown => {
                debug!("Sampling interrupted by shutdown");
                cancelled = true;
                break;
            }
        }
    }

    let collection = Collection {
        samples,
        target_count,
        attempts,
        failures,
        elapsed: start.elapsed(),
        cancelled,
    };
    info!(
        operation = "collect",
        samples = collection.samples.len(),
        target = target_count,
        attempts,
        failures,
        elapsed_ms = collection.elapsed.as_millis() as u64,
        effective_interval_ms = ?collection.effective_interval_ms(),
        cancelled,
        "Collection complete"
    );
    collection
}
