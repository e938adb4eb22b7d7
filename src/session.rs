// One collection run: sample, optionally average, render the enabled outputs.

use std::future::Future;

use tracing::{info, warn};

use crate::aggregate::aggregate;
use crate::config::{Mode, OutputConfig};
use crate::error::RunError;
use crate::models::{Average, Sample};
use crate::provider::LinkTelemetryProvider;
use crate::report::Renderer;
use crate::sampler::{self, Collection, SamplingPlan};

/// Data behind a finished run.
#[derive(Debug, Clone)]
pub enum Outcome {
    Monitor(Vec<Sample>),
    Base(Average),
}

/// Rendered outputs of a run. Disabled outputs are `None`.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: Mode,
    pub duration_secs: u64,
    pub attempts: usize,
    pub failures: usize,
    pub cancelled: bool,
    pub outcome: Outcome,
    pub table: Option<Vec<u8>>,
    pub document: Option<Vec<u8>>,
}

impl RunReport {
    /// Human-readable report followed by the structured document.
    ///
    /// `max_report_bytes` bounds each output when it is rendered; the
    /// concatenation is not capped again.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if let Some(table) = &self.table {
            out.extend_from_slice(table);
        }
        if let Some(document) = &self.document {
            out.extend_from_slice(document);
        }
        out
    }
}

/// Collects for `duration_secs` and renders per `output`.
///
/// Base mode fails with [`RunError::CaptureFailed`] when nothing was collected;
/// monitor mode renders an empty collection as a no-data report.
pub async fn run<P, F>(
    mode: Mode,
    duration_secs: u64,
    provider: &P,
    output: &OutputConfig,
    shutdown: F,
) -> Result<RunReport, RunError>
where
    P: LinkTelemetryProvider,
    F: Future<Output = ()>,
{
    let plan = SamplingPlan::for_duration(duration_secs);
    info!(
        mode = mode.collection_type(),
        duration_secs,
        interval_ms = plan.interval_ms,
        target_samples = plan.target_count(),
        "Starting collection"
    );

    let collection = sampler::collect_until(provider, plan, shutdown).await;
    let Collection {
        samples,
        attempts,
        failures,
        cancelled,
        ..
    } = collection;

    let renderer = Renderer::new(output.max_report_bytes);
    let (outcome, table, document) = match mode {
        Mode::Monitor => {
            if samples.is_empty() {
                warn!(attempts, "no samples collected; adapter may be unavailable or not connected");
            }
            let table = output
                .table
                .then(|| renderer.monitor_table(&samples, duration_secs))
                .transpose()?;
            let document = output
                .json
                .then(|| renderer.monitor_document(&samples))
                .transpose()?;
            (Outcome::Monitor(samples), table, document)
        }
        Mode::Base => {
            let avg = aggregate(&samples)?;
            let table = output
                .table
                .then(|| renderer.base_summary(&avg))
                .transpose()?;
            let document = output
                .json
                .then(|| renderer.base_document(&avg))
                .transpose()?;
            (Outcome::Base(avg), table, document)
        }
    };

    Ok(RunReport {
        mode,
        duration_secs,
        attempts,
        failures,
        cancelled,
        outcome,
        table,
        document,
    })
}
