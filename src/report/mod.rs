// Rendering of collected data: structured document and human-readable report.
// Both are pure functions of the samples / average; each builds into its own buffer.

mod buffer;
mod document;
mod table;

pub use buffer::OutputBuffer;
pub use document::{
    Document, JSON_END, JSON_START, extract_document, parse_document, write_json_string,
};
pub use table::NO_SAMPLES;

use crate::error::ReportError;
use crate::models::{Average, Sample};

/// Renders reports, optionally capping each output at `max_bytes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    max_bytes: Option<usize>,
}

impl Renderer {
    pub fn new(max_bytes: Option<usize>) -> Self {
        Self { max_bytes }
    }

    /// `collection_type: "monitor"` document; an empty slice yields an empty `samples` list.
    pub fn monitor_document(&self, samples: &[Sample]) -> Result<Vec<u8>, ReportError> {
        document::monitor(samples, self.max_bytes)
    }

    /// `collection_type: "base"` document.
    pub fn base_document(&self, avg: &Average) -> Result<Vec<u8>, ReportError> {
        document::base(avg, self.max_bytes)
    }

    /// Sample table; an empty slice yields [`NO_SAMPLES`].
    pub fn monitor_table(
        &self,
        samples: &[Sample],
        duration_secs: u64,
    ) -> Result<Vec<u8>, ReportError> {
        table::monitor(samples, duration_secs, self.max_bytes)
    }

    pub fn base_summary(&self, avg: &Average) -> Result<Vec<u8>, ReportError> {
        table::base(avg, self.max_bytes)
    }
}
