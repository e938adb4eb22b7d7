// Error taxonomy for acquisition, aggregation, rendering and a whole run.

use thiserror::Error;

/// A provider could not produce a sample. Recorded by omission in the sampling loop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoSignal {
    #[error("no wireless adapter available: {0}")]
    NoAdapter(String),
    #[error("adapter is not associated with a network")]
    NotAssociated,
    #[error("link query failed: {0}")]
    QueryFailed(String),
}

/// The aggregator was handed zero samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot average an empty sample sequence")]
pub struct EmptyInput;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Output buffer growth failed; the partial buffer has been released.
    #[error("failed to grow output buffer to {requested} bytes")]
    AllocationFailure { requested: usize },
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("missing {0} sentinel line")]
    MissingSentinel(&'static str),
    #[error("unknown collection_type {0:?}")]
    UnknownCollectionType(String),
    #[error("total_samples is {declared} but the document holds {actual} samples")]
    CountMismatch { declared: usize, actual: usize },
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RunError {
    /// No sample could be captured for an averaged run.
    #[error("failed to capture base signal data: {0}")]
    CaptureFailed(#[from] EmptyInput),
    #[error(transparent)]
    Report(#[from] ReportError),
}
