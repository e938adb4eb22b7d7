// Telemetry records: per-acquisition samples and their averaged reduction.

mod average;
mod sample;
mod ssid;

pub use average::{Average, SignalTier};
pub use sample::{Sample, SnrSource};
pub use ssid::{MAX_SSID_LEN, Ssid};
