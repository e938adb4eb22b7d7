// Averaged snapshot over one monitoring session, and its qualitative tier.

use serde::{Deserialize, Serialize};

use super::{SnrSource, Ssid};

/// Integer (truncating) means over a non-empty sample sequence.
/// Name, frequency and channel come from the first sample; percentages are
/// derived from the mean dBm values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Average {
    #[serde(rename = "ssid")]
    pub network_name: Ssid,
    pub sample_count: usize,
    pub frequency_khz: u32,
    pub channel: u32,
    pub signal_strength_dbm: i32,
    pub link_quality: i32,
    pub snr_db: i32,
    pub noise_floor_dbm: i32,
    pub signal_percent: i32,
    pub noise_percent: i32,
    #[serde(default)]
    pub snr_source: SnrSource,
}

impl Average {
    pub fn tier(&self) -> SignalTier {
        SignalTier::from_percent(self.signal_percent)
    }
}

/// Qualitative signal tier over `signal_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalTier {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl SignalTier {
    pub fn from_percent(percent: i32) -> Self {
        match percent {
            85.. => SignalTier::Excellent,
            70..=84 => SignalTier::Good,
            50..=69 => SignalTier::Fair,
            30..=49 => SignalTier::Poor,
            _ => SignalTier::VeryPoor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SignalTier::Excellent => "Excellent",
            SignalTier::Good => "Good",
            SignalTier::Fair => "Fair",
            SignalTier::Poor => "Poor",
            SignalTier::VeryPoor => "Very Poor",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            SignalTier::Excellent | SignalTier::Good => "[+]",
            SignalTier::Fair => "[~]",
            SignalTier::Poor => "[-]",
            SignalTier::VeryPoor => "[!]",
        }
    }

    /// Rough proximity to the access point.
    pub fn proximity(self) -> &'static str {
        match self {
            SignalTier::Excellent => "Very close",
            SignalTier::Good => "Close proximity",
            SignalTier::Fair => "Medium distance",
            SignalTier::Poor => "Far distance",
            SignalTier::VeryPoor => "Very far",
        }
    }
}
