// One acquisition of link telemetry.

use serde::{Deserialize, Serialize};

use super::Ssid;
use crate::metrics::{self, SnrEstimate};

/// Where a sample's SNR / noise floor came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnrSource {
    /// Empirical mapping from adapter link quality.
    #[default]
    LinkQualityEstimate,
    /// Signal minus a fixed, assumed noise floor.
    AssumedNoiseFloor,
    /// Noise level reported by the driver.
    Measured,
}

impl SnrSource {
    pub fn as_str(self) -> &'static str {
        match self {
            SnrSource::LinkQualityEstimate => "link_quality_estimate",
            SnrSource::AssumedNoiseFloor => "assumed_noise_floor",
            SnrSource::Measured => "measured",
        }
    }

    /// Provenance line for human-readable reports.
    pub fn note(self) -> &'static str {
        match self {
            SnrSource::LinkQualityEstimate => {
                "Note: SNR estimated from adapter link quality; RSSI as reported by the adapter"
            }
            SnrSource::AssumedNoiseFloor => {
                "Note: RSSI derived from signal percentage; SNR against an assumed noise floor (lower accuracy)"
            }
            SnrSource::Measured => "Note: SNR from driver-reported noise level",
        }
    }
}

/// Telemetry for one acquisition. Built once, then only copied or folded into an average.
///
/// `noise_floor_dbm == signal_strength_dbm - snr_db` holds for every constructor,
/// and `channel` is always derived from `frequency_khz`. Deserialization rejects
/// records that break either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSample")]
pub struct Sample {
    timestamp_ms: u64,
    signal_strength_dbm: i32,
    link_quality: i32,
    snr_db: i32,
    noise_floor_dbm: i32,
    #[serde(rename = "ssid")]
    network_name: Ssid,
    frequency_khz: u32,
    channel: u32,
    snr_source: SnrSource,
}

impl Sample {
    /// SNR estimated from link quality.
    pub fn from_link_quality(
        signal_strength_dbm: i32,
        link_quality: i32,
        network_name: Ssid,
        frequency_khz: u32,
    ) -> Self {
        let est = metrics::estimate_snr(link_quality, signal_strength_dbm);
        Self::build(
            signal_strength_dbm,
            link_quality,
            est,
            SnrSource::LinkQualityEstimate,
            network_name,
            frequency_khz,
        )
    }

    /// SNR against a known noise floor; `source` says whether it was measured or assumed.
    pub fn from_noise_floor(
        signal_strength_dbm: i32,
        link_quality: i32,
        noise_floor_dbm: i32,
        source: SnrSource,
        network_name: Ssid,
        frequency_khz: u32,
    ) -> Self {
        let est = metrics::snr_from_noise_floor(signal_strength_dbm, noise_floor_dbm);
        Self::build(
            signal_strength_dbm,
            link_quality,
            est,
            source,
            network_name,
            frequency_khz,
        )
    }

    fn build(
        signal_strength_dbm: i32,
        link_quality: i32,
        est: SnrEstimate,
        snr_source: SnrSource,
        network_name: Ssid,
        frequency_khz: u32,
    ) -> Self {
        Self {
            timestamp_ms: 0,
            signal_strength_dbm,
            link_quality,
            snr_db: est.snr_db,
            noise_floor_dbm: est.noise_floor_dbm,
            network_name,
            frequency_khz,
            channel: metrics::frequency_to_channel(frequency_khz),
            snr_source,
        }
    }

    /// Same reading, stamped with its offset from the start of collection.
    pub fn at(self, timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            ..self
        }
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    pub fn signal_strength_dbm(&self) -> i32 {
        self.signal_strength_dbm
    }

    pub fn link_quality(&self) -> i32 {
        self.link_quality
    }

    pub fn snr_db(&self) -> i32 {
        self.snr_db
    }

    pub fn noise_floor_dbm(&self) -> i32 {
        self.noise_floor_dbm
    }

    pub fn network_name(&self) -> &Ssid {
        &self.network_name
    }

    pub fn frequency_khz(&self) -> u32 {
        self.frequency_khz
    }

    pub fn channel(&self) -> u32 {
        self.channel
    }

    pub fn snr_source(&self) -> SnrSource {
        self.snr_source
    }
}

// Wire shape of a sample, checked before it becomes a `Sample`.
#[derive(Deserialize)]
struct RawSample {
    timestamp_ms: u64,
    signal_strength_dbm: i32,
    link_quality: i32,
    snr_db: i32,
    noise_floor_dbm: i32,
    ssid: Ssid,
    frequency_khz: u32,
    channel: u32,
    #[serde(default)]
    snr_source: SnrSource,
}

impl TryFrom<RawSample> for Sample {
    type Error = String;

    fn try_from(raw: RawSample) -> Result<Self, Self::Error> {
        let signal = raw.signal_strength_dbm;
        // Constructors saturate one way or the other.
        if raw.noise_floor_dbm != signal.saturating_sub(raw.snr_db)
            && raw.snr_db != signal.saturating_sub(raw.noise_floor_dbm)
        {
            return Err(format!(
                "noise_floor_dbm {} does not equal signal_strength_dbm {} minus snr_db {}",
                raw.noise_floor_dbm, signal, raw.snr_db
            ));
        }
        let channel = metrics::frequency_to_channel(raw.frequency_khz);
        if raw.channel != channel {
            return Err(format!(
                "channel {} does not match frequency_khz {} (channel {})",
                raw.channel, raw.frequency_khz, channel
            ));
        }
        Ok(Self {
            timestamp_ms: raw.timestamp_ms,
            signal_strength_dbm: signal,
            link_quality: raw.link_quality,
            snr_db: raw.snr_db,
            noise_floor_dbm: raw.noise_floor_dbm,
            network_name: raw.ssid,
            frequency_khz: raw.frequency_khz,
            channel,
            snr_source: raw.snr_source,
        })
    }
}
