// Human-readable reports: fixed-column sample table and averaged summary.

use super::buffer::OutputBuffer;
use crate::error::ReportError;
use crate::models::{Average, Sample, Ssid};

const TABLE_BASE_BYTES: usize = 512;
const TABLE_BYTES_PER_ROW: usize = 100;
const SUMMARY_BYTES: usize = 4096;

pub const NO_SAMPLES: &str = "[-] No samples to display\n";

pub(super) fn monitor(
    samples: &[Sample],
    duration_secs: u64,
    limit: Option<usize>,
) -> Result<Vec<u8>, ReportError> {
    let Some(first) = samples.first() else {
        let mut out = OutputBuffer::new(NO_SAMPLES.len(), limit)?;
        out.append_str(NO_SAMPLES)?;
        return Ok(out.into_bytes());
    };

    let initial = samples
        .len()
        .saturating_mul(TABLE_BYTES_PER_ROW)
        .saturating_add(TABLE_BASE_BYTES);
    let mut out = OutputBuffer::new(initial, limit)?;

    out.append_str("=== Raw WiFi Signal Data ===\n")?;
    out.append_fmt(format_args!("SSID: {}\n", display_name(first.network_name())))?;
    out.append_fmt(format_args!("Duration: {duration_secs} seconds\n"))?;
    frequency_line(&mut out, first.frequency_khz(), first.channel())?;

    out.append_str("Time(ms) | RSSI(dBm) | Quality(%) | SNR(dB) | Noise(dBm)\n")?;
    out.append_str("---------+------------+------------+---------+-----------\n")?;
    for s in samples {
        out.append_fmt(format_args!(
            "{:>8} | {:>10} | {:>10} | {:>7} | {:>10}\n",
            s.timestamp_ms(),
            s.signal_strength_dbm(),
            s.link_quality(),
            s.snr_db(),
            s.noise_floor_dbm()
        ))?;
    }

    out.append_fmt(format_args!("\nTotal samples: {}\n", samples.len()))?;
    out.append_fmt(format_args!("{}\n", first.snr_source().note()))?;
    Ok(out.into_bytes())
}

pub(super) fn base(avg: &Average, limit: Option<usize>) -> Result<Vec<u8>, ReportError> {
    let mut out = OutputBuffer::new(SUMMARY_BYTES, limit)?;

    out.append_str("\n=== Base WiFi Signal Capture ===\n")?;
    out.append_fmt(format_args!("SSID: {}\n", display_name(&avg.network_name)))?;
    out.append_fmt(format_args!("Samples Averaged: {}\n", avg.sample_count))?;
    frequency_line(&mut out, avg.frequency_khz, avg.channel)?;

    out.append_str("Averaged Signal Measurements:\n")?;
    out.append_fmt(format_args!(
        "  Signal Strength (RSSI): {} dBm ({}%)\n",
        avg.signal_strength_dbm, avg.signal_percent
    ))?;
    out.append_fmt(format_args!("  Link Quality: {}%\n", avg.link_quality))?;
    out.append_fmt(format_args!("  SNR: {} dB\n", avg.snr_db))?;
    out.append_fmt(format_args!(
        "  Noise Floor: {} dBm ({}%)\n",
        avg.noise_floor_dbm, avg.noise_percent
    ))?;

    let tier = avg.tier();
    out.append_str("\nSignal Quality:\n")?;
    out.append_fmt(format_args!(
        "  {} {} ({}%) - {}\n",
        tier.marker(),
        tier.label(),
        avg.signal_percent,
        tier.proximity()
    ))?;
    out.append_fmt(format_args!("{}\n", avg.snr_source.note()))?;
    Ok(out.into_bytes())
}

fn display_name(name: &Ssid) -> String {
    if name.is_empty() {
        "Hidden/Unknown".into()
    } else {
        name.to_string()
    }
}

fn frequency_line(out: &mut OutputBuffer, frequency_khz: u32, channel: u32) -> Result<(), ReportError> {
    if frequency_khz > 0 {
        out.append_fmt(format_args!(
            "Frequency: {frequency_khz} kHz (Channel {channel})\n\n"
        ))
    } else {
        out.append_str("\n")
    }
}
