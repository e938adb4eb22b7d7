// Structured document: sentinel-wrapped JSON built field by field, and the reader for it.
// Only `"`, `\`, newline, carriage return and tab are escaped in strings; other bytes pass through.

use serde::Deserialize;

use super::buffer::OutputBuffer;
use crate::error::{DocumentError, ReportError};
use crate::models::{Average, Sample};

pub const JSON_START: &str = "[JSON_START]";
pub const JSON_END: &str = "[JSON_END]";

const MONITOR_BYTES_PER_SAMPLE: usize = 250;
const MONITOR_BASE_BYTES: usize = 1024;
const BASE_DOCUMENT_BYTES: usize = 2048;

pub(super) fn monitor(samples: &[Sample], limit: Option<usize>) -> Result<Vec<u8>, ReportError> {
    let initial = samples
        .len()
        .saturating_mul(MONITOR_BYTES_PER_SAMPLE)
        .saturating_add(MONITOR_BASE_BYTES);
    let mut out = OutputBuffer::new(initial, limit)?;

    out.append_fmt(format_args!("\n{JSON_START}\n{{\n"))?;
    out.append_str("  \"collection_type\": \"monitor\",\n")?;
    out.append_str("  \"samples\": [\n")?;

    for (i, s) in samples.iter().enumerate() {
        out.append_str("    {\n")?;
        out.append_fmt(format_args!("      \"timestamp_ms\": {},\n", s.timestamp_ms()))?;
        out.append_fmt(format_args!(
            "      \"signal_strength_dbm\": {},\n",
            s.signal_strength_dbm()
        ))?;
        out.append_fmt(format_args!("      \"link_quality\": {},\n", s.link_quality()))?;
        out.append_fmt(format_args!("      \"snr_db\": {},\n", s.snr_db()))?;
        out.append_fmt(format_args!(
            "      \"noise_floor_dbm\": {},\n",
            s.noise_floor_dbm()
        ))?;
        out.append_str("      \"ssid\": ")?;
        write_json_string(&mut out, s.network_name().as_bytes())?;
        out.append_str(",\n")?;
        out.append_fmt(format_args!("      \"frequency_khz\": {},\n", s.frequency_khz()))?;
        out.append_fmt(format_args!("      \"channel\": {},\n", s.channel()))?;
        out.append_fmt(format_args!(
            "      \"snr_source\": \"{}\"\n",
            s.snr_source().as_str()
        ))?;
        if i + 1 < samples.len() {
            out.append_str("    },\n")?;
        } else {
            out.append_str("    }\n")?;
        }
    }

    out.append_str("  ],\n")?;
    out.append_fmt(format_args!("  \"total_samples\": {}\n}}\n", samples.len()))?;
    out.append_fmt(format_args!("{JSON_END}\n\n"))?;
    Ok(out.into_bytes())
}

pub(super) fn base(avg: &Average, limit: Option<usize>) -> Result<Vec<u8>, ReportError> {
    let mut out = OutputBuffer::new(BASE_DOCUMENT_BYTES, limit)?;

    out.append_fmt(format_args!("\n{JSON_START}\n{{\n"))?;
    out.append_str("  \"collection_type\": \"base\",\n")?;
    out.append_str("  \"ssid\": ")?;
    write_json_string(&mut out, avg.network_name.as_bytes())?;
    out.append_str(",\n")?;
    out.append_fmt(format_args!("  \"sample_count\": {},\n", avg.sample_count))?;
    out.append_fmt(format_args!("  \"frequency_khz\": {},\n", avg.frequency_khz))?;
    out.append_fmt(format_args!("  \"channel\": {},\n", avg.channel))?;
    out.append_fmt(format_args!(
        "  \"signal_strength_dbm\": {},\n",
        avg.signal_strength_dbm
    ))?;
    out.append_fmt(format_args!("  \"link_quality\": {},\n", avg.link_quality))?;
    out.append_fmt(format_args!("  \"snr_db\": {},\n", avg.snr_db))?;
    out.append_fmt(format_args!("  \"noise_floor_dbm\": {},\n", avg.noise_floor_dbm))?;
    out.append_fmt(format_args!("  \"signal_percent\": {},\n", avg.signal_percent))?;
    out.append_fmt(format_args!("  \"noise_percent\": {},\n", avg.noise_percent))?;
    out.append_fmt(format_args!(
        "  \"snr_source\": \"{}\"\n}}\n",
        avg.snr_source.as_str()
    ))?;
    out.append_fmt(format_args!("{JSON_END}\n\n"))?;
    Ok(out.into_bytes())
}

/// Writes `raw` as a quoted JSON string.
pub fn write_json_string(out: &mut OutputBuffer, raw: &[u8]) -> Result<(), ReportError> {
    out.append(b"\"")?;
    let mut run_start = 0;
    for (i, &b) in raw.iter().enumerate() {
        let escaped: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            _ => continue,
        };
        out.append(&raw[run_start..i])?;
        out.append(escaped)?;
        run_start = i + 1;
    }
    out.append(&raw[run_start..])?;
    out.append(b"\"")
}

/// The JSON text between the sentinel lines of a mixed-text transport.
pub fn extract_document(text: &str) -> Result<&str, DocumentError> {
    let start = text
        .find(JSON_START)
        .ok_or(DocumentError::MissingSentinel(JSON_START))?
        + JSON_START.len();
    let end = text[start..]
        .find(JSON_END)
        .ok_or(DocumentError::MissingSentinel(JSON_END))?;
    Ok(text[start..start + end].trim())
}

/// A structured document read back into its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Monitor {
        samples: Vec<Sample>,
        total_samples: usize,
    },
    Base(Average),
}

#[derive(Deserialize)]
struct MonitorBody {
    samples: Vec<Sample>,
    total_samples: usize,
}

/// Parses a document (without sentinels) by its `collection_type`.
///
/// Samples must satisfy the `Sample` invariants and `total_samples` must match the list.
pub fn parse_document(json: &str) -> Result<Document, DocumentError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let kind = value
        .get("collection_type")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_owned();
    match kind.as_str() {
        "monitor" => {
            let body: MonitorBody = serde_json::from_value(value)?;
            if body.total_samples != body.samples.len() {
                return Err(DocumentError::CountMismatch {
                    declared: body.total_samples,
                    actual: body.samples.len(),
                });
            }
            Ok(Document::Monitor {
                samples: body.samples,
                total_samples: body.total_samples,
            })
        }
        "base" => Ok(Document::Base(serde_json::from_value(value)?)),
        _ => Err(DocumentError::UnknownCollectionType(kind)),
    }
}
