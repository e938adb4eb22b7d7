// Report tests: structured document layout and read-back, text table, size ceiling

mod common;

use common::sample;
use wifi_snr::aggregate::aggregate;
use wifi_snr::error::{DocumentError, ReportError};
use wifi_snr::models::{Sample, SnrSource, Ssid};
use wifi_snr::report::{
    Document, JSON_END, JSON_START, NO_SAMPLES, Renderer, extract_document, parse_document,
};

fn stamped(samples: Vec<Sample>) -> Vec<Sample> {
    samples
        .into_iter()
        .enumerate()
        .map(|(i, s)| s.at(i as u64 * 100))
        .collect()
}

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).expect("utf-8 report")
}

fn monitor_json(noise: i32, channel: u32, total_samples: usize) -> String {
    format!(
        r#"{{
  "collection_type": "monitor",
  "samples": [
    {{
      "timestamp_ms": 0,
      "signal_strength_dbm": -50,
      "link_quality": 90,
      "snr_db": 35,
      "noise_floor_dbm": {noise},
      "ssid": "HomeNet",
      "frequency_khz": 2412000,
      "channel": {channel},
      "snr_source": "link_quality_estimate"
    }}
  ],
  "total_samples": {total_samples}
}}"#
    )
}

#[test]
fn test_monitor_document_round_trip() {
    let samples = stamped(vec![sample(-45, 95), sample(-50, 90), sample(-62, 71)]);
    let out = text(Renderer::default().monitor_document(&samples).unwrap());

    let json = extract_document(&out).unwrap();
    match parse_document(json).unwrap() {
        Document::Monitor {
            samples: back,
            total_samples,
        } => {
            assert_eq!(total_samples, 3);
            assert_eq!(back, samples);
        }
        other => panic!("expected monitor document, got {other:?}"),
    }
}

#[test]
fn test_monitor_document_framing() {
    let samples = stamped(vec![sample(-45, 95)]);
    let out = text(Renderer::default().monitor_document(&samples).unwrap());

    assert!(out.starts_with(&format!("\n{JSON_START}\n{{\n")));
    assert!(out.ends_with(&format!("}}\n{JSON_END}\n\n")));
    assert!(out.contains("  \"collection_type\": \"monitor\",\n"));
    assert!(out.contains("  \"total_samples\": 1\n"));
}

#[test]
fn test_monitor_document_field_order() {
    let samples = stamped(vec![sample(-45, 95)]);
    let out = text(Renderer::default().monitor_document(&samples).unwrap());

    let keys = [
        "\"timestamp_ms\"",
        "\"signal_strength_dbm\"",
        "\"link_quality\"",
        "\"snr_db\"",
        "\"noise_floor_dbm\"",
        "\"ssid\"",
        "\"frequency_khz\"",
        "\"channel\"",
        "\"snr_source\"",
    ];
    let positions: Vec<usize> = keys.iter().map(|k| out.find(k).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn test_parse_document_accepts_consistent_sample() {
    let parsed = parse_document(&monitor_json(-85, 1, 1)).unwrap();
    let Document::Monitor { samples, .. } = parsed else {
        panic!("expected monitor document");
    };
    assert_eq!(samples[0].noise_floor_dbm(), -85);
    assert_eq!(samples[0].channel(), 1);
}

#[test]
fn test_parse_document_rejects_inconsistent_noise_floor() {
    let err = parse_document(&monitor_json(0, 1, 1)).unwrap_err();
    assert!(matches!(err, DocumentError::Malformed(_)), "{err:?}");
    assert!(err.to_string().contains("noise_floor_dbm"));
}

#[test]
fn test_parse_document_rejects_wrong_channel() {
    let err = parse_document(&monitor_json(-85, 99, 1)).unwrap_err();
    assert!(matches!(err, DocumentError::Malformed(_)), "{err:?}");
    assert!(err.to_string().contains("channel"));
}

#[test]
fn test_parse_document_rejects_total_samples_mismatch() {
    let err = parse_document(&monitor_json(-85, 1, 7)).unwrap_err();
    assert!(matches!(
        err,
        DocumentError::CountMismatch {
            declared: 7,
            actual: 1
        }
    ));
}

#[test]
fn test_empty_monitor_document_is_valid() {
    let out = text(Renderer::default().monitor_document(&[]).unwrap());
    let json = extract_document(&out).unwrap();
    assert_eq!(
        parse_document(json).unwrap(),
        Document::Monitor {
            samples: vec![],
            total_samples: 0
        }
    );
}

#[test]
fn test_network_name_is_escaped() {
    let s = Sample::from_link_quality(-50, 90, Ssid::from("a\"b\\c\td"), 2_412_000);
    let out = text(Renderer::default().monitor_document(std::slice::from_ref(&s)).unwrap());

    assert!(out.contains(r#""ssid": "a\"b\\c\td","#));
    match parse_document(extract_document(&out).unwrap()).unwrap() {
        Document::Monitor { samples, .. } => {
            assert_eq!(samples[0].network_name().as_bytes(), b"a\"b\\c\td");
        }
        other => panic!("expected monitor document, got {other:?}"),
    }
}

#[test]
fn test_base_document_round_trip() {
    let samples: Vec<Sample> = [95, 85, 75, 65, 55]
        .into_iter()
        .map(|q| sample(-45, q))
        .collect();
    let avg = aggregate(&samples).unwrap();
    let out = text(Renderer::default().base_document(&avg).unwrap());

    assert!(out.contains("  \"collection_type\": \"base\",\n"));
    assert!(out.find("\"noise_percent\"").unwrap() < out.find("\"snr_source\"").unwrap());
    let parsed = parse_document(extract_document(&out).unwrap()).unwrap();
    assert_eq!(parsed, Document::Base(avg));
}

#[test]
fn test_monitor_table_layout() {
    let samples = stamped(vec![sample(-50, 90), sample(-45, 95)]);
    let out = text(Renderer::default().monitor_table(&samples, 5).unwrap());

    assert!(out.starts_with("=== Raw WiFi Signal Data ===\nSSID: HomeNet\nDuration: 5 seconds\n"));
    assert!(out.contains("Frequency: 2437000 kHz (Channel 6)\n\n"));
    assert!(out.contains("Time(ms) | RSSI(dBm) | Quality(%) | SNR(dB) | Noise(dBm)\n"));
    let row = concat!(
        "     100", " | ", "       -45", " | ", "        95", " | ", "     37", " | ",
        "       -82", "\n"
    );
    assert!(out.contains(row), "{out}");
    assert!(out.contains("\nTotal samples: 2\n"));
    assert!(out.contains(SnrSource::LinkQualityEstimate.note()));
}

#[test]
fn test_monitor_table_hidden_network_without_frequency() {
    let s = Sample::from_noise_floor(-58, 84, -95, SnrSource::AssumedNoiseFloor, Ssid::default(), 0);
    let out = text(Renderer::default().monitor_table(&[s], 3).unwrap());

    assert!(out.contains("SSID: Hidden/Unknown\n"));
    assert!(!out.contains("Frequency:"));
    assert!(out.contains(SnrSource::AssumedNoiseFloor.note()));
}

#[test]
fn test_empty_monitor_table() {
    let out = text(Renderer::default().monitor_table(&[], 5).unwrap());
    assert_eq!(out, NO_SAMPLES);
}

#[test]
fn test_base_summary() {
    let avg = aggregate(&[sample(-45, 95), sample(-45, 85)]).unwrap();
    let out = text(Renderer::default().base_summary(&avg).unwrap());

    assert!(out.starts_with("\n=== Base WiFi Signal Capture ===\nSSID: HomeNet\nSamples Averaged: 2\n"));
    assert!(out.contains("  Signal Strength (RSSI): -45 dBm (78%)\n"));
    assert!(out.contains("  Link Quality: 90%\n"));
    assert!(out.contains("\nSignal Quality:\n  [+] Good (78%) - Close proximity\n"));
}

#[test]
fn test_base_summary_very_poor() {
    let avg = aggregate(&[sample(-90, 20)]).unwrap();
    let out = text(Renderer::default().base_summary(&avg).unwrap());
    assert!(out.contains("  [!] Very Poor (14%) - Very far\n"), "{out}");
}

#[test]
fn test_report_ceiling_fails_render() {
    let samples = stamped(vec![sample(-50, 90); 20]);
    let renderer = Renderer::new(Some(128));

    assert!(matches!(
        renderer.monitor_document(&samples),
        Err(ReportError::AllocationFailure { .. })
    ));
    assert!(matches!(
        renderer.monitor_table(&samples, 2),
        Err(ReportError::AllocationFailure { .. })
    ));
}

#[test]
fn test_report_ceiling_allows_small_output() {
    let renderer = Renderer::new(Some(NO_SAMPLES.len()));
    assert_eq!(text(renderer.monitor_table(&[], 5).unwrap()), NO_SAMPLES);
}
