// Config loading and validation tests

use wifi_snr::config::{AppConfig, Backend, Mode};
use wifi_snr::provider::Provider;

const VALID_CONFIG: &str = r#"
[provider]
backend = "iw"
interface = "wlp3s0"
assumed_noise_floor_dbm = -92
command_timeout_ms = 1500

[output]
table = true
json = true
max_report_bytes = 65536
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.provider.backend, Backend::Iw);
    assert_eq!(config.provider.interface, "wlp3s0");
    assert_eq!(config.provider.assumed_noise_floor_dbm, -92);
    assert_eq!(config.provider.command_timeout_ms, 1500);
    assert_eq!(config.output.max_report_bytes, Some(65536));
}

#[test]
fn test_config_defaults_when_empty() {
    let config = AppConfig::load_from_str("").expect("empty config is valid");
    assert_eq!(config.provider.backend, Backend::Auto);
    assert_eq!(config.provider.interface, "wlan0");
    assert_eq!(config.provider.assumed_noise_floor_dbm, -95);
    assert_eq!(config.provider.command_timeout_ms, 2000);
    assert!(config.output.table);
    assert!(config.output.json);
    assert_eq!(config.output.max_report_bytes, None);
}

#[test]
fn test_config_validation_rejects_empty_interface() {
    let bad = VALID_CONFIG.replace("interface = \"wlp3s0\"", "interface = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("provider.interface"));
}

#[test]
fn test_config_validation_rejects_noise_floor_out_of_range() {
    let bad = VALID_CONFIG.replace(
        "assumed_noise_floor_dbm = -92",
        "assumed_noise_floor_dbm = 5",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("assumed_noise_floor_dbm"));
}

#[test]
fn test_config_validation_rejects_timeout_zero() {
    let bad = VALID_CONFIG.replace("command_timeout_ms = 1500", "command_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("command_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_all_outputs_disabled() {
    let bad = VALID_CONFIG
        .replace("table = true", "table = false")
        .replace("json = true", "json = false");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("output.table"));
}

#[test]
fn test_config_validation_rejects_max_report_bytes_zero() {
    let bad = VALID_CONFIG.replace("max_report_bytes = 65536", "max_report_bytes = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_report_bytes"));
}

#[test]
fn test_config_rejects_unknown_backend() {
    let bad = VALID_CONFIG.replace("backend = \"iw\"", "backend = \"nl80211\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("wifi-snr.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();

    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    let missing = dir.path().join("absent.toml");
    unsafe { std::env::set_var("CONFIG_FILE", missing.to_str().unwrap()) };
    let missing_result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };

    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.provider.interface, "wlp3s0");
    let err = missing_result.unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_mode_durations() {
    assert_eq!(Mode::Monitor.resolve_duration(None), 5);
    assert_eq!(Mode::Base.resolve_duration(None), 3);
    assert_eq!(Mode::Monitor.resolve_duration(Some(1)), 1);
    assert_eq!(Mode::Monitor.resolve_duration(Some(60)), 60);
    assert_eq!(Mode::Monitor.resolve_duration(Some(0)), 5);
    assert_eq!(Mode::Base.resolve_duration(Some(61)), 3);
    assert_eq!(Mode::Monitor.collection_type(), "monitor");
    assert_eq!(Mode::Base.collection_type(), "base");
}

#[test]
fn test_provider_from_explicit_backend() {
    let config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    let provider = Provider::from_config(&config.provider).unwrap();
    assert_eq!(provider.name(), "iw");

    let netsh = VALID_CONFIG.replace("backend = \"iw\"", "backend = \"netsh\"");
    let config = AppConfig::load_from_str(&netsh).unwrap();
    assert_eq!(Provider::from_config(&config.provider).unwrap().name(), "netsh");
}

#[test]
fn test_mode_from_arg() {
    assert_eq!(Mode::from_arg("base"), Some(Mode::Base));
    assert_eq!(Mode::from_arg("BaseLine"), Some(Mode::Base));
    assert_eq!(Mode::from_arg("MONITOR"), Some(Mode::Monitor));
    assert_eq!(Mode::from_arg("mon"), None);
    assert_eq!(Mode::from_arg("scan"), None);
    assert_eq!(Mode::from_arg("bäse"), None);
}

#[test]
fn test_resolve_duration_arg_falls_back() {
    assert_eq!(Mode::Monitor.resolve_duration_arg(None), 5);
    assert_eq!(Mode::Monitor.resolve_duration_arg(Some("10")), 10);
    assert_eq!(Mode::Monitor.resolve_duration_arg(Some(" 8 ")), 8);
    assert_eq!(Mode::Monitor.resolve_duration_arg(Some("-5")), 5);
    assert_eq!(Mode::Monitor.resolve_duration_arg(Some("abc")), 5);
    assert_eq!(Mode::Base.resolve_duration_arg(Some("")), 3);
    assert_eq!(
        Mode::Base.resolve_duration_arg(Some("184467440737095516160")),
        3
    );
}
