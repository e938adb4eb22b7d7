// Run parameters (mode, duration) and the optional TOML configuration file.

use serde::Deserialize;

use crate::metrics::DEFAULT_ASSUMED_NOISE_FLOOR_DBM;

/// Fixed delay between acquisitions.
pub const SAMPLE_INTERVAL_MS: u64 = 100;
/// Upper bound on samples kept per run.
pub const MAX_SAMPLES: usize = 600;
/// Longest accepted collection window.
pub const MAX_DURATION_SECS: u64 = 60;

const DEFAULT_CONFIG_PATH: &str = "wifi-snr.toml";

/// Output shape of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Report every sample.
    #[default]
    Monitor,
    /// Report one averaged snapshot.
    Base,
}

impl Mode {
    pub fn default_duration_secs(self) -> u64 {
        match self {
            Mode::Monitor => 5,
            Mode::Base => 3,
        }
    }

    /// `collection_type` value of the structured document.
    pub fn collection_type(self) -> &'static str {
        match self {
            Mode::Monitor => "monitor",
            Mode::Base => "base",
        }
    }

    /// Mode named by a command-line word, matched case-insensitively on its first
    /// four letters (`base...`, `moni...`).
    pub fn from_arg(word: &str) -> Option<Self> {
        let prefix = word.get(..4)?;
        if prefix.eq_ignore_ascii_case("base") {
            Some(Mode::Base)
        } else if prefix.eq_ignore_ascii_case("moni") {
            Some(Mode::Monitor)
        } else {
            None
        }
    }

    /// Duration from a raw command-line value. Leading digits are read; anything
    /// else, or a value outside 1..=60, yields the mode default.
    pub fn resolve_duration_arg(self, raw: Option<&str>) -> u64 {
        let Some(raw) = raw else {
            return self.default_duration_secs();
        };
        let trimmed = raw.trim();
        let digits = &trimmed[..trimmed.bytes().take_while(u8::is_ascii_digit).count()];
        if digits.is_empty() {
            tracing::warn!(
                requested = raw,
                default = self.default_duration_secs(),
                "duration is not a number, using default"
            );
            return self.default_duration_secs();
        }
        let secs = digits.bytes().fold(0u64, |acc, d| {
            acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
        });
        self.resolve_duration(Some(secs))
    }

    /// Duration to collect for: `requested` when within 1..=60, else the mode default.
    pub fn resolve_duration(self, requested: Option<u64>) -> u64 {
        match requested {
            Some(secs) if (1..=MAX_DURATION_SECS).contains(&secs) => secs,
            Some(secs) => {
                tracing::warn!(
                    requested = secs,
                    default = self.default_duration_secs(),
                    "invalid duration, using default"
                );
                self.default_duration_secs()
            }
            None => self.default_duration_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Auto,
    Iw,
    Netsh,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub backend: Backend,
    /// Wireless interface queried by the `iw` backend.
    #[serde(default = "default_interface")]
    pub interface: String,
    /// Noise floor used when the backend cannot measure one.
    #[serde(default = "default_noise_floor")]
    pub assumed_noise_floor_dbm: i32,
    /// Per-acquisition limit for subprocess-backed providers.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            interface: default_interface(),
            assumed_noise_floor_dbm: default_noise_floor(),
            command_timeout_ms: default_command_timeout_ms(),
        }
    }
}

fn default_interface() -> String {
    "wlan0".into()
}

fn default_noise_floor() -> i32 {
    DEFAULT_ASSUMED_NOISE_FLOOR_DBM
}

fn default_command_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Emit the human-readable report.
    #[serde(default = "default_true")]
    pub table: bool,
    /// Emit the sentinel-wrapped structured document.
    #[serde(default = "default_true")]
    pub json: bool,
    /// Ceiling on each rendered report; growth past it fails the render.
    #[serde(default)]
    pub max_report_bytes: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            table: true,
            json: true,
            max_report_bytes: None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Loads `CONFIG_FILE` (must exist when set), else `wifi-snr.toml` if present, else defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = match std::env::var("CONFIG_FILE") {
            Ok(path) => path,
            Err(_) if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
                DEFAULT_CONFIG_PATH.into()
            }
            Err(_) => return Ok(Self::default()),
        };
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.provider.interface.is_empty(),
            "provider.interface must be non-empty"
        );
        anyhow::ensure!(
            (-120..=0).contains(&self.provider.assumed_noise_floor_dbm),
            "provider.assumed_noise_floor_dbm must be between -120 and 0, got {}",
            self.provider.assumed_noise_floor_dbm
        );
        anyhow::ensure!(
            self.provider.command_timeout_ms > 0,
            "provider.command_timeout_ms must be > 0, got {}",
            self.provider.command_timeout_ms
        );
        anyhow::ensure!(
            self.output.table || self.output.json,
            "output.table and output.json cannot both be disabled"
        );
        if let Some(max) = self.output.max_report_bytes {
            anyhow::ensure!(
                max > 0,
                "output.max_report_bytes must be > 0, got {}",
                max
            );
        }
        Ok(())
    }
}
