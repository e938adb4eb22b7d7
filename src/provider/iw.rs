// Linux backend: `iw dev <iface> link` for the association, /proc/net/wireless for quality and noise.

use std::time::Duration;

use tracing::{debug, instrument};

use super::LinkTelemetryProvider;
use super::command;
use crate::error::NoSignal;
use crate::metrics::dbm_to_percent;
use crate::models::{Sample, SnrSource, Ssid};

const PROC_WIRELESS: &str = "/proc/net/wireless";
/// Wireless-extensions link quality scale used by most drivers.
const WEXT_QUALITY_MAX: i32 = 70;

#[derive(Debug, Clone)]
pub struct IwLinkProvider {
    interface: String,
    timeout: Duration,
}

impl IwLinkProvider {
    pub fn new(interface: impl Into<String>, timeout: Duration) -> Self {
        Self {
            interface: interface.into(),
            timeout,
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Combines a parsed link with optional driver statistics into a sample.
    ///
    /// Signal comes from `iw`, falling back to the /proc level. A driver-reported
    /// noise level yields a measured SNR; otherwise SNR is estimated from link quality.
    pub fn sample_from(link: IwLink, stats: Option<WirelessStats>) -> Result<Sample, NoSignal> {
        let signal_dbm = link
            .signal_dbm
            .or(stats.map(|s| s.level_dbm))
            .ok_or_else(|| NoSignal::QueryFailed("no signal level reported".into()))?;
        let link_quality = stats
            .map(|s| s.quality_percent())
            .unwrap_or_else(|| dbm_to_percent(signal_dbm));

        Ok(match stats.and_then(|s| s.noise_dbm) {
            Some(noise) => Sample::from_noise_floor(
                signal_dbm,
                link_quality,
                noise,
                SnrSource::Measured,
                link.ssid,
                link.frequency_khz,
            ),
            None => Sample::from_link_quality(signal_dbm, link_quality, link.ssid, link.frequency_khz),
        })
    }
}

impl LinkTelemetryProvider for IwLinkProvider {
    #[instrument(skip(self), fields(provider = "iw", interface = %self.interface))]
    async fn acquire(&self) -> Result<Sample, NoSignal> {
        let stdout = command::run("iw", &["dev", &self.interface, "link"], self.timeout).await?;
        let link = parse_iw_link(&stdout)?;

        let stats = match tokio::fs::read_to_string(PROC_WIRELESS).await {
            Ok(content) => parse_proc_wireless(&content, &self.interface),
            Err(e) => {
                debug!(error = %e, operation = "read_proc_wireless", "wireless stats unavailable");
                None
            }
        };

        Self::sample_from(link, stats)
    }
}

/// Association details from `iw dev <iface> link`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IwLink {
    pub ssid: Ssid,
    pub frequency_khz: u32,
    pub signal_dbm: Option<i32>,
}

/// Parses `iw dev <iface> link`.
///
/// ```text
/// Connected to aa:bb:cc:dd:ee:ff (on wlan0)
///         SSID: HomeNetwork
///         freq: 5180.0
///         signal: -52 dBm
/// ```
pub fn parse_iw_link(output: &str) -> Result<IwLink, NoSignal> {
    let mut lines = output.lines();
    let first = lines.next().unwrap_or_default().trim();
    if first.starts_with("Not connected") {
        return Err(NoSignal::NotAssociated);
    }
    if !first.starts_with("Connected to") {
        return Err(NoSignal::QueryFailed(format!(
            "unexpected iw link output: {first:?}"
        )));
    }

    let mut link = IwLink {
        ssid: Ssid::default(),
        frequency_khz: 0,
        signal_dbm: None,
    };
    for line in lines {
        let line = line.trim_start().trim_end_matches('\r');
        if let Some(rest) = line.strip_prefix("SSID:") {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            link.ssid = Ssid::new(unescape_ssid(rest));
        } else if let Some(rest) = line.strip_prefix("freq:") {
            link.frequency_khz = rest
                .trim()
                .parse::<f64>()
                .map(|mhz| (mhz * 1000.0).round() as u32)
                .unwrap_or(0);
        } else if let Some(rest) = line.strip_prefix("signal:") {
            link.signal_dbm = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse::<f64>().ok())
                .map(|dbm| dbm.round() as i32);
        }
    }
    Ok(link)
}

/// iw prints unprintable SSID bytes (and backslash) as `\xNN`.
fn unescape_ssid(escaped: &str) -> Vec<u8> {
    let bytes = escaped.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\'
            && bytes.get(i + 1) == Some(&b'x')
            && let Some(hex) = escaped.get(i + 2..i + 4)
            && let Ok(b) = u8::from_str_radix(hex, 16)
        {
            out.push(b);
            i += 4;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}

/// One interface row of /proc/net/wireless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WirelessStats {
    /// Raw link quality on the driver's 0..=70 scale.
    pub link: i32,
    pub level_dbm: i32,
    /// `None` when the driver does not report noise.
    pub noise_dbm: Option<i32>,
}

impl WirelessStats {
    pub fn quality_percent(&self) -> i32 {
        (self.link.saturating_mul(100) / WEXT_QUALITY_MAX).clamp(0, 100)
    }
}

/// Finds `interface` in /proc/net/wireless.
///
/// ```text
///  wlan0: 0000   70.  -40.  -256        0      0      0      0      0        0
/// ```
pub fn parse_proc_wireless(content: &str, interface: &str) -> Option<WirelessStats> {
    content.lines().find_map(|line| {
        let (name, rest) = line.split_once(':')?;
        if name.trim() != interface {
            return None;
        }
        let mut fields = rest.split_whitespace().skip(1).map(parse_wext_value);
        let link = fields.next()??;
        let level_dbm = fields.next()??;
        let noise = fields.next()??;
        Some(WirelessStats {
            link,
            level_dbm,
            noise_dbm: (noise != 0 && noise > -256).then_some(noise),
        })
    })
}

// Values carry a trailing '.' when the driver marks them updated.
fn parse_wext_value(field: &str) -> Option<i32> {
    field
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .map(|v| v as i32)
}
