// Windows backend that polls `netsh wlan show interfaces`.
// netsh only reports a signal percentage, so RSSI is derived from it and SNR is
// taken against an assumed noise floor. Samples carry SnrSource::AssumedNoiseFloor.

use std::time::Duration;

use tracing::instrument;

use super::LinkTelemetryProvider;
use super::command::{self, split_kv};
use crate::error::NoSignal;
use crate::metrics::percent_to_dbm;
use crate::models::{Sample, SnrSource, Ssid};

#[derive(Debug, Clone)]
pub struct NetshInterfaceProvider {
    noise_floor_dbm: i32,
    timeout: Duration,
}

impl NetshInterfaceProvider {
    pub fn new(noise_floor_dbm: i32, timeout: Duration) -> Self {
        Self {
            noise_floor_dbm,
            timeout,
        }
    }

    /// Frequency is not reported, so frequency and channel are 0.
    pub fn sample_from(&self, iface: NetshInterface) -> Sample {
        Sample::from_noise_floor(
            percent_to_dbm(iface.signal_percent),
            iface.signal_percent,
            self.noise_floor_dbm,
            SnrSource::AssumedNoiseFloor,
            iface.ssid,
            0,
        )
    }
}

impl LinkTelemetryProvider for NetshInterfaceProvider {
    #[instrument(skip(self), fields(provider = "netsh"))]
    async fn acquire(&self) -> Result<Sample, NoSignal> {
        let stdout =
            command::run("netsh", &["wlan", "show", "interfaces"], self.timeout).await?;
        let iface = parse_netsh_interfaces(&stdout)?;
        Ok(self.sample_from(iface))
    }
}

/// The connected interface as reported by netsh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetshInterface {
    pub ssid: Ssid,
    pub signal_percent: i32,
}

/// Parses the first interface block of `netsh wlan show interfaces`.
///
/// ```text
///     Name                   : Wi-Fi
///     State                  : connected
///     SSID                   : MyNetwork
///     BSSID                  : aa:bb:cc:dd:ee:ff
///     Signal                 : 84%
/// ```
pub fn parse_netsh_interfaces(output: &str) -> Result<NetshInterface, NoSignal> {
    let mut seen_name = false;
    let mut state: Option<&str> = None;
    let mut ssid: Option<&str> = None;
    let mut signal: Option<&str> = None;

    for line in output.lines() {
        let Some((key, value)) = split_kv(line) else {
            continue;
        };
        match key {
            "Name" if seen_name => break,
            "Name" => seen_name = true,
            "State" => state = Some(value),
            "SSID" => ssid = Some(value),
            "Signal" => signal = Some(value),
            _ => {}
        }
    }

    if !seen_name {
        return Err(NoSignal::NoAdapter(
            "netsh reported no wireless interface".into(),
        ));
    }
    if !state.is_some_and(|s| s.eq_ignore_ascii_case("connected")) {
        return Err(NoSignal::NotAssociated);
    }

    let signal_percent = signal
        .and_then(|s| s.trim_end_matches('%').trim().parse::<i32>().ok())
        .ok_or_else(|| NoSignal::QueryFailed("netsh output has no signal percentage".into()))?;

    Ok(NetshInterface {
        ssid: Ssid::new(ssid.unwrap_or_default()),
        signal_percent,
    })
}
