// Link telemetry providers: one sample per call from the currently associated network.

mod command;
mod iw;
mod netsh;

use std::future::Future;
use std::time::Duration;

use crate::config::{Backend, ProviderConfig};
use crate::error::NoSignal;
use crate::models::Sample;

pub use iw::{IwLink, IwLinkProvider, WirelessStats, parse_iw_link, parse_proc_wireless};
pub use netsh::{NetshInterface, NetshInterfaceProvider, parse_netsh_interfaces};

/// Source of link samples.
///
/// `acquire` returns a fully populated sample with its timestamp left at zero
/// (the sampling loop stamps it), or [`NoSignal`]. Implementations never retry.
pub trait LinkTelemetryProvider {
    fn acquire(&self) -> impl Future<Output = Result<Sample, NoSignal>>;
}

/// Backend chosen from configuration.
#[derive(Debug, Clone)]
pub enum Provider {
    Iw(IwLinkProvider),
    Netsh(NetshInterfaceProvider),
}

impl Provider {
    /// `auto` resolves to `iw` on Linux and `netsh` on Windows.
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_millis(config.command_timeout_ms);
        let backend = match config.backend {
            Backend::Auto if cfg!(target_os = "linux") => Backend::Iw,
            Backend::Auto if cfg!(target_os = "windows") => Backend::Netsh,
            Backend::Auto => anyhow::bail!(
                "no link telemetry backend for {}; set provider.backend explicitly",
                std::env::consts::OS
            ),
            other => other,
        };
        Ok(match backend {
            Backend::Netsh => Provider::Netsh(NetshInterfaceProvider::new(
                config.assumed_noise_floor_dbm,
                timeout,
            )),
            _ => Provider::Iw(IwLinkProvider::new(config.interface.clone(), timeout)),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Iw(_) => "iw",
            Provider::Netsh(_) => "netsh",
        }
    }
}

impl LinkTelemetryProvider for Provider {
    async fn acquire(&self) -> Result<Sample, NoSignal> {
        match self {
            Provider::Iw(p) => p.acquire().await,
            Provider::Netsh(p) => p.acquire().await,
        }
    }
}
