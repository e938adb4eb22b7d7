use std::io::Write;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use wifi_snr::config::{AppConfig, Mode};
use wifi_snr::error::RunError;
use wifi_snr::provider::Provider;
use wifi_snr::session::{self, Outcome};

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

/// Wi-Fi signal strength and SNR monitor.
#[derive(Parser, Debug)]
#[command(name = "wifi-snr", version, about, long_about = None)]
struct Cli {
    /// monitor: report every sample; base: report one averaged snapshot.
    /// Matched on the first four letters, any case; anything else runs monitor
    #[arg(allow_negative_numbers = true)]
    mode: Option<String>,
    /// Collection window in seconds (1-60); other values fall back to the mode default (5 / 3)
    #[arg(allow_negative_numbers = true)]
    seconds: Option<String>,
}

impl Cli {
    /// Mode and duration to run with. Unrecognised input falls back to defaults.
    fn resolve(&self) -> (Mode, u64) {
        let Some(word) = self.mode.as_deref() else {
            return (Mode::Monitor, Mode::Monitor.default_duration_secs());
        };
        match Mode::from_arg(word) {
            Some(mode) => (mode, mode.resolve_duration_arg(self.seconds.as_deref())),
            None => {
                tracing::warn!(mode = word, "no valid mode specified, using monitor");
                (Mode::Monitor, Mode::Monitor.default_duration_secs())
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app_config = AppConfig::load()?;
    let (mode, duration_secs) = cli.resolve();
    let provider = Provider::from_config(&app_config.provider)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        provider = provider.name(),
        "wifi-snr starting"
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received shutdown signal");
    };

    let report = match session::run(mode, duration_secs, &provider, &app_config.output, shutdown).await
    {
        Ok(report) => report,
        Err(e @ RunError::CaptureFailed(_)) => {
            tracing::error!(error = %e, "Capture failed; adapter may not be available or not connected");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&report.to_bytes())?;
    stdout.flush()?;

    if let Outcome::Monitor(samples) = &report.outcome
        && samples.is_empty()
    {
        std::process::exit(1);
    }
    Ok(())
}
