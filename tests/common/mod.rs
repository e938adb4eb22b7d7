// Shared test helpers
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use wifi_snr::error::NoSignal;
use wifi_snr::models::{Sample, Ssid};
use wifi_snr::provider::LinkTelemetryProvider;

pub const HOME_FREQ_KHZ: u32 = 2_437_000;

pub fn sample(signal_dbm: i32, link_quality: i32) -> Sample {
    Sample::from_link_quality(signal_dbm, link_quality, Ssid::from("HomeNet"), HOME_FREQ_KHZ)
}

/// Same reading on every call, after an optional simulated query latency.
pub struct SteadyProvider {
    pub reading: Sample,
    pub latency: Duration,
    pub calls: Cell<usize>,
}

impl SteadyProvider {
    pub fn new(reading: Sample) -> Self {
        Self::with_latency(reading, Duration::ZERO)
    }

    pub fn with_latency(reading: Sample, latency: Duration) -> Self {
        Self {
            reading,
            latency,
            calls: Cell::new(0),
        }
    }
}

impl LinkTelemetryProvider for SteadyProvider {
    async fn acquire(&self) -> Result<Sample, NoSignal> {
        self.calls.set(self.calls.get() + 1);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.reading.clone())
    }
}

/// Plays back a fixed script, then reports the adapter as disassociated.
pub struct ScriptedProvider {
    script: RefCell<VecDeque<Result<Sample, NoSignal>>>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Result<Sample, NoSignal>>) -> Self {
        Self {
            script: RefCell::new(script.into_iter().collect()),
        }
    }
}

impl LinkTelemetryProvider for ScriptedProvider {
    async fn acquire(&self) -> Result<Sample, NoSignal> {
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(NoSignal::NotAssociated))
    }
}

/// No adapter at all.
pub struct AbsentProvider;

impl LinkTelemetryProvider for AbsentProvider {
    async fn acquire(&self) -> Result<Sample, NoSignal> {
        Err(NoSignal::NoAdapter("no wireless interface".into()))
    }
}
