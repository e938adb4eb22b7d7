// Reduction of a sample sequence into one averaged snapshot.

use crate::error::EmptyInput;
use crate::metrics::dbm_to_percent;
use crate::models::{Average, Sample};

/// Averages `samples` in a single pass.
///
/// Numeric fields are truncating integer means; name, frequency, channel and
/// SNR provenance are taken from the first sample.
pub fn aggregate(samples: &[Sample]) -> Result<Average, EmptyInput> {
    let first = samples.first().ok_or(EmptyInput)?;

    let mut total_signal: i64 = 0;
    let mut total_quality: i64 = 0;
    let mut total_snr: i64 = 0;
    let mut total_noise: i64 = 0;
    for s in samples {
        total_signal += i64::from(s.signal_strength_dbm());
        total_quality += i64::from(s.link_quality());
        total_snr += i64::from(s.snr_db());
        total_noise += i64::from(s.noise_floor_dbm());
    }

    let count = samples.len();
    let signal_strength_dbm = mean(total_signal, count);
    let noise_floor_dbm = mean(total_noise, count);

    Ok(Average {
        network_name: first.network_name().clone(),
        sample_count: count,
        frequency_khz: first.frequency_khz(),
        channel: first.channel(),
        signal_strength_dbm,
        link_quality: mean(total_quality, count),
        snr_db: mean(total_snr, count),
        noise_floor_dbm,
        signal_percent: dbm_to_percent(signal_strength_dbm),
        noise_percent: dbm_to_percent(noise_floor_dbm),
        snr_source: first.snr_source(),
    })
}

// The mean of i32 values is itself an i32.
fn mean(total: i64, count: usize) -> i32 {
    (total / count as i64) as i32
}
