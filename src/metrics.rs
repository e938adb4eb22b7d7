// Derived link metrics: SNR estimate, dBm <-> percent, frequency -> channel.
// Pure integer arithmetic; every division truncates toward zero.

/// Signal level at or above which the percent scale saturates.
pub const DBM_CEILING: i32 = -30;
/// Signal level at or below which the percent scale bottoms out.
pub const DBM_FLOOR: i32 = -100;
/// Noise floor assumed by providers that cannot measure one.
pub const DEFAULT_ASSUMED_NOISE_FLOOR_DBM: i32 = -95;

/// SNR and the noise floor implied by it, in dB / dBm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnrEstimate {
    pub snr_db: i32,
    pub noise_floor_dbm: i32,
}

/// Piecewise-linear empirical map from link quality (%) to SNR.
///
/// Each bracket starts at its lower bound and climbs half a dB per quality point.
/// No range check: quality below 40 (including negative input) takes the last branch.
/// Arithmetic saturates, so extreme input never panics.
pub fn estimate_snr(link_quality: i32, signal_dbm: i32) -> SnrEstimate {
    let q = link_quality;
    let snr_db = match q {
        90.. => 35 + (q - 90) / 2,
        80..=89 => 30 + (q - 80) / 2,
        70..=79 => 25 + (q - 70) / 2,
        60..=69 => 20 + (q - 60) / 2,
        50..=59 => 15 + (q - 50) / 2,
        40..=49 => 10 + (q - 40) / 2,
        _ => q.saturating_mul(10) / 40,
    };
    SnrEstimate {
        snr_db,
        noise_floor_dbm: signal_dbm.saturating_sub(snr_db),
    }
}

/// SNR against a fixed noise floor, for providers without a link quality reading of their own.
pub fn snr_from_noise_floor(signal_dbm: i32, noise_floor_dbm: i32) -> SnrEstimate {
    SnrEstimate {
        snr_db: signal_dbm.saturating_sub(noise_floor_dbm),
        noise_floor_dbm,
    }
}

/// Map dBm onto 0..=100 over the [-100, -30] window.
pub fn dbm_to_percent(dbm: i32) -> i32 {
    if dbm >= DBM_CEILING {
        return 100;
    }
    if dbm <= DBM_FLOOR {
        return 0;
    }
    (((dbm + 100) * 100) / 70).clamp(0, 100)
}

/// Inverse of the half-dB-per-percent scale used by `netsh` signal readings.
pub fn percent_to_dbm(percent: i32) -> i32 {
    if percent >= 100 {
        return DBM_CEILING;
    }
    if percent <= 0 {
        return DBM_FLOOR;
    }
    (percent - 200) / 2
}

/// 802.11 channel for a centre frequency in kHz; 0 when outside the 2.4/5 GHz bands.
pub fn frequency_to_channel(freq_khz: u32) -> u32 {
    let mhz = freq_khz / 1000;
    match mhz {
        2484 => 14,
        2412..=2483 => (mhz - 2407) / 5,
        5170..=5825 => (mhz - 5000) / 5,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_to_dbm_truncates_toward_zero() {
        assert_eq!(percent_to_dbm(100), -30);
        assert_eq!(percent_to_dbm(0), -100);
        assert_eq!(percent_to_dbm(50), -75);
        assert_eq!(percent_to_dbm(51), -74);
        assert_eq!(percent_to_dbm(99), -50);
    }

    #[test]
    fn snr_from_noise_floor_subtracts() {
        let est = snr_from_noise_floor(-60, DEFAULT_ASSUMED_NOISE_FLOOR_DBM);
        assert_eq!(est.snr_db, 35);
        assert_eq!(est.noise_floor_dbm, -95);
    }
}
