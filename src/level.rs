//! Pure level math: RMS energy and the calibrated decibel conversion.

/// Default scale factor mapping raw 16-bit RMS amplitude to the pressure
/// value fed into the decibel conversion. Determined empirically against
/// consumer microphone input; override it per device through
/// [`MeterConfig`](crate::MeterConfig) when readings need re-calibration.
pub const DEFAULT_CALIBRATION: f64 = 0.45255;

/// Root-mean-square amplitude of a block of signed 16-bit samples.
///
/// The sum of squares is accumulated in i64, which has headroom for any
/// realistic block length (full-scale samples square to 2^30, leaving room
/// for billions of them). An empty block has zero energy.
pub fn rms(samples: &[i16]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let square_sum: i64 = samples.iter().map(|&s| (s as i64) * (s as i64)).sum();
    (square_sum as f64 / samples.len() as f64).sqrt()
}

/// Convert an RMS amplitude to a non-negative integer decibel estimate.
///
/// The RMS is scaled by `calibration` into a pressure value `P`; the result
/// is `20 * log10(P)` truncated to an integer, with everything at or below
/// zero (silence, sub-unity pressure) clamped to 0.
pub fn decibels(rms: f64, calibration: f64) -> i32 {
    let pressure = rms * calibration;
    if pressure <= 0.0 {
        return 0;
    }
    let db = (20.0 * pressure.log10()) as i32;
    db.max(0)
}
