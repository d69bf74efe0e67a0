use std::f64::consts::PI;

use isifilter::signal_processing::coefficients::ISI_FIXED_TAPS;

/// Samples per EFM channel bit at 40 MHz (4.3218 MHz bit clock)
pub const EFM_SAMPLES_PER_T: f64 = 40_000_000.0 / 4_321_800.0;

/// `len` samples of a sine wave with the given period in samples
pub fn sinusoid(len: usize, period: f64, amplitude: f64) -> Vec<i16> {
    (0..len)
        .map(|i| (amplitude * (2.0 * PI * i as f64 / period).sin()).round() as i16)
        .collect()
}

/// A unit impulse followed by `len - 1` zeros
pub fn impulse(len: usize, amplitude: f64) -> Vec<f64> {
    let mut samples = vec![0.0; len];
    if let Some(first) = samples.first_mut() {
        *first = amplitude;
    }
    samples
}

/// Square pulse train with EFM run lengths (3T to 11T)
///
/// Run lengths come from a fixed LCG so the signal is reproducible.
pub fn efm_pulse_train(len: usize, amplitude: i16, seed: u32) -> Vec<i16> {
    let mut state = seed;
    let mut level = amplitude;
    let mut samples = Vec::with_capacity(len);
    let mut edge = 0.0f64;

    while samples.len() < len {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let run = 3 + (state >> 16) % 9;
        edge += run as f64 * EFM_SAMPLES_PER_T;
        while samples.len() < len && (samples.len() as f64) < edge {
            samples.push(level);
        }
        level = -level;
    }
    samples
}

/// Full-scale samples whose signs match every tap once the delay line is full
pub fn worst_case_full_scale(positive: bool) -> Vec<i16> {
    ISI_FIXED_TAPS
        .iter()
        .map(|&t| {
            if (t >= 0) == positive {
                i16::MAX
            } else {
                i16::MIN
            }
        })
        .collect()
}

pub fn to_f64(samples: &[i16]) -> Vec<f64> {
    samples.iter().map(|&s| f64::from(s)).collect()
}
