use super::clamp::{SaturationStats, saturate_i16};
use super::coefficients::{GAIN_RECIPROCAL_Q30, GAIN_RECIPROCAL_SHIFT, ISI_FIXED_TAPS, Q15_SHIFT};
use super::filter::IsiFilter;
use super::fir_core::{FirFilterCore, Q15Taps};
use crate::config::RoundingMode;

/// Total right shift from accumulator to output: Q15 taps times the Q30
/// gain reciprocal
const OUTPUT_SHIFT: u32 = Q15_SHIFT + GAIN_RECIPROCAL_SHIFT;

const HALF_LSB: i64 = 1 << (OUTPUT_SHIFT - 1);

/// Fixed-point ISI filter
///
/// Integer-only counterpart of [`FloatIsiFilter`](super::FloatIsiFilter).
/// Each output is `sum(history[i] * q15_tap[i])` accumulated in 64 bits,
/// multiplied by `round(2^30 / gain)` and shifted down by 45 bits. With
/// full-scale input on every tap the product stays below 2^61.
///
/// Outputs beyond the i16 range are clamped to the rail and counted.
pub struct FixedIsiFilter {
    core: FirFilterCore<Q15Taps>,
    rounding: RoundingMode,
    /// Remainder discarded by the previous shift (error-feedback rounding)
    offset: i64,
    saturation: SaturationStats,
}

impl FixedIsiFilter {
    /// Create a filter with a zeroed history and rounding offset
    pub fn new(rounding: RoundingMode) -> Self {
        Self {
            core: FirFilterCore::new(&ISI_FIXED_TAPS),
            rounding,
            offset: 0,
            saturation: SaturationStats::default(),
        }
    }

    /// Process a single sample through the filter
    pub fn process(&mut self, sample: i16) -> i16 {
        let acc = self.core.accumulate(sample);
        let scaled = acc * GAIN_RECIPROCAL_Q30;

        let shifted = match self.rounding {
            RoundingMode::HalfUp => (scaled + HALF_LSB) >> OUTPUT_SHIFT,
            RoundingMode::ErrorFeedback => {
                let biased = scaled + self.offset;
                let shifted = biased >> OUTPUT_SHIFT;
                self.offset = biased - (shifted << OUTPUT_SHIFT);
                shifted
            }
        };

        let (out, event) = saturate_i16(shifted);
        self.saturation.record(event, shifted);
        out
    }

    /// Rounding rule in use
    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.core.num_taps()
    }

    /// Get the group delay in samples
    pub fn group_delay_samples(&self) -> usize {
        self.core.group_delay_samples()
    }
}

impl Default for FixedIsiFilter {
    fn default() -> Self {
        Self::new(RoundingMode::ErrorFeedback)
    }
}

impl IsiFilter for FixedIsiFilter {
    type Sample = i16;

    fn process(&mut self, sample: i16) -> i16 {
        FixedIsiFilter::process(self, sample)
    }

    fn reset(&mut self) {
        self.core.reset();
        self.offset = 0;
    }

    fn saturation_stats(&self) -> SaturationStats {
        self.saturation
    }

    fn reset_saturation_stats(&mut self) {
        self.saturation = SaturationStats::default();
    }
}
