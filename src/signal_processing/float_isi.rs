use super::clamp::{SaturationStats, round_to_i16};
use super::coefficients::{ISI_FLOAT_TAPS, ISI_GAIN};
use super::filter::IsiFilter;
use super::fir_core::{FirFilterCore, FloatTaps};

/// Floating-point ISI filter
///
/// Convolves the stream with the raised-cosine taps and divides each output
/// by the filter gain, giving unity gain at DC. The filter is linear, so
/// input samples have no range restriction.
pub struct FloatIsiFilter {
    core: FirFilterCore<FloatTaps>,
    saturation: SaturationStats,
}

impl FloatIsiFilter {
    /// Create a filter with a zeroed history
    pub fn new() -> Self {
        Self {
            core: FirFilterCore::new(&ISI_FLOAT_TAPS),
            saturation: SaturationStats::default(),
        }
    }

    /// Process a single sample through the filter
    pub fn process(&mut self, sample: f64) -> f64 {
        self.core.accumulate(sample) / ISI_GAIN
    }

    /// Filter a 16-bit sample, rounding the result back to 16 bits
    ///
    /// Results outside the i16 range are clamped and counted in
    /// [`saturation_stats`](IsiFilter::saturation_stats).
    pub fn process_i16(&mut self, sample: i16) -> i16 {
        let filtered = self.process(f64::from(sample));
        let (out, event) = round_to_i16(filtered);
        self.saturation.record(event, filtered);
        out
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

impl Default for FloatIsiFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl IsiFilter for FloatIsiFilter {
    type Sample = f64;

    fn process(&mut self, sample: f64) -> f64 {
        FloatIsiFilter::process(self, sample)
    }

    fn reset(&mut self) {
        self.core.reset();
    }

    fn saturation_stats(&self) -> SaturationStats {
        self.saturation
    }

    fn reset_saturation_stats(&mut self) {
        self.saturation = SaturationStats::default();
    }
}
