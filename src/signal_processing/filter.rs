use super::clamp::SaturationStats;

/// Common trait for the ISI filter engines
///
/// Implemented by `FloatIsiFilter` (f64 samples) and `FixedIsiFilter`
/// (i16 samples). An engine owns its delay line, so one instance must be
/// used per logical stream; feeding a stream through the same instance in
/// several calls gives the same output as one call.
pub trait IsiFilter {
    /// Sample type consumed and produced by this engine
    type Sample: Copy;

    /// Process a single sample through the filter
    fn process(&mut self, sample: Self::Sample) -> Self::Sample;

    /// Process a buffer of samples in-place
    fn process_buffer(&mut self, buffer: &mut [Self::Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Return to the cold-start state (zeroed history)
    fn reset(&mut self);

    /// Clamp events observed since construction or the last
    /// `reset_saturation_stats`
    fn saturation_stats(&self) -> SaturationStats;

    /// Clear the clamp counters
    fn reset_saturation_stats(&mut self);
}
