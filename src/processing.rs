use crate::config::{FilterPath, IsiConfig, RoundingMode};
use crate::error::{IsiError, Result};
use crate::signal_processing::{FixedIsiFilter, FloatIsiFilter, IsiFilter, SaturationStats};

/// Width of one sample in the byte interface (little-endian i16)
pub const SAMPLE_WIDTH: usize = 2;

/// A caller-owned buffer of samples for one of the two numeric paths
pub enum SampleBuffer<'a> {
    Float(&'a mut [f64]),
    Fixed(&'a mut [i16]),
}

impl SampleBuffer<'_> {
    /// Numeric path the samples belong to
    pub fn path(&self) -> FilterPath {
        match self {
            SampleBuffer::Float(_) => FilterPath::Float,
            SampleBuffer::Fixed(_) => FilterPath::Fixed,
        }
    }

    /// Number of samples in the buffer
    pub fn len(&self) -> usize {
        match self {
            SampleBuffer::Float(b) => b.len(),
            SampleBuffer::Fixed(b) => b.len(),
        }
    }

    /// True if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum Engine {
    Float(FloatIsiFilter),
    Fixed(FixedIsiFilter),
}

/// Streams sample buffers through one ISI filter engine, in place
///
/// The engine (and therefore its history) lives as long as the processor,
/// so a logical stream split across many calls is filtered exactly as if it
/// had been passed in one call. Use one processor per stream.
///
/// # Example
/// ```
/// use isifilter::config::FilterPath;
/// use isifilter::processing::{IsiProcessor, SampleBuffer};
///
/// let mut processor = IsiProcessor::new(FilterPath::Fixed);
/// let mut samples = vec![0i16; 256];
/// processor.filter_buffer(SampleBuffer::Fixed(&mut samples)).unwrap();
/// assert!(samples.iter().all(|&s| s == 0));
/// ```
pub struct IsiProcessor {
    engine: Engine,
}

impl IsiProcessor {
    /// Create a processor with a cold engine for the given path
    ///
    /// The fixed path uses error-feedback rounding.
    pub fn new(path: FilterPath) -> Self {
        Self::with_rounding(path, RoundingMode::ErrorFeedback)
    }

    /// Create a processor with an explicit fixed-path rounding rule
    pub fn with_rounding(path: FilterPath, rounding: RoundingMode) -> Self {
        let engine = match path {
            FilterPath::Float => Engine::Float(FloatIsiFilter::new()),
            FilterPath::Fixed => Engine::Fixed(FixedIsiFilter::new(rounding)),
        };
        log::debug!("ISI engine created: path={}, rounding={:?}", path, rounding);
        Self { engine }
    }

    /// Create a processor with the path and rounding rule from `config`
    pub fn from_config(config: &IsiConfig) -> Self {
        Self::with_rounding(config.path, config.rounding)
    }

    /// Numeric path of the engine
    pub fn path(&self) -> FilterPath {
        match self.engine {
            Engine::Float(_) => FilterPath::Float,
            Engine::Fixed(_) => FilterPath::Fixed,
        }
    }

    /// Replace every sample in `buffer` with its filtered value
    ///
    /// # Errors
    /// Returns `IsiError::PathMismatch` if the buffer's path differs from the
    /// engine's; the buffer is left untouched.
    pub fn filter_buffer(&mut self, buffer: SampleBuffer<'_>) -> Result<()> {
        let engine_path = self.path();
        let before = self.saturation_stats();
        match (&mut self.engine, buffer) {
            (Engine::Float(filter), SampleBuffer::Float(samples)) => {
                filter.process_buffer(samples)
            }
            (Engine::Fixed(filter), SampleBuffer::Fixed(samples)) => {
                filter.process_buffer(samples)
            }
            (_, buffer) => {
                return Err(IsiError::PathMismatch {
                    engine: engine_path,
                    buffer: buffer.path(),
                });
            }
        }
        self.warn_on_saturation(before);
        Ok(())
    }

    /// Filter 16-bit samples in place on either path
    ///
    /// The float path widens each sample, filters it and rounds the result
    /// back to 16 bits.
    pub fn filter_i16(&mut self, samples: &mut [i16]) {
        let before = self.saturation_stats();
        match &mut self.engine {
            Engine::Float(filter) => {
                for sample in samples.iter_mut() {
                    *sample = filter.process_i16(*sample);
                }
            }
            Engine::Fixed(filter) => filter.process_buffer(samples),
        }
        self.warn_on_saturation(before);
    }

    /// Filter a byte buffer of little-endian i16 samples in place
    ///
    /// Both paths accept this layout; the float path widens each sample,
    /// filters it and rounds the result back to 16 bits.
    ///
    /// # Errors
    /// Returns `IsiError::InvalidBufferLayout` if the length is not a whole
    /// number of samples; no sample is processed in that case.
    pub fn filter_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        if !bytes.len().is_multiple_of(SAMPLE_WIDTH) {
            return Err(IsiError::InvalidBufferLayout {
                len: bytes.len(),
                sample_width: SAMPLE_WIDTH,
            });
        }

        let before = self.saturation_stats();
        for chunk in bytes.chunks_exact_mut(SAMPLE_WIDTH) {
            let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
            let filtered = match &mut self.engine {
                Engine::Float(filter) => filter.process_i16(sample),
                Engine::Fixed(filter) => filter.process(sample),
            };
            chunk.copy_from_slice(&filtered.to_le_bytes());
        }
        self.warn_on_saturation(before);
        Ok(())
    }

    /// Return the engine to its cold-start state
    pub fn reset(&mut self) {
        match &mut self.engine {
            Engine::Float(filter) => filter.reset(),
            Engine::Fixed(filter) => filter.reset(),
        }
    }

    /// Clamp events seen by the engine
    pub fn saturation_stats(&self) -> SaturationStats {
        match &self.engine {
            Engine::Float(filter) => filter.saturation_stats(),
            Engine::Fixed(filter) => filter.saturation_stats(),
        }
    }

    /// Clear the clamp counters without touching the filter history
    pub fn reset_saturation_stats(&mut self) {
        match &mut self.engine {
            Engine::Float(filter) => filter.reset_saturation_stats(),
            Engine::Fixed(filter) => filter.reset_saturation_stats(),
        }
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        match &self.engine {
            Engine::Float(filter) => filter.num_taps(),
            Engine::Fixed(filter) => filter.num_taps(),
        }
    }

    /// Get the group delay in samples
    pub fn group_delay_samples(&self) -> usize {
        match &self.engine {
            Engine::Float(filter) => filter.group_delay_samples(),
            Engine::Fixed(filter) => filter.group_delay_samples(),
        }
    }

    fn warn_on_saturation(&self, before: SaturationStats) {
        let after = self.saturation_stats();
        let new_events = after.total() - before.total();
        if new_events > 0 {
            log::warn!(
                "{} path clamped {} samples in this buffer ({} high, {} low); input level too hot",
                self.path(),
                new_events,
                after.high - before.high,
                after.low - before.low
            );
        }
    }
}
