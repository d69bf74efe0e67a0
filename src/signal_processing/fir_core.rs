use std::ops::Add;

/// Numeric types for one realization of the tap-delay-line filter
///
/// The float and fixed ISI engines share the delay line and the convolution
/// loop; only the sample, tap and accumulator types and the per-tap product
/// differ between them.
pub trait TapArithmetic {
    /// Type stored in the delay line
    type Sample: Copy + Default;
    /// Type of one filter coefficient
    type Tap: Copy + 'static;
    /// Type the weighted sum is accumulated in
    type Acc: Copy + Default + Add<Output = Self::Acc>;

    /// Weight one delayed sample by one tap, widened to the accumulator type
    fn product(sample: Self::Sample, tap: Self::Tap) -> Self::Acc;
}

/// Double-precision samples and taps
#[derive(Debug, Clone, Copy)]
pub struct FloatTaps;

impl TapArithmetic for FloatTaps {
    type Sample = f64;
    type Tap = f64;
    type Acc = f64;

    #[inline]
    fn product(sample: f64, tap: f64) -> f64 {
        sample * tap
    }
}

/// 16-bit samples, Q15 taps, 64-bit accumulator
#[derive(Debug, Clone, Copy)]
pub struct Q15Taps;

impl TapArithmetic for Q15Taps {
    type Sample = i16;
    type Tap = i16;
    type Acc = i64;

    #[inline]
    fn product(sample: i16, tap: i16) -> i64 {
        i64::from(sample) * i64::from(tap)
    }
}

/// Core FIR filter implementation shared by the float and fixed ISI engines
///
/// Holds the delay line (the last `taps.len()` input samples) and computes
/// `sum(history[i] * taps[i])` with `history[0]` the oldest sample and
/// `history[n - 1]` the newest. The delay line starts zeroed, so the first
/// `n - 1` outputs of a stream carry a zero-padded settling transient.
pub struct FirFilterCore<A: TapArithmetic> {
    taps: &'static [A::Tap],
    delay_line: Vec<A::Sample>,
    pos: usize,
}

impl<A: TapArithmetic> FirFilterCore<A> {
    /// Create a new FIR filter core over a static tap table
    pub fn new(taps: &'static [A::Tap]) -> Self {
        Self {
            delay_line: vec![A::Sample::default(); taps.len()],
            taps,
            pos: 0,
        }
    }

    /// Push one sample into the delay line and return the raw weighted sum
    pub fn accumulate(&mut self, sample: A::Sample) -> A::Acc {
        self.delay_line[self.pos] = sample;

        // Everything after `pos` is older than everything up to and
        // including it, so the two halves in that order run oldest to newest
        // without modulo arithmetic in the inner loop.
        let (newer, older) = self.delay_line.split_at(self.pos + 1);
        let acc = older
            .iter()
            .chain(newer.iter())
            .zip(self.taps.iter())
            .fold(A::Acc::default(), |acc, (&s, &t)| acc + A::product(s, t));

        self.pos += 1;
        if self.pos == self.delay_line.len() {
            self.pos = 0;
        }
        acc
    }

    /// Zero the delay line
    pub fn reset(&mut self) {
        self.delay_line.fill(A::Sample::default());
        self.pos = 0;
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Get the group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        (self.taps.len() - 1) / 2
    }

    /// Delay line contents, oldest first
    #[cfg(test)]
    pub(crate) fn history(&self) -> Vec<A::Sample> {
        let (newer, older) = self.delay_line.split_at(self.pos);
        older.iter().chain(newer.iter()).copied().collect()
    }
}
