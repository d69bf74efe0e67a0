//! Saturating narrowing to 16-bit samples

use std::fmt::Display;

/// Which rail a narrowed value was pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saturation {
    High,
    Low,
}

/// Narrow a wide integer to i16, clamping instead of wrapping
#[inline]
pub fn saturate_i16(val: i64) -> (i16, Option<Saturation>) {
    if val > i64::from(i16::MAX) {
        (i16::MAX, Some(Saturation::High))
    } else if val < i64::from(i16::MIN) {
        (i16::MIN, Some(Saturation::Low))
    } else {
        (val as i16, None)
    }
}

/// Round a float to the nearest integer and narrow it to i16 with saturation
#[inline]
pub fn round_to_i16(val: f64) -> (i16, Option<Saturation>) {
    let rounded = val.round();
    if rounded >= 32767.0 {
        (i16::MAX, (rounded > 32767.0).then_some(Saturation::High))
    } else if rounded <= -32768.0 {
        (i16::MIN, (rounded < -32768.0).then_some(Saturation::Low))
    } else {
        (rounded as i16, None)
    }
}

/// Counters for clamp events
///
/// Saturation is silent in the output stream, but frequent clamping means
/// the capture level upstream is too hot, so every engine keeps these
/// counters for the caller to inspect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaturationStats {
    /// Outputs pinned to `i16::MAX`
    pub high: u64,
    /// Outputs pinned to `i16::MIN`
    pub low: u64,
}

impl SaturationStats {
    /// Total clamp events
    pub fn total(&self) -> u64 {
        self.high + self.low
    }

    pub(crate) fn record(&mut self, event: Option<Saturation>, value: impl Display) {
        match event {
            Some(Saturation::High) => {
                self.high += 1;
                log::trace!("Output saturated high ({})", value);
            }
            Some(Saturation::Low) => {
                self.low += 1;
                log::trace!("Output saturated low ({})", value);
            }
            None => {}
        }
    }
}
