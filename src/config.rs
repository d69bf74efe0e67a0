//! Configuration for the ISI filter.
//!
//! Defaults match the capture pipeline the filter was tuned for: the
//! fixed-point path with error-feedback rounding, streamed in 4096-sample
//! chunks. A TOML file can override any field:
//!
//! ```toml
//! path = "float"
//! rounding = "half-up"
//! chunk_size = 8192
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{IsiError, Result};

/// Numeric realization of the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPath {
    /// Double-precision taps normalized by the filter gain
    Float,
    /// Q15 integer taps with a 64-bit accumulator (no floating point)
    Fixed,
}

impl fmt::Display for FilterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterPath::Float => write!(f, "float"),
            FilterPath::Fixed => write!(f, "fixed"),
        }
    }
}

/// Rounding rule applied when the fixed-point accumulator is shifted down
/// to 16 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Add half an LSB before the shift
    HalfUp,
    /// Carry the remainder discarded by each shift into the next sample
    ErrorFeedback,
}

/// Filter configuration
///
/// # Example
/// ```
/// use isifilter::config::{FilterPath, IsiConfig};
///
/// let config = IsiConfig::from_toml_str("path = \"float\"").unwrap();
/// assert_eq!(config.path, FilterPath::Float);
/// assert_eq!(config.chunk_size, 4096);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IsiConfig {
    /// Which engine processes the stream
    pub path: FilterPath,
    /// Rounding rule for the fixed path (ignored by the float path)
    pub rounding: RoundingMode,
    /// Number of samples handed to the engine per call
    pub chunk_size: usize,
}

impl Default for IsiConfig {
    fn default() -> Self {
        Self {
            path: FilterPath::Fixed,
            rounding: RoundingMode::ErrorFeedback,
            chunk_size: 4096,
        }
    }
}

impl IsiConfig {
    /// Parse a configuration from TOML text; missing fields take their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: IsiConfig =
            toml::from_str(text).map_err(|e| IsiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check field ranges
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(IsiError::Config("chunk_size must be positive".to_string()));
        }
        Ok(())
    }
}
