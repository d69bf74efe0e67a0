pub mod config;
pub mod error;
pub mod processing;
pub mod signal_processing;
pub mod wav;

pub use config::{FilterPath, IsiConfig, RoundingMode};
pub use error::{IsiError, Result};
pub use processing::{IsiProcessor, SampleBuffer};
pub use wav::{read_wav_i16, save_wav_i16};
