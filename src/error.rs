use thiserror::Error;

use crate::config::FilterPath;

#[derive(Error, Debug)]
pub enum IsiError {
    #[error("Invalid buffer layout: {len} bytes is not a whole number of {sample_width}-byte samples")]
    InvalidBufferLayout { len: usize, sample_width: usize },

    #[error("Buffer holds {buffer} samples but the engine runs the {engine} path")]
    PathMismatch {
        engine: FilterPath,
        buffer: FilterPath,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, IsiError>;
