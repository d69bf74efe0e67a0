pub mod clamp;
pub mod coefficients;
pub mod filter;
pub mod fir_core;
pub mod fixed_isi;
pub mod float_isi;

pub use clamp::SaturationStats;
pub use filter::IsiFilter;
pub use fir_core::{FirFilterCore, FloatTaps, Q15Taps, TapArithmetic};
pub use fixed_isi::FixedIsiFilter;
pub use float_isi::FloatIsiFilter;
