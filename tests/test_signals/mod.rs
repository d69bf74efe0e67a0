mod generate;

pub use generate::{efm_pulse_train, impulse, sinusoid, to_f64, worst_case_full_scale};
