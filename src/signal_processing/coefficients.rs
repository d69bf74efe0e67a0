//! Raised-cosine ISI filter taps
//!
//! 81-tap raised-cosine impulse response (beta 0.75, corner 2.1609 MHz at a
//! 40 MHz sample rate). The response spans nine symbols at roughly nine
//! samples per symbol and is aligned on T/2, so it sharpens EFM pulse edges
//! while attenuating interference from neighbouring pulses.
//!
//! The fixed-point table is the float table scaled by 2^15 and rounded to
//! nearest; both tables are exactly symmetric (linear phase).

/// Number of taps in the impulse response
pub const ISI_TAPS: usize = 81;

/// DC gain of the float taps; the float path divides every output by this
pub const ISI_GAIN: f64 = 9.241973877;

/// Fractional bits of the fixed-point taps
pub const Q15_SHIFT: u32 = 15;

/// Fractional bits of [`GAIN_RECIPROCAL_Q30`]
pub const GAIN_RECIPROCAL_SHIFT: u32 = 30;

/// `round(2^30 / ISI_GAIN)`: integer gain normalization for the fixed path
pub const GAIN_RECIPROCAL_Q30: i64 = 116_181_006;

/// Real-valued taps
pub static ISI_FLOAT_TAPS: [f64; ISI_TAPS] = [
    0.0010986328, 0.0010681152, 0.0006713867, -0.0000305176, -0.0008239746, -0.0014953613,
    -0.0018005371, -0.0016479492, -0.0010070801, -0.0001220703, 0.0006408691, 0.0008850098,
    0.0002746582, -0.0012817383, -0.0036010742, -0.0061340332, -0.0082092285, -0.0090332031,
    -0.0082092285, -0.0058593750, -0.0027770996, -0.0003662109, -0.0004882812, -0.0048522949,
    -0.0144348145, -0.0289611816, -0.0462341309, -0.0620727539, -0.0705566406, -0.0646667480,
    -0.0374755859, 0.0165710449, 0.1004028320, 0.2130126953, 0.3492431641, 0.4996948242,
    0.6516418457, 0.7906494141, 0.9024047852, 0.9748840332, 0.9999694824, 0.9748840332,
    0.9024047852, 0.7906494141, 0.6516418457, 0.4996948242, 0.3492431641, 0.2130126953,
    0.1004028320, 0.0165710449, -0.0374755859, -0.0646667480, -0.0705566406, -0.0620727539,
    -0.0462341309, -0.0289611816, -0.0144348145, -0.0048522949, -0.0004882812, -0.0003662109,
    -0.0027770996, -0.0058593750, -0.0082092285, -0.0090332031, -0.0082092285, -0.0061340332,
    -0.0036010742, -0.0012817383, 0.0002746582, 0.0008850098, 0.0006408691, -0.0001220703,
    -0.0010070801, -0.0016479492, -0.0018005371, -0.0014953613, -0.0008239746, -0.0000305176,
    0.0006713867, 0.0010681152, 0.0010986328,
];

/// Taps scaled by 2^15
pub static ISI_FIXED_TAPS: [i16; ISI_TAPS] = [
    36, 35, 22, -1, -27, -49, -59, -54, -33,
    -4, 21, 29, 9, -42, -118, -201, -269, -296,
    -269, -192, -91, -12, -16, -159, -473, -949, -1515,
    -2034, -2312, -2119, -1228, 543, 3290, 6980, 11444, 16374,
    21353, 25908, 29570, 31945, 32767, 31945, 29570, 25908, 21353,
    16374, 11444, 6980, 3290, 543, -1228, -2119, -2312, -2034,
    -1515, -949, -473, -159, -16, -12, -91, -192, -269,
    -296, -269, -201, -118, -42, 9, 29, 21, -4,
    -33, -54, -59, -49, -27, -1, 22, 35, 36,
];
