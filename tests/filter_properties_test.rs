mod test_signals;

use approx::assert_abs_diff_eq;

use isifilter::config::{FilterPath, RoundingMode};
use isifilter::processing::{IsiProcessor, SampleBuffer};
use isifilter::signal_processing::coefficients::{ISI_FLOAT_TAPS, ISI_GAIN, ISI_TAPS};
use isifilter::signal_processing::{FixedIsiFilter, FloatIsiFilter, IsiFilter};

const MODES: [RoundingMode; 2] = [RoundingMode::HalfUp, RoundingMode::ErrorFeedback];

fn filter_float(input: &[f64]) -> Vec<f64> {
    let mut samples = input.to_vec();
    FloatIsiFilter::new().process_buffer(&mut samples);
    samples
}

fn filter_fixed(input: &[i16], rounding: RoundingMode) -> Vec<i16> {
    let mut samples = input.to_vec();
    FixedIsiFilter::new(rounding).process_buffer(&mut samples);
    samples
}

#[test]
fn test_impulse_reproduces_taps_over_gain() {
    let output = filter_float(&test_signals::impulse(ISI_TAPS + 1, 1.0));

    for (i, &tap) in ISI_FLOAT_TAPS.iter().enumerate() {
        assert_abs_diff_eq!(output[i], tap / ISI_GAIN, epsilon = 1e-15);
    }
    assert_eq!(output[ISI_TAPS], 0.0);
}

#[test]
fn test_dc_gain_converges_to_unity() {
    let output = filter_float(&vec![1.0; 4000]);

    for (i, &s) in output.iter().enumerate().skip(ISI_TAPS - 1) {
        assert!((s - 1.0).abs() < 1e-6, "Sample {}: expected 1.0, got {}", i, s);
    }

    // Before the delay line fills, the output is still settling.
    assert!((output[ISI_TAPS / 2] - 1.0).abs() > 1e-3);
}

#[test]
fn test_zero_stream_stays_zero() {
    for len in [0, 1, ISI_TAPS, 5000] {
        assert!(filter_float(&vec![0.0; len]).iter().all(|&s| s == 0.0));
        for mode in MODES {
            assert!(filter_fixed(&vec![0; len], mode).iter().all(|&s| s == 0));
        }
    }
}

#[test]
fn test_float_streaming_continuity() {
    let input = test_signals::to_f64(&test_signals::efm_pulse_train(4000, 12000, 7));
    let whole = filter_float(&input);

    let mut processor = IsiProcessor::new(FilterPath::Float);
    let mut split = input.clone();
    let (first, second) = split.split_at_mut(2000);
    processor.filter_buffer(SampleBuffer::Float(first)).unwrap();
    processor.filter_buffer(SampleBuffer::Float(second)).unwrap();

    assert_eq!(split, whole);
}

#[test]
fn test_fixed_streaming_continuity() {
    let input = test_signals::efm_pulse_train(4000, 12000, 11);

    for mode in MODES {
        let whole = filter_fixed(&input, mode);

        // Uneven chunk sizes, including chunks shorter than the filter.
        let mut processor = IsiProcessor::with_rounding(FilterPath::Fixed, mode);
        let mut split = input.clone();
        let mut rest = split.as_mut_slice();
        for size in [1, 17, 80, 81, 500, 1321].iter().cycle() {
            if rest.is_empty() {
                break;
            }
            let n = (*size).min(rest.len());
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(n);
            processor.filter_buffer(SampleBuffer::Fixed(chunk)).unwrap();
            rest = tail;
        }

        assert_eq!(split, whole, "{:?}", mode);
    }
}

#[test]
fn test_byte_streaming_continuity() {
    let input = test_signals::sinusoid(3000, 700.0, 16000.0);
    let bytes: Vec<u8> = input.iter().flat_map(|s| s.to_le_bytes()).collect();

    for path in [FilterPath::Float, FilterPath::Fixed] {
        let mut whole = bytes.clone();
        IsiProcessor::new(path).filter_bytes(&mut whole).unwrap();

        let mut processor = IsiProcessor::new(path);
        let mut split = bytes.clone();
        for chunk in split.chunks_mut(1024) {
            processor.filter_bytes(chunk).unwrap();
        }

        assert_eq!(split, whole, "{} path", path);
    }
}

#[test]
fn test_fixed_tracks_float_on_sinusoid() {
    // One cycle spanning ~216 EFM channel bits.
    let input = test_signals::sinusoid(2000, 2000.0, 16000.0);
    let reference = filter_float(&test_signals::to_f64(&input));

    for mode in MODES {
        let fixed = filter_fixed(&input, mode);
        for (i, (&q, &f)) in fixed.iter().zip(reference.iter()).enumerate() {
            assert!(
                (f64::from(q) - f).abs() <= 2.0,
                "{:?} sample {}: fixed {} vs float {:.3}",
                mode,
                i,
                q,
                f
            );
        }
    }
}

#[test]
fn test_fixed_tracks_float_on_pulse_train() {
    let input = test_signals::efm_pulse_train(20000, 16000, 3);
    let reference = filter_float(&test_signals::to_f64(&input));

    for mode in MODES {
        let fixed = filter_fixed(&input, mode);
        let max_error = fixed
            .iter()
            .zip(reference.iter())
            .map(|(&q, &f)| (f64::from(q) - f).abs())
            .fold(0.0f64, f64::max);
        assert!(max_error <= 2.0, "{:?}: max error {:.3}", mode, max_error);
    }
}

#[test]
fn test_error_feedback_has_no_drift() {
    let input = test_signals::efm_pulse_train(20000, 16000, 5);
    let reference = filter_float(&test_signals::to_f64(&input));
    let fixed = filter_fixed(&input, RoundingMode::ErrorFeedback);

    // The remainder is carried forward, so truncation errors cancel instead
    // of accumulating.
    let cumulative: f64 = fixed
        .iter()
        .zip(reference.iter())
        .map(|(&q, &f)| f64::from(q) - f)
        .sum();
    assert!(cumulative.abs() < 2.0, "Cumulative error {:.3}", cumulative);
}

#[test]
fn test_saturation_pins_to_rails() {
    for mode in MODES {
        let mut processor = IsiProcessor::with_rounding(FilterPath::Fixed, mode);
        let mut high = test_signals::worst_case_full_scale(true);
        processor.filter_buffer(SampleBuffer::Fixed(&mut high)).unwrap();
        assert_eq!(high[ISI_TAPS - 1], i16::MAX);

        let mut processor = IsiProcessor::with_rounding(FilterPath::Fixed, mode);
        let mut low = test_signals::worst_case_full_scale(false);
        processor.filter_buffer(SampleBuffer::Fixed(&mut low)).unwrap();
        assert_eq!(low[ISI_TAPS - 1], i16::MIN);
        assert!(processor.saturation_stats().low >= 1);
    }
}

#[test]
fn test_saturation_is_counted_and_resettable() {
    let mut processor = IsiProcessor::new(FilterPath::Fixed);
    let mut samples = test_signals::worst_case_full_scale(true);
    processor.filter_buffer(SampleBuffer::Fixed(&mut samples)).unwrap();

    let rail_hits = samples
        .iter()
        .filter(|&&s| s == i16::MAX || s == i16::MIN)
        .count() as u64;
    let stats = processor.saturation_stats();
    assert!(stats.total() >= 1);
    assert!(stats.total() <= rail_hits);

    processor.reset_saturation_stats();
    assert_eq!(processor.saturation_stats().total(), 0);

    processor.reset();
    let mut quiet = test_signals::sinusoid(1000, 300.0, 8000.0);
    processor.filter_buffer(SampleBuffer::Fixed(&mut quiet)).unwrap();
    assert_eq!(processor.saturation_stats().total(), 0);
}

#[test]
fn test_independent_engines_in_parallel() {
    let a = test_signals::efm_pulse_train(10000, 15000, 1);
    let b = test_signals::sinusoid(10000, 1234.0, 14000.0);

    let expected_a = filter_fixed(&a, RoundingMode::ErrorFeedback);
    let expected_b = filter_float(&test_signals::to_f64(&b));

    let (got_a, got_b) = std::thread::scope(|s| {
        let ha = s.spawn(|| {
            let mut processor = IsiProcessor::new(FilterPath::Fixed);
            let mut samples = a.clone();
            for chunk in samples.chunks_mut(333) {
                processor.filter_buffer(SampleBuffer::Fixed(chunk)).unwrap();
            }
            samples
        });
        let hb = s.spawn(|| {
            let mut processor = IsiProcessor::new(FilterPath::Float);
            let mut samples = test_signals::to_f64(&b);
            for chunk in samples.chunks_mut(777) {
                processor.filter_buffer(SampleBuffer::Float(chunk)).unwrap();
            }
            samples
        });
        (ha.join().unwrap(), hb.join().unwrap())
    });

    assert_eq!(got_a, expected_a);
    assert_eq!(got_b, expected_b);
}
