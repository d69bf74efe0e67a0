use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use crate::error::{IsiError, Result};

/// Read a mono 16-bit PCM WAV file, returning its samples and sample rate
pub fn read_wav_i16<P: AsRef<Path>>(path: P) -> Result<(Vec<i16>, u32)> {
    let reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int
    {
        return Err(IsiError::Config(format!(
            "Expected mono 16-bit integer WAV, got {} channels, {} bits, {:?}",
            spec.channels, spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((samples, spec.sample_rate))
}

/// Write samples as a mono 16-bit PCM WAV file
pub fn save_wav_i16<P: AsRef<Path>>(path: P, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}
