use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

use isifilter::config::{FilterPath, IsiConfig, RoundingMode};
use isifilter::processing::{IsiProcessor, SAMPLE_WIDTH};
use isifilter::{read_wav_i16, save_wav_i16};

#[derive(Parser, Debug)]
#[command(name = "isifilter")]
#[command(about = "Apply the raised-cosine ISI filter to a 16-bit sample stream", long_about = None)]
struct Args {
    /// Input samples: raw little-endian i16, or mono 16-bit WAV (by extension); "-" for stdin
    input: PathBuf,

    /// Output file, same container as the input; "-" for stdout (raw only)
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Numeric path (overrides the config file)
    #[arg(short = 'p', long, value_enum)]
    path: Option<FilterPath>,

    /// Fixed-path rounding rule (overrides the config file)
    #[arg(short = 'r', long, value_enum)]
    rounding: Option<RoundingMode>,

    /// Samples per processing chunk (overrides the config file)
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Summary format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Increase log verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct Summary {
    input: String,
    output: String,
    path: String,
    rounding: String,
    samples: u64,
    saturated_high: u64,
    saturated_low: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = resolve_config(&args)?;
    log::info!(
        "Filtering {} -> {} (path={}, rounding={:?}, chunk={})",
        args.input.display(),
        args.output.display(),
        config.path,
        config.rounding,
        config.chunk_size
    );

    let mut processor = IsiProcessor::from_config(&config);

    let samples = if is_wav(&args.input) {
        filter_wav(&args, &config, &mut processor)?
    } else {
        filter_raw(&args, &config, &mut processor)?
    };

    let stats = processor.saturation_stats();
    let summary = Summary {
        input: args.input.display().to_string(),
        output: args.output.display().to_string(),
        path: config.path.to_string(),
        rounding: format!("{:?}", config.rounding),
        samples,
        saturated_high: stats.high,
        saturated_low: stats.low,
    };

    match args.format {
        ReportFormat::Text => {
            eprintln!("Samples filtered: {}", summary.samples);
            eprintln!(
                "Saturated: {} ({} high, {} low)",
                stats.total(),
                summary.saturated_high,
                summary.saturated_low
            );
        }
        ReportFormat::Json => {
            eprintln!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

fn resolve_config(args: &Args) -> anyhow::Result<IsiConfig> {
    let mut config = match &args.config {
        Some(path) => IsiConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => IsiConfig::default(),
    };

    if let Some(path) = args.path {
        config.path = path;
    }
    if let Some(rounding) = args.rounding {
        config.rounding = rounding;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    config.validate()?;
    Ok(config)
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

fn filter_wav(
    args: &Args,
    config: &IsiConfig,
    processor: &mut IsiProcessor,
) -> anyhow::Result<u64> {
    let (mut samples, sample_rate) = read_wav_i16(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    for chunk in samples.chunks_mut(config.chunk_size) {
        processor.filter_i16(chunk);
    }

    save_wav_i16(&args.output, &samples, sample_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    Ok(samples.len() as u64)
}

fn filter_raw(
    args: &Args,
    config: &IsiConfig,
    processor: &mut IsiProcessor,
) -> anyhow::Result<u64> {
    let mut reader: Box<dyn Read> = if args.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open {}", args.input.display()))?;
        Box::new(BufReader::new(file))
    };
    let mut writer: Box<dyn Write> = if args.output.as_os_str() == "-" {
        Box::new(io::stdout().lock())
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("Failed to create {}", args.output.display()))?;
        Box::new(BufWriter::new(file))
    };

    let mut buffer = vec![0u8; config.chunk_size * SAMPLE_WIDTH];
    let mut total_bytes = 0u64;
    loop {
        let n = read_chunk(&mut reader, &mut buffer)?;
        if n == 0 {
            break;
        }
        processor
            .filter_bytes(&mut buffer[..n])
            .with_context(|| format!("Input ends with a partial sample after {} bytes", total_bytes))?;
        writer.write_all(&buffer[..n])?;
        total_bytes += n as u64;
    }
    writer.flush()?;

    Ok(total_bytes / SAMPLE_WIDTH as u64)
}

/// Fill `buffer` from `reader`, returning fewer bytes only at end of input
fn read_chunk(reader: &mut dyn Read, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
