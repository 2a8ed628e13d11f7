use std::fs::File;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pcmstream_convert_core::{ConversionSession, FormatCode, FormatRequest};

/// Simple demo converting a raw PCM file between formats and rates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file (raw interleaved PCM)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Source format (u8, s16, s24, s32, f32, f64)
    #[arg(long, default_value = "s16")]
    src_format: String,

    /// Source sample rate in Hz
    #[arg(long, default_value = "48000")]
    src_rate: u32,

    /// Source channel count
    #[arg(long, default_value = "2")]
    src_channels: u8,

    /// Destination format (u8, s16, s32, f32, f64)
    #[arg(long, default_value = "s16")]
    dst_format: String,

    /// Destination sample rate in Hz
    #[arg(long, default_value = "48000")]
    dst_rate: u32,

    /// Destination channel count
    #[arg(long, default_value = "2")]
    dst_channels: u8,

    /// Bytes fed to the session per call
    #[arg(long, default_value = "4096")]
    chunk_bytes: usize,

    /// Print statistics
    #[arg(short, long)]
    stats: bool,
}

fn parse_format(name: &str) -> Option<FormatCode> {
    match name.to_lowercase().as_str() {
        "u8" => Some(FormatCode::U8),
        "s16" => Some(FormatCode::S16),
        "s24" => Some(FormatCode::S24),
        "s32" => Some(FormatCode::S32),
        "f32" => Some(FormatCode::F32),
        "f64" => Some(FormatCode::F64),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let src_format = parse_format(&args.src_format)
        .ok_or_else(|| format!("unknown source format: {}", args.src_format))?;
    let dst_format = parse_format(&args.dst_format)
        .ok_or_else(|| format!("unknown destination format: {}", args.dst_format))?;

    let mut session = ConversionSession::new(
        FormatRequest::new(src_format, args.src_rate, args.src_channels),
        FormatRequest::new(dst_format, args.dst_rate, args.dst_channels),
    )?;

    let mut input_data = Vec::new();
    File::open(&args.input)?.read_to_end(&mut input_data)?;
    println!("Read {} bytes from {}", input_data.len(), args.input.display());

    // Feed whole source frames per call; warn about a partial trailing frame
    let frame_bytes = (src_format.bit_depth() as usize / 8) * args.src_channels as usize;
    if input_data.len() % frame_bytes != 0 {
        eprintln!(
            "Warning: input size is not a multiple of {} bytes, truncating.",
            frame_bytes
        );
        input_data.truncate(input_data.len() - input_data.len() % frame_bytes);
    }
    let chunk_bytes = args.chunk_bytes.max(frame_bytes) / frame_bytes * frame_bytes;

    let mut output_file = File::create(&args.output)?;
    let mut bytes_out = 0usize;
    let mut calls = 0usize;
    let start_time = Instant::now();

    for chunk in input_data.chunks(chunk_bytes) {
        let buffer = session.convert(chunk)?;
        output_file.write_all(&buffer.data)?;
        bytes_out += buffer.len();
        calls += 1;
    }

    let drained = session.flush()?;
    output_file.write_all(&drained.data)?;
    bytes_out += drained.len();

    println!(
        "Wrote {} bytes to {} ({} drained by flush)",
        bytes_out,
        args.output.display(),
        drained.len()
    );

    if args.stats {
        let elapsed = start_time.elapsed();
        println!("Conversion calls: {}", calls);
        println!("Elapsed: {:.3}s", elapsed.as_secs_f64());
        println!(
            "Input: {} @ {}Hz, {}ch -> Output: {} @ {}Hz, {}ch",
            args.src_format,
            args.src_rate,
            args.src_channels,
            args.dst_format,
            args.dst_rate,
            args.dst_channels
        );
    }

    Ok(())
}
