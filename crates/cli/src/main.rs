use std::process;
use std::time::{Duration, Instant};

use clap::Parser;

use framesource_core::{open_with, FrameSource, OpenOptions};

/// Read frames from an animated image, video file, capture device or stream.
#[derive(Parser)]
#[command(name = "framesource")]
struct Cli {
    /// File path, device index (e.g. 0) or stream URL.
    descriptor: String,

    /// Stop each pass after this many frames.
    #[arg(long)]
    max_frames: Option<usize>,

    /// Number of passes; the source is restarted between passes.
    #[arg(long, default_value = "1")]
    passes: usize,

    /// Network stream I/O timeout in milliseconds (0 = wait forever).
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// Capture demuxer for device indices (e.g. v4l2, avfoundation, dshow).
    #[arg(long)]
    device_format: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let options = build_options(&cli);
    let mut source = open_with(&cli.descriptor, &options)?;

    for pass in 1..=cli.passes {
        if pass > 1 {
            if let Err(e) = source.restart() {
                log::info!("Stopping after pass {}: {e}", pass - 1);
                break;
            }
        }
        let (frames, elapsed) = drain(source.as_mut(), cli.max_frames);
        println!(
            "pass {pass}: {frames} frames in {:.2}s{}",
            elapsed.as_secs_f64(),
            describe_length(source.length())
        );
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.passes == 0 {
        return Err("--passes must be at least 1".into());
    }
    if cli.max_frames == Some(0) {
        return Err("--max-frames must be at least 1".into());
    }
    Ok(())
}

fn build_options(cli: &Cli) -> OpenOptions {
    let timeout = (cli.timeout_ms > 0).then(|| Duration::from_millis(cli.timeout_ms));
    let options = OpenOptions::new().with_stream_timeout(timeout);
    match &cli.device_format {
        Some(name) => options.with_device_format(name.as_str()),
        None => options,
    }
}

/// Reads one pass, returning the frame count and wall time spent.
fn drain(source: &mut dyn FrameSource, max_frames: Option<usize>) -> (usize, Duration) {
    let start = Instant::now();
    let limit = max_frames.unwrap_or(usize::MAX);
    let mut count = 0;
    while count < limit {
        let Some(frame) = source.read() else {
            break;
        };
        log::debug!(
            "frame {}: {}x{} {}",
            frame.index(),
            frame.width(),
            frame.height(),
            frame.channel_order()
        );
        count += 1;
    }
    (count, start.elapsed())
}

fn describe_length(length: Option<usize>) -> String {
    match length {
        Some(n) => format!(" (of {n})"),
        None => String::new(),
    }
}
