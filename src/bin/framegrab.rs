use std::{fs, path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use framegrab::{
    ExtractOptions, ExtractedFrame, FfmpegLogLevel, LumaWeights, ProgressCallback, ProgressInfo,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

const CLI_AFTER_HELP: &str = "Examples:\n  framegrab input.mp4 0 0.299 0.587 0.114\n  framegrab input.mkv 250 0.3 0.59 0.11 --out-dir grabs --progress\n  framegrab input.mp4 10 1 1 1 --no-display --json";

#[derive(Debug, Parser)]
#[command(
    name = "framegrab",
    version,
    about = "Write one video frame as frame.ppm plus a weighted grayscale frame.pgm, then show both",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input media path.
    input: PathBuf,

    /// Zero-based index of the frame to capture.
    frame_index: u64,

    /// Red weight of the grayscale sum.
    #[arg(allow_negative_numbers = true)]
    weight_r: f64,

    /// Green weight of the grayscale sum.
    #[arg(allow_negative_numbers = true)]
    weight_g: f64,

    /// Blue weight of the grayscale sum.
    #[arg(allow_negative_numbers = true)]
    weight_b: f64,

    /// Directory that receives frame.ppm and frame.pgm (created if missing).
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Write the rasters without opening preview windows.
    #[arg(long)]
    no_display: bool,

    /// Show debug logging.
    #[arg(long)]
    verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<FfmpegLogLevel>,

    /// Show a progress bar while decoding up to the frame.
    #[arg(long)]
    progress: bool,

    /// Print a JSON summary of the written files to stdout.
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn weights(&self) -> LumaWeights {
        LumaWeights::new(self.weight_r, self.weight_g, self.weight_b)
    }
}

struct DecodeProgress {
    bar: ProgressBar,
}

impl DecodeProgress {
    fn new(target: u64) -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(target);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} frames {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for DecodeProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_position(info.decoded.min(info.target));
    }
}

fn init_logger(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Trace)
        .set_time_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

fn print_summary(cli: &Cli, frame: &ExtractedFrame) -> Result<(), Box<dyn std::error::Error>> {
    if cli.json {
        let payload = json!({
            "input": cli.input.display().to_string(),
            "frame_index": frame.frame_index,
            "width": frame.width,
            "height": frame.height,
            "weights": [cli.weight_r, cli.weight_g, cli.weight_b],
            "color_path": frame.color_path.display().to_string(),
            "gray_path": frame.gray_path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{} {}", "saved".green().bold(), frame.color_path.display());
        println!("{} {}", "saved".green().bold(), frame.gray_path.display());
    }
    Ok(())
}

#[cfg(feature = "viewer")]
fn display(frame: &ExtractedFrame) -> Result<(), Box<dyn std::error::Error>> {
    framegrab::viewer::show(&frame.viewer_entries())?;
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn display(_frame: &ExtractedFrame) -> Result<(), Box<dyn std::error::Error>> {
    log::warn!("built without the `viewer` feature, skipping preview");
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    if let Some(level) = cli.log_level {
        framegrab::set_ffmpeg_log_level(level);
    }

    if !cli.out_dir.exists() {
        fs::create_dir_all(&cli.out_dir)?;
    }

    let mut options = ExtractOptions::new().with_output_dir(&cli.out_dir);
    let progress = if cli.progress {
        let progress = Arc::new(DecodeProgress::new(cli.frame_index.saturating_add(1))?);
        options = options.with_progress(progress.clone());
        Some(progress)
    } else {
        None
    };

    let result = framegrab::extract_with_options(&cli.input, cli.frame_index, cli.weights(), &options);
    if let Some(progress) = progress {
        progress.bar.finish_and_clear();
    }
    let frame = result?;

    print_summary(&cli, &frame)?;

    if cli.no_display {
        return Ok(());
    }
    display(&frame)
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
