// src/main.rs

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use chargestation::animation::{
    default_output_path, render_animation, AnimationSettings, ExportFormat, Layout,
};
use chargestation::constants::{
    DEFAULT_ANIMATION_FRAMES, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_OUTPUT_CSV,
};
use chargestation::data_input::log_parser::parse_telemetry_file;
use chargestation::data_input::log_writer::write_telemetry_file;
use chargestation::simulation::config::{PidConfig, SimulationConfig};
use chargestation::simulation::runner::run_simulation;

#[derive(Parser, Debug)]
#[command(author, version = chargestation::crate_version(), about = "Charge station balance simulator and animator", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate the robot driving onto the charge station and write the CSV log
    Simulate(SimulateArgs),
    /// Render a CSV log as an animation
    Animate(AnimateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// TOML file with simulation parameters
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_CSV, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Constant motor power in [-1, 1] (ignored when a controller is configured)
    #[arg(long, allow_hyphen_values = true)]
    power: Option<f64>,

    /// Simulated seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Integration step in seconds
    #[arg(long)]
    time_step: Option<f64>,

    /// Proportional gain; any gain flag enables the balancing controller
    #[arg(long)]
    kp: Option<f64>,

    /// Integral gain
    #[arg(long)]
    ki: Option<f64>,

    /// Derivative gain
    #[arg(long)]
    kd: Option<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    TwoPanel,
    SinglePanel,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::TwoPanel => Layout::TwoPanel,
            LayoutArg::SinglePanel => Layout::SinglePanel,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Gif,
    Mp4,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Gif => ExportFormat::Gif,
            FormatArg::Mp4 => ExportFormat::Mp4,
        }
    }
}

#[derive(Args, Debug)]
struct AnimateArgs {
    /// CSV log with time, position and angle columns
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Robot length in meters
    robot_length: f64,

    #[arg(long, value_enum, default_value_t = LayoutArg::TwoPanel)]
    layout: LayoutArg,

    /// Number of frames to render (capped by the number of rows)
    #[arg(long, default_value_t = DEFAULT_ANIMATION_FRAMES)]
    frames: usize,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_INTERVAL_MS)]
    interval_ms: u32,

    #[arg(long, value_enum, default_value_t = FormatArg::Gif)]
    format: FormatArg,

    /// Output file (defaults to the input path with the format's extension)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Frame width in pixels (defaults per layout)
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels (defaults per layout)
    #[arg(long)]
    height: Option<u32>,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(power) = args.power {
        config.power = power;
    }
    if let Some(duration) = args.duration {
        config.duration = duration;
    }
    if let Some(time_step) = args.time_step {
        config.time_step = time_step;
    }
    if args.kp.is_some() || args.ki.is_some() || args.kd.is_some() {
        let pid = config.controller.get_or_insert_with(PidConfig::default);
        pid.p = args.kp.unwrap_or(pid.p);
        pid.i = args.ki.unwrap_or(pid.i);
        pid.d = args.kd.unwrap_or(pid.d);
    }

    let rows = run_simulation(&config)?;
    write_telemetry_file(&args.output, &rows)?;
    info!("Animate with: chargestation animate {} {}", args.output.display(), config.length);
    Ok(())
}

fn animate(args: AnimateArgs) -> Result<()> {
    let log = parse_telemetry_file(&args.input)?;

    let layout = Layout::from(args.layout);
    let format = ExportFormat::from(args.format);
    let (default_width, default_height) = layout.default_size();
    let settings = AnimationSettings {
        layout,
        frames: args.frames,
        interval_ms: args.interval_ms,
        width: args.width.unwrap_or(default_width),
        height: args.height.unwrap_or(default_height),
        robot_length: args.robot_length,
        title: args.input.display().to_string(),
    };

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, format));
    render_animation(&log, &settings, format, &output)
        .with_context(|| format!("Failed to render {}", display_name(&args.input)))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Simulate(args) => simulate(args),
        Command::Animate(args) => animate(args),
    }
}
