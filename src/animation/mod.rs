// src/animation/mod.rs

pub mod scene;

use anyhow::{bail, ensure, Context, Result};
use plotters::backend::BitMapBackend;
use plotters::drawing::IntoDrawingArea;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::{
    DEFAULT_ANIMATION_FRAMES, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_ROBOT_LENGTH_M,
    SINGLE_PANEL_HEIGHT, SINGLE_PANEL_WIDTH, TWO_PANEL_HEIGHT, TWO_PANEL_WIDTH,
};
use crate::data_input::log_data::TelemetryLog;
use crate::plot_framework::{draw_frame, StaticBounds};
use crate::video_export;
use scene::{frame_count, FrameScene};

/// Panel arrangement of the rendered frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Scene on top, angle-vs-time trace below.
    #[default]
    TwoPanel,
    /// Scene only.
    SinglePanel,
}

impl Layout {
    pub fn default_size(self) -> (u32, u32) {
        match self {
            Layout::TwoPanel => (TWO_PANEL_WIDTH, TWO_PANEL_HEIGHT),
            Layout::SinglePanel => (SINGLE_PANEL_WIDTH, SINGLE_PANEL_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Gif,
    /// PNG frames encoded by ffmpeg.
    Mp4,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Gif => "gif",
            ExportFormat::Mp4 => "mp4",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    pub layout: Layout,
    pub frames: usize,
    pub interval_ms: u32,
    pub width: u32,
    pub height: u32,
    pub robot_length: f64,
    pub title: String,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        let layout = Layout::default();
        let (width, height) = layout.default_size();
        Self {
            layout,
            frames: DEFAULT_ANIMATION_FRAMES,
            interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            width,
            height,
            robot_length: DEFAULT_ROBOT_LENGTH_M,
            title: String::new(),
        }
    }
}

/// Output file next to the log, with the format's extension.
pub fn default_output_path(csv_path: &Path, format: ExportFormat) -> PathBuf {
    csv_path.with_extension(format.extension())
}

/// Renders the log to `output`, one frame per row played back from the
/// start of the run.
pub fn render_animation(
    log: &TelemetryLog,
    settings: &AnimationSettings,
    format: ExportFormat,
    output: &Path,
) -> Result<()> {
    ensure!(settings.robot_length > 0.0, "Robot length must be positive, got {}", settings.robot_length);
    ensure!(settings.interval_ms > 0, "Frame interval must be positive");
    ensure!(settings.width > 0 && settings.height > 0, "Frame size must be positive");
    let Some(bounds) = StaticBounds::from_log(log) else {
        bail!("Cannot animate an empty log");
    };

    let frames = frame_count(log.len(), settings.frames);
    if frames < settings.frames {
        warn!("Log has {} rows; rendering {} frames instead of {}.", log.len(), frames, settings.frames);
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    info!("Rendering {} frames ({:?}) to '{}'...", frames, settings.layout, output.display());
    match format {
        ExportFormat::Gif => render_gif(log, settings, &bounds, frames, output)?,
        ExportFormat::Mp4 => render_mp4(log, settings, &bounds, frames, output)?,
    }
    Ok(())
}

fn scene_for(log: &TelemetryLog, frame: usize, robot_length: f64) -> Result<FrameScene> {
    FrameScene::compute(log, frame, robot_length)
        .with_context(|| format!("No row for frame {frame}"))
}

fn render_gif(
    log: &TelemetryLog,
    settings: &AnimationSettings,
    bounds: &StaticBounds,
    frames: usize,
    output: &Path,
) -> Result<()> {
    let root = BitMapBackend::gif(output, (settings.width, settings.height), settings.interval_ms)
        .with_context(|| format!("Failed to create {}", output.display()))?
        .into_drawing_area();

    for frame in 0..frames {
        let scene = scene_for(log, frame, settings.robot_length)?;
        draw_frame(&root, settings.layout, &settings.title, bounds, &scene)?;
        root.present()?;
        if frame % 100 == 0 {
            debug!("  frame {}/{}", frame, frames);
        }
    }
    info!("  Animation saved as '{}'.", output.display());
    Ok(())
}

fn render_mp4(
    log: &TelemetryLog,
    settings: &AnimationSettings,
    bounds: &StaticBounds,
    frames: usize,
    output: &Path,
) -> Result<()> {
    let frames_dir = video_export::frames_dir_for(output);
    video_export::prepare_frames_dir(&frames_dir)?;

    for frame in 0..frames {
        let scene = scene_for(log, frame, settings.robot_length)?;
        let frame_path = video_export::frame_path(&frames_dir, frame);
        let root = BitMapBackend::new(&frame_path, (settings.width, settings.height)).into_drawing_area();
        draw_frame(&root, settings.layout, &settings.title, bounds, &scene)?;
        root.present()
            .with_context(|| format!("Failed to write {}", frame_path.display()))?;
        if frame % 100 == 0 {
            debug!("  frame {}/{}", frame, frames);
        }
    }
    info!("  {} frames written to '{}'.", frames, frames_dir.display());

    if video_export::encode_mp4(&frames_dir, settings.interval_ms, output)? {
        fs::remove_dir_all(&frames_dir)
            .with_context(|| format!("Failed to remove {}", frames_dir.display()))?;
    }
    Ok(())
}


// src/animation/mod.rs
