// src/video_export.rs

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

use crate::constants::FRAME_FILE_PATTERN;

/// Directory holding the PNG frames for `output`: `<stem>_frames` beside it.
pub fn frames_dir_for(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "animation".to_string());
    output.with_file_name(format!("{stem}_frames"))
}

/// Frame file matching `FRAME_FILE_PATTERN`.
pub fn frame_path(frames_dir: &Path, frame: usize) -> PathBuf {
    frames_dir.join(format!("frame_{frame:06}.png"))
}

/// Empties `frames_dir` (creating it if needed) so no frames from an
/// earlier render end up in the new video.
pub fn prepare_frames_dir(frames_dir: &Path) -> Result<()> {
    if frames_dir.exists() {
        fs::remove_dir_all(frames_dir)
            .with_context(|| format!("Failed to clear old frames in {}", frames_dir.display()))?;
    }
    fs::create_dir_all(frames_dir)
        .with_context(|| format!("Failed to create {}", frames_dir.display()))
}

/// ffmpeg `-framerate` value for a frame interval, as an exact rational.
pub fn framerate_for_interval(interval_ms: u32) -> String {
    format!("1000/{}", interval_ms.max(1))
}

fn ffmpeg_available() -> bool {
    Command::new("ffmpeg").arg("-version").output().is_ok()
}

/// Encodes `frames_dir/frame_%06d.png` into an H.264 MP4 and returns whether
/// the video was written. When ffmpeg is not on PATH or fails, a warning is
/// logged and `false` is returned.
pub fn encode_mp4(frames_dir: &Path, interval_ms: u32, out_mp4: &Path) -> Result<bool> {
    if !ffmpeg_available() {
        warn!(
            "ffmpeg not found on PATH; MP4 will not be created. Frames kept in '{}'.",
            frames_dir.display()
        );
        return Ok(false);
    }

    info!("Encoding MP4...");
    let input_pattern = frames_dir.join(FRAME_FILE_PATTERN);
    let status = Command::new("ffmpeg")
        .arg("-y")
        .arg("-loglevel")
        .arg("error")
        .arg("-framerate")
        .arg(framerate_for_interval(interval_ms))
        .arg("-i")
        .arg(&input_pattern)
        .arg("-c:v")
        .arg("libx264")
        .arg("-pix_fmt")
        .arg("yuv420p")
        .arg(out_mp4)
        .status()
        .context("Failed to run ffmpeg")?;

    if status.success() {
        info!("MP4 created: {}", out_mp4.display());
    } else {
        warn!("ffmpeg encoding failed ({status}); frames kept in '{}'.", frames_dir.display());
    }
    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_dir_sits_beside_output() {
        assert_eq!(
            frames_dir_for(Path::new("out/run.mp4")),
            PathBuf::from("out/run_frames")
        );
    }

    #[test]
    fn frame_names_are_zero_padded() {
        assert_eq!(
            frame_path(Path::new("f"), 42),
            PathBuf::from("f/frame_000042.png")
        );
    }

    #[test]
    fn framerate_is_exact_rational() {
        assert_eq!(framerate_for_interval(10), "1000/10");
        assert_eq!(framerate_for_interval(30), "1000/30");
        assert_eq!(framerate_for_interval(5000), "1000/5000");
        assert_eq!(framerate_for_interval(0), "1000/1");
    }

    #[test]
    fn prepare_removes_old_frames() {
        let dir = std::env::temp_dir().join(format!("chargestation_frames_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for frame in 0..5 {
            fs::write(frame_path(&dir, frame), b"old").unwrap();
        }

        prepare_frames_dir(&dir).unwrap();
        let remaining = fs::read_dir(&dir).unwrap().count();
        fs::remove_dir_all(&dir).ok();

        assert!(remaining == 0);
    }
}

// src/video_export.rs
