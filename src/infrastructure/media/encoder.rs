use std::path::Path;
use std::time::Duration;
use tracing::info;

use super::{ensure_output, MediaError};
use crate::infrastructure::process::{ProcessRunner, ToolCommand};

/// Fixed output profile for combined videos. Every input is re-encoded so
/// clips with different frame rates or codecs can be joined.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeProfile {
    pub fps: u32,
    pub pixel_format: &'static str,
    pub video_codec: &'static str,
    pub preset: &'static str,
    pub crf: u8,
    pub audio_codec: &'static str,
    pub audio_bitrate: &'static str,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            fps: 30,
            pixel_format: "yuv420p",
            video_codec: "libx264",
            preset: "fast",
            crf: 23,
            audio_codec: "aac",
            audio_bitrate: "192k",
        }
    }
}

impl EncodeProfile {
    pub fn video_filter(&self) -> String {
        format!("fps={},format={}", self.fps, self.pixel_format)
    }

    fn output_args(&self) -> Vec<String> {
        vec![
            "-vf".into(),
            self.video_filter(),
            "-c:v".into(),
            self.video_codec.into(),
            "-preset".into(),
            self.preset.into(),
            "-crf".into(),
            self.crf.to_string(),
            "-c:a".into(),
            self.audio_codec.into(),
            "-b:a".into(),
            self.audio_bitrate.into(),
            "-strict".into(),
            "experimental".into(),
        ]
    }
}

/// Joins the files listed in `manifest` into `output` in one ffmpeg run.
pub async fn encode_concat(
    runner: &dyn ProcessRunner,
    cmd: &ToolCommand,
    manifest: &Path,
    output: &Path,
    profile: &EncodeProfile,
    timeout: Duration,
) -> Result<(), MediaError> {
    info!("🎬 Combining videos into {}", output.display());

    let invocation = cmd
        .invocation(timeout)
        .args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-y",
            "-f",
            "concat",
            "-safe",
            "0",
            "-i",
        ])
        .arg(manifest)
        .args(profile.output_args())
        .arg(output);

    let result = runner.run(&invocation).await?;
    if !result.success {
        return Err(MediaError::Failed {
            tool: cmd.program.clone(),
            code: result.code,
            diagnostic: result.stderr_tail(10),
        });
    }

    ensure_output(&cmd.program, output).await
}
