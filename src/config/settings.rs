use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use url::Url;

use crate::config::env::{self, EnvKey};
use crate::infrastructure::process::ToolCommand;

pub const DEFAULT_DOWNLOADER_CMD: &str = "python3 -m yt_dlp";
pub const DEFAULT_VIDEO_SOURCE_URL: &str = "https://www.youtube.com/watch";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_port: u16,
    pub temp_dir: PathBuf,
    pub min_videos: usize,
    pub max_videos: usize,
    /// Per-video ceiling, in seconds.
    pub max_video_duration: f64,
    pub max_video_height: u32,
    pub downloader: ToolCommand,
    pub ffprobe: ToolCommand,
    pub ffmpeg: ToolCommand,
    pub download_timeout: Duration,
    pub probe_timeout: Duration,
    pub encode_timeout: Duration,
    pub acquire_concurrency: usize,
    /// Watch page the identifier is appended to as the `v` query parameter.
    pub video_source_url: String,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let temp_dir = match env::get(EnvKey::TempDir) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
            _ => std::env::temp_dir(),
        };

        let config = Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            temp_dir: std::path::absolute(&temp_dir)
                .with_context(|| format!("Invalid TEMP_DIR {}", temp_dir.display()))?,
            min_videos: env::get_parsed(EnvKey::MinVideos, 2),
            max_videos: env::get_parsed(EnvKey::MaxVideos, 5),
            max_video_duration: env::get_parsed(EnvKey::MaxVideoDuration, 600.0),
            max_video_height: env::get_parsed(EnvKey::MaxVideoHeight, 720),
            downloader: ToolCommand::parse(&env::get_or(EnvKey::DownloaderCmd, DEFAULT_DOWNLOADER_CMD))
                .ok_or_else(|| anyhow!("DOWNLOADER_CMD must not be empty"))?,
            ffprobe: ToolCommand::parse(&env::get_or(EnvKey::FfprobeCmd, "ffprobe"))
                .ok_or_else(|| anyhow!("FFPROBE_CMD must not be empty"))?,
            ffmpeg: ToolCommand::parse(&env::get_or(EnvKey::FfmpegCmd, "ffmpeg"))
                .ok_or_else(|| anyhow!("FFMPEG_CMD must not be empty"))?,
            download_timeout: Duration::from_secs(env::get_parsed(EnvKey::DownloadTimeout, 600)),
            probe_timeout: Duration::from_secs(env::get_parsed(EnvKey::ProbeTimeout, 30)),
            encode_timeout: Duration::from_secs(env::get_parsed(EnvKey::EncodeTimeout, 1800)),
            acquire_concurrency: env::get_parsed(EnvKey::AcquireConcurrency, 1),
            video_source_url: env::get_or(EnvKey::VideoSourceUrl, DEFAULT_VIDEO_SOURCE_URL),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_videos < 1 {
            bail!("MIN_VIDEOS must be at least 1");
        }
        if self.min_videos > self.max_videos {
            bail!(
                "MIN_VIDEOS ({}) must not exceed MAX_VIDEOS ({})",
                self.min_videos,
                self.max_videos
            );
        }
        if !self.max_video_duration.is_finite() || self.max_video_duration <= 0.0 {
            bail!("MAX_VIDEO_DURATION_SECS must be a positive number");
        }
        if self.acquire_concurrency == 0 {
            bail!("ACQUIRE_CONCURRENCY must be at least 1");
        }
        Url::parse(&self.video_source_url).context("Invalid VIDEO_SOURCE_URL")?;
        Ok(())
    }
}

impl Default for AppConfig {
    /// Built-in defaults, ignoring the environment.
    fn default() -> Self {
        Self {
            server_port: 3000,
            temp_dir: std::env::temp_dir(),
            min_videos: 2,
            max_videos: 5,
            max_video_duration: 600.0,
            max_video_height: 720,
            downloader: ToolCommand::new("python3", ["-m", "yt_dlp"]),
            ffprobe: ToolCommand::bare("ffprobe"),
            ffmpeg: ToolCommand::bare("ffmpeg"),
            download_timeout: Duration::from_secs(600),
            probe_timeout: Duration::from_secs(30),
            encode_timeout: Duration::from_secs(1800),
            acquire_concurrency: 1,
            video_source_url: DEFAULT_VIDEO_SOURCE_URL.to_string(),
        }
    }
}
