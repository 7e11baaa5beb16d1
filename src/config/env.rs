use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum EnvKey {
    ServerPort,
    TempDir,
    MinVideos,
    MaxVideos,
    MaxVideoDuration,
    MaxVideoHeight,
    DownloaderCmd,
    FfprobeCmd,
    FfmpegCmd,
    DownloadTimeout,
    ProbeTimeout,
    EncodeTimeout,
    AcquireConcurrency,
    VideoSourceUrl,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::TempDir => "TEMP_DIR",
            EnvKey::MinVideos => "MIN_VIDEOS",
            EnvKey::MaxVideos => "MAX_VIDEOS",
            EnvKey::MaxVideoDuration => "MAX_VIDEO_DURATION_SECS",
            EnvKey::MaxVideoHeight => "MAX_VIDEO_HEIGHT",
            EnvKey::DownloaderCmd => "DOWNLOADER_CMD",
            EnvKey::FfprobeCmd => "FFPROBE_CMD",
            EnvKey::FfmpegCmd => "FFMPEG_CMD",
            EnvKey::DownloadTimeout => "DOWNLOAD_TIMEOUT_SECS",
            EnvKey::ProbeTimeout => "PROBE_TIMEOUT_SECS",
            EnvKey::EncodeTimeout => "ENCODE_TIMEOUT_SECS",
            EnvKey::AcquireConcurrency => "ACQUIRE_CONCURRENCY",
            EnvKey::VideoSourceUrl => "VIDEO_SOURCE_URL",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    env::var(key.as_str()).unwrap_or_else(|_| default.to_string())
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    match get(key) {
        Ok(val) => val.trim().parse::<T>().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable value {:?} for {}", val, key.as_str());
            default
        }),
        Err(_) => default,
    }
}
