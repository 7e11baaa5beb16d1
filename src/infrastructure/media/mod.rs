use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::settings::AppConfig;
use crate::infrastructure::process::{ProcessError, ProcessRunner, ToolCommand};

pub mod downloader;
pub mod encoder;
pub mod manifest;
pub mod prober;

pub use downloader::download_video;
pub use encoder::{encode_concat, EncodeProfile};
pub use manifest::{ConcatManifest, ManifestError};
pub use prober::probe_duration;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("{tool} exited with code {}: {diagnostic}", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    Failed {
        tool: String,
        code: Option<i32>,
        diagnostic: String,
    },

    #[error("{tool} produced unexpected output: {output:?}")]
    BadOutput { tool: String, output: String },

    #[error("{tool} reported success but did not create {path}")]
    MissingOutput { tool: String, path: String },

    #[error("Invalid video URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl MediaError {
    /// Name of the missing executable, if that is what went wrong.
    pub fn missing_tool(&self) -> Option<&str> {
        match self {
            MediaError::Process(ProcessError::NotFound { program }) => Some(program.as_str()),
            _ => None,
        }
    }
}

async fn ensure_output(tool: &str, path: &Path) -> Result<(), MediaError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(MediaError::MissingOutput {
            tool: tool.to_string(),
            path: path.display().to_string(),
        }),
    }
}

/// Checks that every configured tool can be started. Returns the ones that
/// could not. Used at startup for an early warning only.
pub async fn check_dependencies(runner: &dyn ProcessRunner, config: &AppConfig) -> Vec<String> {
    let checks: [(&ToolCommand, &str); 3] = [
        (&config.downloader, "--version"),
        (&config.ffprobe, "-version"),
        (&config.ffmpeg, "-version"),
    ];

    let mut missing = Vec::new();
    for (cmd, flag) in checks {
        let invocation = cmd.invocation(Duration::from_secs(15)).arg(flag);
        match runner.run(&invocation).await {
            Ok(out) if out.success => info!("✅ Found {}", cmd),
            Ok(out) => {
                warn!("⚠️ {} is present but failed its version check: {}", cmd, out.stderr_tail(3));
                missing.push(cmd.to_string());
            }
            Err(e) => {
                warn!("⚠️ {}", e);
                missing.push(cmd.to_string());
            }
        }
    }
    missing
}
