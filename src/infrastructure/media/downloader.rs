use std::path::Path;
use std::time::Duration;
use tracing::info;
use url::Url;

use super::{ensure_output, MediaError};
use crate::infrastructure::process::{ProcessRunner, ToolCommand};

/// Builds the watch URL for `id`, e.g. `https://www.youtube.com/watch?v=<id>`.
pub fn watch_url(base: &str, id: &str) -> Result<Url, MediaError> {
    Url::parse_with_params(base, &[("v", id)]).map_err(MediaError::InvalidUrl)
}

/// yt-dlp format selector capping the resolution.
pub fn format_selector(max_height: u32) -> String {
    format!("best[height<={}]", max_height)
}

pub async fn download_video(
    runner: &dyn ProcessRunner,
    cmd: &ToolCommand,
    source_url: &str,
    id: &str,
    dest: &Path,
    max_height: u32,
    timeout: Duration,
) -> Result<(), MediaError> {
    let url = watch_url(source_url, id)?;
    info!("⬇️ Downloading {} to {}", url, dest.display());

    let invocation = cmd
        .invocation(timeout)
        .args(["--no-playlist", "-f"])
        .arg(format_selector(max_height))
        .arg("-o")
        .arg(dest)
        .arg("--")
        .arg(url.as_str());

    let output = runner.run(&invocation).await?;
    if !output.success {
        return Err(MediaError::Failed {
            tool: cmd.program.clone(),
            code: output.code,
            diagnostic: output.stderr_tail(5),
        });
    }

    ensure_output(&cmd.program, dest).await
}
