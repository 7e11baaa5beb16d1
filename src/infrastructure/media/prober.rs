use std::path::Path;
use std::time::Duration;

use super::MediaError;
use crate::infrastructure::process::{ProcessRunner, ToolCommand};

/// Reads the container duration in seconds via ffprobe.
pub async fn probe_duration(
    runner: &dyn ProcessRunner,
    cmd: &ToolCommand,
    path: &Path,
    timeout: Duration,
) -> Result<f64, MediaError> {
    let invocation = cmd
        .invocation(timeout)
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path);

    let output = runner.run(&invocation).await?;
    if !output.success {
        return Err(MediaError::Failed {
            tool: cmd.program.clone(),
            code: output.code,
            diagnostic: output.stderr_tail(5),
        });
    }

    parse_duration(&output.stdout).ok_or_else(|| MediaError::BadOutput {
        tool: cmd.program.clone(),
        output: output.stdout.trim().to_string(),
    })
}

/// First non-empty line as seconds. `N/A`, NaN, infinities and negative
/// values are rejected.
pub fn parse_duration(stdout: &str) -> Option<f64> {
    let line = stdout.lines().map(str::trim).find(|l| !l.is_empty())?;
    let seconds: f64 = line.parse().ok()?;
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}
