use async_trait::async_trait;
use std::ffi::OsString;
use std::fmt;
use std::io;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// A configured external tool: the executable plus any fixed leading
/// arguments (e.g. `python3 -m yt_dlp`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub base_args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, base_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            base_args: base_args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn bare(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
        }
    }

    /// Splits on whitespace. Returns `None` for a blank string.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }

    /// Starts an invocation with the base arguments already applied.
    pub fn invocation(&self, timeout: Duration) -> Invocation {
        Invocation {
            program: self.program.clone(),
            args: self.base_args.iter().map(OsString::from).collect(),
            timeout,
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.base_args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// One external process call. Arguments are passed as a vector and never
/// go through a shell.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<OsString>,
    pub timeout: Duration,
}

impl Invocation {
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Last few lines of stderr, for error messages.
    pub fn stderr_tail(&self, lines: usize) -> String {
        let all: Vec<&str> = self
            .stderr
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        let start = all.len().saturating_sub(lines);
        all[start..].join("\n")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("{program} is not installed or not on PATH")]
    NotFound { program: String },

    #[error("{program} timed out after {}s", .after.as_secs())]
    TimedOut { program: String, after: Duration },

    #[error("Failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError>;
}

/// Runs tools with `tokio::process`. The child is killed if the timeout
/// fires or the calling future is dropped.
#[derive(Clone, Debug, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError> {
        let program = invocation.program.clone();
        debug!("Running {} {:?}", program, invocation.args);

        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ProcessError::NotFound {
                    program: program.clone(),
                },
                _ => ProcessError::Io {
                    program: program.clone(),
                    source: e,
                },
            })?;

        let output = tokio::time::timeout(invocation.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProcessError::TimedOut {
                program: program.clone(),
                after: invocation.timeout,
            })?
            .map_err(|e| ProcessError::Io {
                program: program.clone(),
                source: e,
            })?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
