// Shared fixtures for the API tests: a fake tool runner and request helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use tower::ServiceExt;

use video_combiner::app::create_app;
use video_combiner::config::settings::AppConfig;
use video_combiner::infrastructure::process::{
    Invocation, ProcessError, ProcessOutput, ProcessRunner, ToolCommand,
};
use video_combiner::state::AppState;

/// Pretends to be yt-dlp, ffprobe and ffmpeg.
///
/// A "downloaded" file contains its video id, the "encoded" output is the
/// concatenation of the listed inputs, so the response body shows the
/// segment order directly.
#[derive(Default)]
pub struct FakeRunner {
    /// ffprobe stdout per video id. Defaults to `12.5`.
    pub probe_output: HashMap<String, String>,
    /// Artificial download latency per video id.
    pub download_delay: HashMap<String, Duration>,
    pub fail_download: Option<String>,
    pub missing_program: Option<String>,
    pub encoder_fails: bool,
    pub calls: Mutex<Vec<String>>,
    pub manifests: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, program: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == program).count()
    }

    pub fn manifests(&self) -> Vec<String> {
        self.manifests.lock().unwrap().clone()
    }

    fn output(success: bool, stdout: &str, stderr: &str) -> ProcessOutput {
        ProcessOutput {
            success,
            code: Some(if success { 0 } else { 1 }),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    fn value_after(args: &[String], flag: &str) -> String {
        let at = args.iter().position(|a| a == flag).unwrap();
        args[at + 1].clone()
    }

    async fn download(&self, args: &[String]) -> ProcessOutput {
        let dest = Self::value_after(args, "-o");
        let url = args.last().unwrap();
        let id = url.rsplit("v=").next().unwrap().to_string();

        if let Some(delay) = self.download_delay.get(&id) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_download.as_deref() == Some(id.as_str()) {
            return Self::output(false, "", "ERROR: [youtube] Video unavailable");
        }

        tokio::fs::write(&dest, id.as_bytes()).await.unwrap();
        Self::output(true, "", "")
    }

    async fn probe(&self, args: &[String]) -> ProcessOutput {
        let path = args.last().unwrap();
        let id = tokio::fs::read_to_string(path).await.unwrap();
        let stdout = self
            .probe_output
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "12.5\n".to_string());
        Self::output(true, &stdout, "")
    }

    async fn encode(&self, args: &[String]) -> ProcessOutput {
        let manifest_path = Self::value_after(args, "-i");
        let manifest = tokio::fs::read_to_string(&manifest_path).await.unwrap();
        self.manifests.lock().unwrap().push(manifest.clone());

        if self.encoder_fails {
            return Self::output(false, "", "concat: Invalid data found when processing input\n");
        }

        let mut combined = Vec::new();
        for line in manifest.lines() {
            let path = line
                .strip_prefix("file '")
                .and_then(|rest| rest.strip_suffix('\''))
                .unwrap();
            combined.extend(tokio::fs::read(path).await.unwrap());
        }
        tokio::fs::write(args.last().unwrap(), combined).await.unwrap();
        Self::output(true, "", "")
    }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, ProcessError> {
        self.calls.lock().unwrap().push(invocation.program.clone());

        if self.missing_program.as_deref() == Some(invocation.program.as_str()) {
            return Err(ProcessError::NotFound {
                program: invocation.program.clone(),
            });
        }

        let args: Vec<String> = invocation
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        Ok(match invocation.program.as_str() {
            "yt-dlp" => self.download(&args).await,
            "ffprobe" => self.probe(&args).await,
            "ffmpeg" => self.encode(&args).await,
            other => panic!("unexpected program {other}"),
        })
    }
}

pub fn test_config(temp_dir: &Path) -> AppConfig {
    AppConfig {
        temp_dir: temp_dir.to_path_buf(),
        downloader: ToolCommand::bare("yt-dlp"),
        ffprobe: ToolCommand::bare("ffprobe"),
        ffmpeg: ToolCommand::bare("ffmpeg"),
        ..AppConfig::default()
    }
}

pub async fn test_app(config: AppConfig, runner: Arc<FakeRunner>) -> Router {
    create_app(AppState::new(config, runner)).await
}

pub fn combine_body(ids: &[&str]) -> String {
    let videos: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({ "id": id, "url": format!("https://youtu.be/{id}") }))
        .collect();
    serde_json::json!({ "videos": videos }).to_string()
}

pub async fn post_combine(app: Router, body: impl Into<Body>) -> Response {
    let req = Request::builder()
        .method("POST")
        .uri("/api/combine")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(req).await.unwrap()
}

pub async fn body_bytes(resp: Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

pub fn dir_entries(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}
