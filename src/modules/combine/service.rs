use super::dto::CombineRequest;
use super::error::CombineError;
use crate::config::settings::AppConfig;
use crate::infrastructure::media::{
    download_video, encode_concat, probe_duration, ConcatManifest, EncodeProfile,
};
use crate::infrastructure::process::ProcessRunner;
use crate::infrastructure::storage::session::SessionFiles;
use crate::state::AppState;
use futures_util::{stream, StreamExt, TryStreamExt};
use std::path::PathBuf;
use tokio::fs::File;
use tracing::info;
use validator::Validate;

/// Finished output, ready to stream. Dropping `session` deletes every temp
/// file of the request, the output included.
pub struct CombinedVideo {
    pub file: File,
    pub len: u64,
    pub session: SessionFiles,
}

struct AcquireJob {
    position: usize,
    id: String,
    path: PathBuf,
}

pub struct CombineService;

impl CombineService {
    /// Checks count and identifiers. Nothing is started on failure.
    pub fn validate(config: &AppConfig, req: CombineRequest) -> Result<Vec<String>, CombineError> {
        let videos = req.videos.unwrap_or_default();
        if videos.len() < config.min_videos || videos.len() > config.max_videos {
            return Err(CombineError::InvalidVideoCount {
                min: config.min_videos,
                max: config.max_videos,
            });
        }

        for (index, video) in videos.iter().enumerate() {
            if video.validate().is_err() {
                return Err(CombineError::InvalidIdentifier {
                    position: index + 1,
                    id: video.id.clone(),
                });
            }
        }

        Ok(videos.into_iter().map(|v| v.id).collect())
    }

    pub async fn combine(state: AppState, req: CombineRequest) -> Result<CombinedVideo, CombineError> {
        let ids = Self::validate(&state.config, req)?;
        let config = &state.config;
        let runner = state.runner.as_ref();

        let mut session = SessionFiles::new(&config.temp_dir);
        let token = session.token();
        info!(session = %token, "🎥 Combining {} videos", ids.len());

        let manifest_path = session.manifest_path();
        let output_path = session.output_path();
        let jobs: Vec<AcquireJob> = ids
            .into_iter()
            .enumerate()
            .map(|(index, id)| AcquireJob {
                position: index + 1,
                id,
                path: session.download_path(index),
            })
            .collect();

        let total = jobs.len();
        let accepted = stream::iter(jobs)
            .map(|job| Self::acquire(config, runner, job, total))
            .buffered(config.acquire_concurrency)
            .try_collect::<Vec<PathBuf>>()
            .await?;

        let mut manifest = ConcatManifest::new();
        for path in accepted {
            manifest.push(path);
        }
        tokio::fs::write(&manifest_path, manifest.render()?).await?;

        encode_concat(
            runner,
            &config.ffmpeg,
            &manifest_path,
            &output_path,
            &EncodeProfile::default(),
            config.encode_timeout,
        )
        .await
        .map_err(|e| CombineError::from_media(e, |diagnostic| CombineError::Encode { diagnostic }))?;

        // Inputs are no longer needed while the output streams.
        session.remove_now(&manifest_path);
        for path in manifest.entries() {
            session.remove_now(path);
        }

        let file = File::open(&output_path).await?;
        let len = file.metadata().await?.len();
        info!(session = %token, "✅ Combined video ready ({} bytes)", len);

        Ok(CombinedVideo { file, len, session })
    }

    async fn acquire(
        config: &AppConfig,
        runner: &dyn ProcessRunner,
        job: AcquireJob,
        total: usize,
    ) -> Result<PathBuf, CombineError> {
        let AcquireJob { position, id, path } = job;
        info!("Downloading video {}/{}...", position, total);

        download_video(
            runner,
            &config.downloader,
            &config.video_source_url,
            &id,
            &path,
            config.max_video_height,
            config.download_timeout,
        )
        .await
        .map_err(|e| CombineError::from_media(e, |reason| CombineError::Acquisition { position, reason }))?;

        let duration = probe_duration(runner, &config.ffprobe, &path, config.probe_timeout)
            .await
            .map_err(|e| {
                CombineError::from_media(e, |reason| CombineError::DurationUnmeasurable { position, reason })
            })?;

        if duration > config.max_video_duration {
            return Err(CombineError::DurationExceeded {
                position,
                measured: duration,
                limit: config.max_video_duration,
            });
        }

        info!("Video {}/{} accepted ({:.1}s)", position, total, duration);
        Ok(path)
    }
}
