use crate::common::response::ApiError;
use crate::infrastructure::media::{ManifestError, MediaError};

pub const PROCESSING_FAILED: &str = "Failed to process videos";
pub const INVALID_IDENTIFIER: &str = "Invalid video identifier";

#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    #[error("Please provide {min}-{max} videos to combine")]
    InvalidVideoCount { min: usize, max: usize },

    #[error("Video {position}: {id:?} is not a valid video identifier")]
    InvalidIdentifier { position: usize, id: String },

    #[error("{tool} is not installed or not on PATH")]
    DependencyUnavailable { tool: String },

    #[error("Failed to download video {position}: {reason}")]
    Acquisition { position: usize, reason: String },

    #[error("Failed to get duration of video {position}: {reason}")]
    DurationUnmeasurable { position: usize, reason: String },

    #[error("Video {position} exceeds maximum duration of {limit} seconds (measured {measured:.1} seconds)")]
    DurationExceeded {
        position: usize,
        measured: f64,
        limit: f64,
    },

    #[error("Failed to combine videos: {diagnostic}")]
    Encode { diagnostic: String },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Temporary file error: {0}")]
    Io(#[from] std::io::Error),
}

impl CombineError {
    /// Maps a tool failure to `step`, unless the tool is missing altogether.
    pub fn from_media(err: MediaError, step: impl FnOnce(String) -> CombineError) -> Self {
        match err.missing_tool() {
            Some(tool) => CombineError::DependencyUnavailable {
                tool: tool.to_string(),
            },
            None => step(err.to_string()),
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CombineError::InvalidVideoCount { .. } | CombineError::InvalidIdentifier { .. }
        )
    }
}

impl From<CombineError> for ApiError {
    fn from(err: CombineError) -> Self {
        match err {
            CombineError::InvalidVideoCount { .. } => ApiError::bad_request(err.to_string(), None),
            CombineError::InvalidIdentifier { .. } => {
                ApiError::bad_request(INVALID_IDENTIFIER, Some(err.to_string()))
            }
            _ => ApiError::internal(PROCESSING_FAILED, Some(err.to_string())),
        }
    }
}
