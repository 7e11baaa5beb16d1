use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const VIDEO_ID_LEN: usize = 11;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VideoEntry {
    /// 11-character YouTube video id.
    #[validate(custom(function = "validate_video_id"))]
    pub id: String,
    // Metadata the web client sends along; not used for processing.
    pub url: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
}

impl VideoEntry {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            title: None,
            thumbnail: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CombineRequest {
    /// Videos in the order they should appear in the output.
    #[serde(default)]
    pub videos: Option<Vec<VideoEntry>>,
}

pub fn validate_video_id(id: &str) -> Result<(), ValidationError> {
    let well_formed = id.len() == VIDEO_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

    if well_formed {
        Ok(())
    } else {
        let mut err = ValidationError::new("video_id");
        err.message = Some("must be 11 characters of A-Z, a-z, 0-9, '-' or '_'".into());
        Err(err)
    }
}
