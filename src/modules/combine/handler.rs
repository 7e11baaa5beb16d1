use super::dto::CombineRequest;
use super::error::CombineError;
use super::service::{CombineService, CombinedVideo};
use crate::common::response::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures_util::StreamExt;
use tokio_util::io::ReaderStream;
use tracing::{error, info, warn};

pub const OUTPUT_FILENAME: &str = "combined_video.mp4";

/// Combine 2-5 YouTube videos into one MP4
///
/// Downloads each video, checks its duration, joins them in request order
/// and streams the result back as an attachment.
#[utoipa::path(
    post,
    path = "/api/combine",
    request_body = CombineRequest,
    responses(
        (status = 200, description = "Combined video", content_type = "video/mp4", body = Vec<u8>),
        (status = 400, description = "Invalid video list", body = ErrorResponse),
        (status = 500, description = "Processing failed", body = ErrorResponse)
    ),
    tag = "Combine"
)]
pub async fn combine_videos(
    State(state): State<AppState>,
    payload: Result<Json<CombineRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!("Rejected combine request body: {}", rejection.body_text());
            let count = CombineError::InvalidVideoCount {
                min: state.config.min_videos,
                max: state.config.max_videos,
            };
            return ApiError::bad_request(count.to_string(), Some(rejection.body_text())).into_response();
        }
    };

    match CombineService::combine(state, req).await {
        Ok(video) => stream_video(video),
        Err(e) => {
            if e.is_client_error() {
                warn!("Invalid combine request: {}", e);
            } else {
                error!("Error processing videos: {}", e);
            }
            ApiError::from(e).into_response()
        }
    }
}

/// The session rides along inside the body stream, so temp files are removed
/// once the body is finished or dropped.
fn stream_video(video: CombinedVideo) -> Response {
    let CombinedVideo { file, len, session } = video;
    let token = session.token();
    info!(session = %token, "📤 Sending combined video");

    let stream = ReaderStream::new(file).map(move |chunk| {
        let _session = &session;
        if let Err(e) = &chunk {
            error!(session = %token, "Error sending file: {}", e);
        }
        chunk
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", OUTPUT_FILENAME),
        )
        .header(header::CONTENT_LENGTH, len)
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
