use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub struct ApiError(pub ErrorResponse, pub StatusCode);

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, details: Option<String>) -> Self {
        Self(
            ErrorResponse {
                error: error.into(),
                details,
            },
            status,
        )
    }

    pub fn bad_request(error: impl Into<String>, details: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, details)
    }

    pub fn internal(error: impl Into<String>, details: Option<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error, details)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (body, status) = (self.0, self.1);
        (status, Json(body)).into_response()
    }
}
