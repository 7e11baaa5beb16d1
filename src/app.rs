use axum::Router;
use crate::state::AppState;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// A list of five ids is a few hundred bytes; anything near this is junk.
const MAX_BODY_BYTES: usize = 64 * 1024;

pub async fn create_app(state: AppState) -> Router {
    crate::routes::configure_routes()
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
