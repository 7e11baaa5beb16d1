use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use video_combiner::app;
use video_combiner::config::settings::AppConfig;
use video_combiner::infrastructure::media::check_dependencies;
use video_combiner::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new()?;
    tokio::fs::create_dir_all(&config.temp_dir).await?;
    info!("Working files go to {}", config.temp_dir.display());

    let state = AppState::with_system_tools(config);
    let missing = check_dependencies(state.runner.as_ref(), &state.config).await;
    if !missing.is_empty() {
        warn!("Missing tools, combine requests will fail until installed: {}", missing.join(", "));
    }

    let addr = format!("0.0.0.0:{}", state.config.server_port);
    let app = app::create_app(state).await;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
