use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::process::{ProcessRunner, TokioProcessRunner};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub runner: Arc<dyn ProcessRunner>,
}

impl AppState {
    pub fn new(config: AppConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { config, runner }
    }

    /// State that runs the real tools.
    pub fn with_system_tools(config: AppConfig) -> Self {
        Self::new(config, Arc::new(TokioProcessRunner))
    }
}
