pub mod analyzer;
pub mod api;
pub mod assets;
pub mod config;
pub mod error;
pub mod report;

use std::sync::Arc;
use std::time::Duration;

use config::Config;
use error::{AppError, Result};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(AppState { config, client })
    }
}
