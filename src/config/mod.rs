use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod server;

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Number of entries kept in the top-freelancer/top-client rollups
    pub rollup_size: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                rollup_size: env::var("ROLLUP_SIZE")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .map_err(|_| AppError::Configuration("Invalid ROLLUP_SIZE".to_string()))?,
            },
            server: ServerConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.rollup_size == 0 {
            return Err(AppError::Configuration(
                "Rollup size must be greater than 0".to_string(),
            ));
        }

        self.server.validate()
    }
}
