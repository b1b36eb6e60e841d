//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Model used when GEMINI_MODEL is not set
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key (required)
    pub gemini_api_key: String,

    /// Gemini model identifier
    pub gemini_model: String,

    /// Override for the Gemini API base URL (used in tests)
    pub gemini_base_url: Option<String>,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
    pub cors_origins: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY is required"))?,

            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL").ok(),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "lexdraft=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            cors_origins: env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        };

        Ok(config)
    }
}
