use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub huggingface: HuggingFaceConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Credentials and endpoints for the Hugging Face inference services.
/// Base URLs are overridable so tests and staging can point at doubles.
#[derive(Debug, Clone, Deserialize)]
pub struct HuggingFaceConfig {
    pub api_token: String,
    pub inference_base: String,
    pub router_base: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("Failed to parse PORT")?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("Failed to parse DATABASE_MAX_CONNECTIONS")?,
            },
            huggingface: HuggingFaceConfig {
                api_token: env::var("HUGGINGFACE_API_KEY")
                    .context("HUGGINGFACE_API_KEY must be set")?,
                inference_base: env::var("HUGGINGFACE_INFERENCE_BASE")
                    .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string()),
                router_base: env::var("HUGGINGFACE_ROUTER_BASE")
                    .unwrap_or_else(|_| "https://router.huggingface.co".to_string()),
                request_timeout_seconds: env::var("HF_REQUEST_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("Failed to parse HF_REQUEST_TIMEOUT_SECONDS")?,
            },
            cache: CacheConfig {
                // The analysis cache shipped disabled; it stays opt-in until
                // the staleness question is settled.
                enabled: env::var("ANALYSIS_CACHE_ENABLED")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .context("Failed to parse ANALYSIS_CACHE_ENABLED")?,
            },
        };

        if config.huggingface.api_token.is_empty() {
            anyhow::bail!("HUGGINGFACE_API_KEY must not be empty");
        }

        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
