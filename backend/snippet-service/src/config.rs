/// Configuration management for the snippet service
///
/// This module handles loading configuration from environment variables,
/// with defaults suitable for local development.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Identity provider configuration
    pub identity: IdentityConfig,
    /// Feed sampling configuration
    pub feed: FeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Hosted identity provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Base URL of the provider's auth API
    pub base_url: String,
    /// Publishable API key sent with every request
    pub anon_key: String,
    /// Privileged key for the admin user-lookup endpoint
    pub service_role_key: String,
    /// Where the OAuth flow lands after the provider redirect
    pub oauth_redirect_uri: String,
    /// Avatar used when a user record carries none
    pub default_avatar_url: String,
}

/// Feed sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Smallest feed window drawn per request
    pub sample_min: usize,
    /// Largest feed window drawn per request
    pub sample_max: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let config = Config {
            app: AppConfig {
                env: env_or("APP_ENV", "dev"),
                host: env_or("HOST", "0.0.0.0"),
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(8080),
            },
            cors: CorsConfig {
                allowed_origins: env_or("CORS_ALLOWED_ORIGINS", "*"),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .map_err(|_| "DATABASE_URL is not set".to_string())?,
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            },
            identity: IdentityConfig {
                base_url: std::env::var("IDENTITY_BASE_URL")
                    .map_err(|_| "IDENTITY_BASE_URL is not set".to_string())?,
                anon_key: std::env::var("IDENTITY_ANON_KEY")
                    .map_err(|_| "IDENTITY_ANON_KEY is not set".to_string())?,
                service_role_key: std::env::var("IDENTITY_SERVICE_ROLE_KEY")
                    .map_err(|_| "IDENTITY_SERVICE_ROLE_KEY is not set".to_string())?,
                oauth_redirect_uri: env_or("OAUTH_REDIRECT_URI", "http://localhost:3000/"),
                default_avatar_url: env_or("DEFAULT_AVATAR_URL", "/shareacode.png"),
            },
            feed: FeedConfig {
                sample_min: std::env::var("FEED_SAMPLE_MIN")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
                sample_max: std::env::var("FEED_SAMPLE_MAX")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(15),
            },
        };

        if config.feed.sample_min == 0 {
            return Err("FEED_SAMPLE_MIN must be at least 1".to_string());
        }
        if config.feed.sample_max < config.feed.sample_min {
            return Err(format!(
                "FEED_SAMPLE_MAX ({}) must not be below FEED_SAMPLE_MIN ({})",
                config.feed.sample_max, config.feed.sample_min
            ));
        }

        Ok(config)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
