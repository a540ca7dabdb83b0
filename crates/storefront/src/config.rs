//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CMS_BASE_URL` - Base URL of the CMS content API
//! - `CMS_API_KEY` - API key for the CMS (server-side only)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! ## Object storage (all required together, enables media cleanup)
//! - `S3_ENDPOINT` - S3-compatible endpoint URL
//! - `S3_BUCKET` - Media bucket name
//! - `S3_REGION` - Bucket region (default: us-east-1)
//! - `S3_ACCESS_KEY` - Access key id
//! - `S3_SECRET_KEY` - Secret access key

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// CMS content API configuration
    pub cms: CmsConfig,
    /// Object-storage configuration, when media cleanup is enabled
    pub storage: Option<StorageConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// CMS content API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CmsConfig {
    /// Base URL of the content API (e.g., <https://cms.wrenfieldantiques.com>)
    pub base_url: String,
    /// API key, sent on every request (server-side only)
    pub api_key: SecretString,
}

impl std::fmt::Debug for CmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// S3-compatible object-storage configuration.
#[derive(Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: SecretString,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = optional_var("STOREFRONT_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;

        let port = optional_var("STOREFRONT_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let base_url = optional_var("STOREFRONT_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let cms = CmsConfig {
            base_url: required_var("CMS_BASE_URL")?,
            api_key: SecretString::from(required_var("CMS_API_KEY")?),
        };

        // Object storage is optional: without it the server runs, but the
        // media-cleanup cascade is unavailable.
        let storage = match optional_var("S3_ENDPOINT") {
            Some(endpoint) => Some(StorageConfig {
                endpoint,
                bucket: required_var("S3_BUCKET")?,
                region: optional_var("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key: required_var("S3_ACCESS_KEY")?,
                secret_key: SecretString::from(required_var("S3_SECRET_KEY")?),
            }),
            None => None,
        };

        Ok(Self {
            host,
            port,
            base_url,
            cms,
            storage,
            sentry_dsn: optional_var("SENTRY_DSN"),
            sentry_environment: optional_var("SENTRY_ENVIRONMENT"),
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
