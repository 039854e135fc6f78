//! Crawler-Control: a control-plane client for a remote crawling service
//!
//! This crate lets an operator or automation process observe and mutate the
//! state of a crawler service (its configuration, access tokens, request
//! queues and deadletters) through one uniform, async call surface. It never
//! crawls anything itself.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod model;

use thiserror::Error;

/// Main error type for Crawler-Control
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Service(#[from] dispatch::ServiceError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Crawler-Control operations
pub type Result<T> = std::result::Result<T, ControlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::CrawlerClient;
pub use config::ClientConfig;
pub use dispatch::{FailureKind, ServiceError};
pub use model::{
    Configuration, CrawlRequest, Deadletter, PatchOperation, QueueInfo, DEFAULT_QUEUE,
    DEFAULT_REQUEUE_QUEUE,
};
