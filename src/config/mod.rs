//! Client configuration
//!
//! Connection settings are resolved once by the caller (explicit values, then
//! environment variables, then defaults) or loaded from a TOML profile, and
//! handed to the client as a plain [`ClientConfig`] value.
//!
//! # Example
//!
//! ```no_run
//! use crawler_control::config::ClientConfig;
//!
//! let config = ClientConfig::resolve(None, None);
//! config.validate().unwrap();
//! println!("Talking to {}", config.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClientConfig, Profile, ServiceProfile, DEFAULT_BASE_URL, DEFAULT_TOKEN, TOKEN_ENV_VAR,
    URL_ENV_VAR,
};

// Re-export parser functions
pub use parser::{load_config, load_profile, token_fingerprint};
