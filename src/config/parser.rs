use crate::config::types::{
    ClientConfig, Profile, DEFAULT_BASE_URL, DEFAULT_TOKEN, TOKEN_ENV_VAR, URL_ENV_VAR,
};
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use sha2::{Digest, Sha256};
use std::path::Path;

impl ClientConfig {
    /// Resolves connection settings from explicit values, then the process
    /// environment, then the built-in defaults
    ///
    /// Empty strings count as absent at every level.
    ///
    /// # Example
    ///
    /// ```
    /// use crawler_control::config::ClientConfig;
    ///
    /// let config = ClientConfig::resolve(Some("http://crawler:3000".into()), Some("t0k".into()));
    /// assert_eq!(config.base_url, "http://crawler:3000");
    /// ```
    pub fn resolve(url: Option<String>, token: Option<String>) -> Self {
        Self::resolve_with(url, token, |key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::resolve`] with a caller-supplied variable lookup
    pub fn resolve_with<F>(url: Option<String>, token: Option<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<String>, key: &str, fallback: &str| {
            explicit
                .filter(|value| !value.is_empty())
                .or_else(|| lookup(key).filter(|value| !value.is_empty()))
                .unwrap_or_else(|| fallback.to_string())
        };

        Self::new(
            pick(url, URL_ENV_VAR, DEFAULT_BASE_URL),
            pick(token, TOKEN_ENV_VAR, DEFAULT_TOKEN),
        )
    }

    /// Builds a configuration from a profile, letting explicit values win over it
    pub fn from_profile(profile: Profile, url: Option<String>, token: Option<String>) -> Self {
        let service = profile.service;
        Self::resolve(url.or(service.url), token.or(service.token))
            .with_timeout_secs(service.timeout_secs)
            .with_user_agent(service.user_agent)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self)
    }

    /// Short fingerprint of the configured token, safe to log
    pub fn token_fingerprint(&self) -> String {
        token_fingerprint(&self.token)
    }
}

/// Reads and parses a TOML profile file without validating it
pub fn load_profile(path: &Path) -> ConfigResult<Profile> {
    let content = std::fs::read_to_string(path)?;
    let profile: Profile = toml::from_str(&content)?;
    Ok(profile)
}

/// Loads a profile file and resolves it into a validated [`ClientConfig`]
///
/// Keys missing from the profile fall back to the environment and then to
/// the defaults, exactly as [`ClientConfig::resolve`] does.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use crawler_control::config::load_config;
///
/// let config = load_config(Path::new("crawler.toml")).unwrap();
/// println!("Talking to {}", config.base_url);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<ClientConfig> {
    let profile = load_profile(path)?;
    let config = ClientConfig::from_profile(profile, None, None);
    validate(&config)?;
    Ok(config)
}

/// Computes a short, hex-encoded SHA-256 fingerprint of a token
///
/// Used to tell tokens apart in logs without printing them.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}
