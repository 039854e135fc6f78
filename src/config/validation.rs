use crate::config::types::ClientConfig;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &ClientConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;
    validate_token(&config.token)?;
    validate_timeout(config.timeout_secs)?;
    Ok(())
}

/// Validates the service base URL
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base URL '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{}' must use the http or https scheme",
            base_url
        )));
    }

    if url.host_str().is_none() || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{}' must include a host",
            base_url
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "Base URL '{}' must not carry a query or fragment",
            base_url
        )));
    }

    Ok(())
}

/// Validates the auth token; it travels as a raw header value
fn validate_token(token: &str) -> Result<(), ConfigError> {
    if token.is_empty() {
        return Err(ConfigError::Validation("token cannot be empty".to_string()));
    }

    if token
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || !c.is_ascii())
    {
        return Err(ConfigError::Validation(
            "token must be printable ASCII without whitespace".to_string(),
        ));
    }

    Ok(())
}

fn validate_timeout(timeout_secs: Option<u64>) -> Result<(), ConfigError> {
    if timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}
