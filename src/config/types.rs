use serde::Deserialize;

/// Base URL used when neither an explicit value nor the environment provides one
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Auth token used when neither an explicit value nor the environment provides one
pub const DEFAULT_TOKEN: &str = "secret";

/// Environment variable consulted for the service base URL
pub const URL_ENV_VAR: &str = "CRAWLER_SERVICE_URL";

/// Environment variable consulted for the service auth token
pub const TOKEN_ENV_VAR: &str = "CRAWLER_SERVICE_AUTH_TOKEN";

/// Connection settings for a [`CrawlerClient`](crate::CrawlerClient)
///
/// The client never reads the environment itself. Callers build this value
/// once, usually through [`ClientConfig::resolve`], and hand it to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the crawler service, e.g. `http://localhost:3000`
    pub base_url: String,

    /// Token sent in the `X-token` header of every call
    pub token: String,

    /// Overall transport timeout per call, in seconds
    pub timeout_secs: Option<u64>,

    /// User agent override; the crate name and version are used otherwise
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration from explicit values with no timeout or user agent override
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout_secs: None,
            user_agent: None,
        }
    }

    /// Sets the transport timeout
    pub fn with_timeout_secs(mut self, timeout_secs: Option<u64>) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Sets the user agent override
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// The user agent string sent with every call
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("crawler-control/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TOKEN)
    }
}

/// Contents of a TOML profile file
///
/// ```toml
/// [service]
/// url = "https://crawler.internal:3000"
/// token = "s3cr3t"
/// timeout-secs = 30
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub service: ServiceProfile,
}

/// The `[service]` table of a profile; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceProfile {
    /// Base URL of the crawler service
    pub url: Option<String>,

    /// Auth token
    pub token: Option<String>,

    /// Transport timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// User agent override
    #[serde(rename = "user-agent")]
    pub user_agent: Option<String>,
}
