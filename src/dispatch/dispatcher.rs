//! Outbound call execution
//!
//! Every remote operation goes through [`Dispatcher::call`], which:
//! - builds the URL from the base URL plus percent-encoded segments
//! - attaches the `X-token` header and the JSON body, if any
//! - sends exactly one request (no retries)
//! - classifies the status against the call's predicate
//! - folds transport and status failures into one [`ServiceError`]

use crate::config::ClientConfig;
use crate::dispatch::call::ServiceCall;
use crate::dispatch::error::ServiceError;
use crate::dispatch::response::{ResponseBody, ServiceResponse};
use crate::{ConfigError, ControlError};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Header carrying the auth token on every call
pub const TOKEN_HEADER: &str = "x-token";

/// Builds the HTTP client used for service calls
///
/// # Example
///
/// ```no_run
/// use crawler_control::config::ClientConfig;
/// use crawler_control::dispatch::build_http_client;
///
/// let client = build_http_client(&ClientConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(config.user_agent());

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Issues calls against one crawler service
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http: Client,
    base_url: Url,
    token: HeaderValue,
}

impl Dispatcher {
    /// Creates a dispatcher from a configuration, building its own HTTP client
    pub fn new(config: &ClientConfig) -> Result<Self, ControlError> {
        config.validate()?;
        let http = build_http_client(config).map_err(ControlError::HttpClient)?;
        Self::with_client(http, &config.base_url, &config.token)
    }

    /// Creates a dispatcher around an existing HTTP client
    pub fn with_client(http: Client, base_url: &str, token: &str) -> Result<Self, ControlError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base URL '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(format!(
                "Base URL '{}' cannot carry a path",
                base_url
            ))
            .into());
        }

        let mut token = HeaderValue::from_str(token)
            .map_err(|_| ConfigError::Validation("token is not a valid header value".to_string()))?;
        token.set_sensitive(true);

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves the absolute URL for a call
    ///
    /// Segments are appended to whatever path the base URL already has, so a
    /// base of `https://ops.example.com/crawler` keeps its prefix.
    ///
    /// Empty, `.` and `..` segments are rejected: URL normalization would
    /// drop or collapse them and the call would reach a different resource.
    pub fn endpoint(&self, call: &ServiceCall) -> Result<Url, ServiceError> {
        if let Some(segment) = call
            .segments()
            .iter()
            .find(|segment| matches!(segment.as_str(), "" | "." | ".."))
        {
            return Err(ServiceError::invalid_request(
                call.action(),
                format!("'{}' is not a valid path segment", segment),
            ));
        }

        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| ServiceError::invalid_request(call.action(), "base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(call.segments());

        if !call.query_pairs().is_empty() {
            url.query_pairs_mut().extend_pairs(call.query_pairs());
        }

        Ok(url)
    }

    /// Issues one call and classifies its outcome
    pub async fn call(&self, call: ServiceCall) -> Result<ServiceResponse, ServiceError> {
        let url = self.endpoint(&call)?;
        tracing::debug!(method = %call.method(), url = %url, "Dispatching service call");

        let mut request = self
            .http
            .request(call.method().clone(), url.clone())
            .header(HeaderName::from_static(TOKEN_HEADER), self.token.clone());

        if let Some(body) = call.json_body() {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let error = ServiceError::transport(call.action(), &e);
                tracing::warn!(method = %call.method(), url = %url, "{}", error);
                return Err(error);
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(|e| {
            let error = ServiceError::transport(call.action(), &e);
            tracing::warn!(method = %call.method(), url = %url, "{}", error);
            error
        })?;
        let body = ResponseBody::from_bytes(&bytes);

        if !call.accepts(status) {
            let error = ServiceError::status(call.action(), status, &body);
            tracing::warn!(
                method = %call.method(),
                url = %url,
                kind = %error.kind(),
                "{}",
                error
            );
            return Err(error);
        }

        tracing::trace!(status = status.as_u16(), "Service call succeeded");
        Ok(ServiceResponse::new(status, headers, body))
    }

    /// Issues one call and deserializes the accepted body
    pub async fn call_json<T: DeserializeOwned>(&self, call: ServiceCall) -> Result<T, ServiceError> {
        let action = call.action().to_string();
        let response = self.call(call).await?;
        response
            .decode()
            .map_err(|e| ServiceError::invalid_response(&action, e))
    }
}
