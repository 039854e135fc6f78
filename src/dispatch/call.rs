use reqwest::{Method, StatusCode};
use serde_json::Value;

/// Decides whether a completed call counts as a success
pub type StatusPredicate = fn(StatusCode) -> bool;

/// Default acceptance rule: any status in `200..=299`
pub fn accept_success(status: StatusCode) -> bool {
    status.is_success()
}

/// Description of one outbound call
///
/// Path segments and query values are kept raw here and percent-encoded by
/// the dispatcher when the URL is built.
///
/// # Example
///
/// ```
/// use crawler_control::dispatch::ServiceCall;
///
/// let call = ServiceCall::get("Failed to get requests")
///     .segment("requests")
///     .segment("normal")
///     .query("count", 5);
/// assert_eq!(call.action(), "Failed to get requests");
/// ```
#[derive(Debug, Clone)]
pub struct ServiceCall {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
    accept: StatusPredicate,
    action: String,
}

impl ServiceCall {
    /// Creates a call with no path, no body and the default predicate
    pub fn new(method: Method, action: impl Into<String>) -> Self {
        Self {
            method,
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
            accept: accept_success,
            action: action.into(),
        }
    }

    pub fn get(action: impl Into<String>) -> Self {
        Self::new(Method::GET, action)
    }

    pub fn head(action: impl Into<String>) -> Self {
        Self::new(Method::HEAD, action)
    }

    pub fn post(action: impl Into<String>) -> Self {
        Self::new(Method::POST, action)
    }

    pub fn put(action: impl Into<String>) -> Self {
        Self::new(Method::PUT, action)
    }

    pub fn patch(action: impl Into<String>) -> Self {
        Self::new(Method::PATCH, action)
    }

    pub fn delete(action: impl Into<String>) -> Self {
        Self::new(Method::DELETE, action)
    }

    /// Appends one path segment relative to the base URL
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Appends a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attaches a JSON body
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Replaces the status predicate
    pub fn accept(mut self, accept: StatusPredicate) -> Self {
        self.accept = accept;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn json_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn accepts(&self, status: StatusCode) -> bool {
        (self.accept)(status)
    }
}
