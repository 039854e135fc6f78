//! The single error shape surfaced by every remote operation

use crate::dispatch::response::ResponseBody;
use reqwest::StatusCode;
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// What went wrong with a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never completed (connection refused, DNS failure, reset, timeout)
    Transport,

    /// The request completed but its status failed the acceptance predicate
    Status(u16),

    /// The request could not be built from the caller's input
    InvalidRequest,

    /// The status was accepted but the body or headers did not have the expected shape
    InvalidResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::Status(code) => write!(f, "status {}", code),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
        }
    }
}

/// A failed remote operation
///
/// Carries the action the caller attempted and a detail string, and renders
/// as `"<action>: <detail>."`, e.g. `Failed to flush queue soon: overloaded.`
#[derive(Debug, Clone, Error)]
#[error("{action}: {detail}.")]
pub struct ServiceError {
    action: String,
    detail: String,
    kind: FailureKind,
}

impl ServiceError {
    /// Builds an error from its parts
    pub fn new(action: impl Into<String>, detail: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            action: action.into(),
            detail: detail.into(),
            kind,
        }
    }

    /// The request never completed; the detail is the transport's own message
    pub(crate) fn transport(action: &str, error: &reqwest::Error) -> Self {
        Self::new(action, transport_detail(error), FailureKind::Transport)
    }

    /// The status failed the predicate; the detail comes from the body or status text
    pub(crate) fn status(action: &str, status: StatusCode, body: &ResponseBody) -> Self {
        Self::new(
            action,
            status_detail(status, body),
            FailureKind::Status(status.as_u16()),
        )
    }

    pub(crate) fn invalid_request(action: &str, detail: impl fmt::Display) -> Self {
        Self::new(action, detail.to_string(), FailureKind::InvalidRequest)
    }

    pub(crate) fn invalid_response(action: &str, detail: impl fmt::Display) -> Self {
        Self::new(action, detail.to_string(), FailureKind::InvalidResponse)
    }

    /// Description of the attempted action, e.g. `Failed to list deadletters`
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The extracted failure detail
    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn is_transport(&self) -> bool {
        self.kind == FailureKind::Transport
    }

    /// The HTTP status, when the call completed with a rejected status
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            FailureKind::Status(code) => Some(code),
            _ => None,
        }
    }
}

/// Flattens a transport error and its sources into one message
///
/// reqwest's top-level message only names the URL; the cause (connection
/// refused, dns error) lives further down the source chain.
fn transport_detail(error: &reqwest::Error) -> String {
    let mut detail = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }

    detail
}

/// Picks the failure detail for a rejected status
///
/// Priority: a structured body's `message` string, then a plain string body,
/// then the status reason phrase.
fn status_detail(status: StatusCode, body: &ResponseBody) -> String {
    match body {
        ResponseBody::Json(Value::Object(fields)) => {
            if let Some(Value::String(message)) = fields.get("message") {
                if !message.trim().is_empty() {
                    return message.clone();
                }
            }
        }
        ResponseBody::Json(Value::String(text)) if !text.trim().is_empty() => {
            return text.clone();
        }
        ResponseBody::Text(text) if !text.trim().is_empty() => {
            return text.clone();
        }
        _ => {}
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
