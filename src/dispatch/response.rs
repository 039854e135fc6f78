use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Body of a completed call
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// No body at all (HEAD, 204, or an empty 200)
    Empty,

    /// A body that parsed as JSON
    Json(Value),

    /// Anything else, kept verbatim
    Text(String),
}

impl ResponseBody {
    /// Classifies raw body bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return ResponseBody::Empty;
        }

        match serde_json::from_slice(bytes) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    /// Converts the body into a JSON value: empty becomes `null`, text a JSON string
    pub fn into_json(self) -> Value {
        match self {
            ResponseBody::Empty => Value::Null,
            ResponseBody::Json(value) => value,
            ResponseBody::Text(text) => Value::String(text),
        }
    }
}

/// A call that completed with an accepted status
#[derive(Debug, Clone)]
pub struct ServiceResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: ResponseBody,
}

impl ServiceResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: ResponseBody) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    pub fn into_json(self) -> Value {
        self.body.into_json()
    }

    /// Deserializes the body; an empty body is read as `null`
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.into_json())
    }
}
