//! Opaque documents owned by the crawler service
//!
//! The client never holds a schema for these. Each type wraps the raw JSON
//! and serializes transparently, so payloads travel unmodified; a few typed
//! accessors cover the fields the client actually reads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The crawler's configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration(Value);

impl Configuration {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Desired crawl concurrency (`crawler.count`)
    pub fn crawler_count(&self) -> Option<u64> {
        self.0.pointer("/crawler/count").and_then(Value::as_u64)
    }

    /// Organizations to crawl (`crawler.orgList`), in order
    pub fn org_list(&self) -> Option<Vec<&str>> {
        self.0
            .pointer("/crawler/orgList")
            .and_then(Value::as_array)
            .map(|orgs| orgs.iter().filter_map(Value::as_str).collect())
    }

    /// Looks up an arbitrary field by JSON pointer
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// A request payload meaningful only to the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrawlRequest(Value);

impl CrawlRequest {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for CrawlRequest {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A request the service parked after exhausting its retries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deadletter(Value);

impl Deadletter {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Statistics for one named queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueInfo(Value);

impl QueueInfo {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Number of pending requests, if the service reports it
    ///
    /// Services report this as `count`; `depth` is accepted as well.
    pub fn depth(&self) -> Option<u64> {
        ["count", "depth"]
            .iter()
            .find_map(|key| self.0.get(key).and_then(Value::as_u64))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}
