//! JSON-Patch style operations against the service configuration
//!
//! The client only builds these; the service applies a whole batch atomically.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Pointer to the desired crawl concurrency
pub const CRAWLER_COUNT_PATH: &str = "/crawler/count";

/// Pointer to the list of organizations to crawl
pub const CRAWLER_ORG_LIST_PATH: &str = "/crawler/orgList";

/// The kind of mutation a patch performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatchOp::Add => "add",
            PatchOp::Remove => "remove",
            PatchOp::Replace => "replace",
            PatchOp::Move => "move",
            PatchOp::Copy => "copy",
            PatchOp::Test => "test",
        };
        write!(f, "{}", name)
    }
}

/// One mutation of the configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,

    /// JSON pointer into the configuration, e.g. `/crawler/count`
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Source pointer for `move` and `copy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl PatchOperation {
    fn with_value(op: PatchOp, path: impl Into<String>, value: Value) -> Self {
        Self {
            op,
            path: path.into(),
            value: Some(value),
            from: None,
        }
    }

    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchOp::Replace, path, value.into())
    }

    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchOp::Add, path, value.into())
    }

    pub fn test(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchOp::Test, path, value.into())
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Remove,
            path: path.into(),
            value: None,
            from: None,
        }
    }

    /// Replaces the desired crawler count, clamping negatives to zero
    pub fn crawler_count(count: i64) -> Self {
        Self::replace(CRAWLER_COUNT_PATH, count.max(0))
    }

    /// Replaces the organization list
    pub fn org_list<I, S>(orgs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let orgs: Vec<Value> = orgs.into_iter().map(|org| Value::String(org.into())).collect();
        Self::replace(CRAWLER_ORG_LIST_PATH, orgs)
    }
}
