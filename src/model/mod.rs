//! Data model for the crawler service's resources
//!
//! This module contains:
//! - Patch operations used to mutate the configuration
//! - Transparent wrappers for the documents the service owns

mod documents;
mod patch;

pub use documents::{Configuration, CrawlRequest, Deadletter, QueueInfo};
pub use patch::{PatchOp, PatchOperation, CRAWLER_COUNT_PATH, CRAWLER_ORG_LIST_PATH};

/// Queue used by `queue_requests` when the caller has no preference
pub const DEFAULT_QUEUE: &str = "normal";

/// Queue that requeued deadletters go back to by default
pub const DEFAULT_REQUEUE_QUEUE: &str = "soon";
