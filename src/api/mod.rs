//! The crawler service's call surface
//!
//! [`CrawlerClient`] exposes one async method per remote operation, grouped
//! by resource:
//! - configuration (`configuration.rs`)
//! - access tokens (`tokens.rs`)
//! - request queues (`queues.rs`)
//! - deadletters (`deadletters.rs`)
//!
//! Each method issues exactly one call through the [`Dispatcher`] and
//! surfaces its failure as a [`ServiceError`](crate::dispatch::ServiceError).

mod configuration;
mod deadletters;
mod queues;
mod tokens;

pub use deadletters::TOTAL_COUNT_HEADER;

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::ControlError;

/// Client for one crawler service
///
/// Cheap to clone; clones share the underlying connection pool. Calls may be
/// issued concurrently, and the client imposes no ordering between them.
///
/// # Example
///
/// ```no_run
/// use crawler_control::{ClientConfig, CrawlerClient};
///
/// # async fn run() -> crawler_control::Result<()> {
/// let client = CrawlerClient::new(&ClientConfig::resolve(None, None))?;
/// client.configure_count(8).await?;
/// println!("{} deadletters", client.get_deadletter_count().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CrawlerClient {
    dispatcher: Dispatcher,
}

impl CrawlerClient {
    /// Creates a client from a validated configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ControlError> {
        let dispatcher = Dispatcher::new(config)?;
        tracing::debug!(
            base_url = %dispatcher.base_url(),
            token = %config.token_fingerprint(),
            "Created crawler client"
        );
        Ok(Self { dispatcher })
    }

    /// Wraps an existing dispatcher
    pub fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
