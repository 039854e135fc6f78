use crate::api::CrawlerClient;
use crate::dispatch::{ServiceCall, ServiceError};
use crate::model::Deadletter;
use serde_json::Value;

/// Response header carrying the deadletter total on `HEAD /deadletters`
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

impl CrawlerClient {
    /// Lists every current deadletter
    pub async fn list_deadletters(&self) -> Result<Vec<Deadletter>, ServiceError> {
        let call = ServiceCall::get("Failed to list deadletters").segment("deadletters");
        let deadletters: Option<Vec<Deadletter>> = self.dispatcher.call_json(call).await?;
        Ok(deadletters.unwrap_or_default())
    }

    /// Counts deadletters without transferring them
    ///
    /// The total comes back in the `x-total-count` header of a HEAD response.
    pub async fn get_deadletter_count(&self) -> Result<u64, ServiceError> {
        const ACTION: &str = "Failed to count deadletters";

        let call = ServiceCall::head(ACTION).segment("deadletters");
        let response = self.dispatcher.call(call).await?;

        let raw = response.header(TOTAL_COUNT_HEADER).ok_or_else(|| {
            ServiceError::invalid_response(ACTION, format!("missing {} header", TOTAL_COUNT_HEADER))
        })?;

        raw.trim().parse::<u64>().map_err(|e| {
            ServiceError::invalid_response(
                ACTION,
                format!("invalid {} header '{}': {}", TOTAL_COUNT_HEADER, raw, e),
            )
        })
    }

    /// Fetches one deadletter by urn
    pub async fn get_deadletter(&self, urn: &str) -> Result<Deadletter, ServiceError> {
        let call = ServiceCall::get(format!("Failed to get deadletter {}", urn))
            .segment("deadletters")
            .segment(urn);
        self.dispatcher.call_json(call).await
    }

    /// Permanently removes a deadletter
    pub async fn delete_deadletter(&self, urn: &str) -> Result<Value, ServiceError> {
        tracing::info!(urn, "Deleting deadletter");
        let call = ServiceCall::delete(format!("Failed to delete deadletter {}", urn))
            .segment("deadletters")
            .segment(urn);
        Ok(self.dispatcher.call(call).await?.into_json())
    }

    /// Moves a deadletter back into a live queue
    ///
    /// Removal and reinsertion happen as one operation on the service side.
    pub async fn requeue_deadletter(&self, urn: &str, queue: &str) -> Result<Value, ServiceError> {
        tracing::info!(urn, queue, "Requeueing deadletter");
        let call = ServiceCall::delete(format!("Failed to requeue deadletter {} on {}", urn, queue))
            .segment("deadletters")
            .segment(urn)
            .query("requeue", queue);
        Ok(self.dispatcher.call(call).await?.into_json())
    }
}
