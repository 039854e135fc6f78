use crate::api::CrawlerClient;
use crate::dispatch::{ServiceCall, ServiceError};
use crate::model::{CrawlRequest, QueueInfo};
use serde_json::Value;

impl CrawlerClient {
    /// Appends requests to the tail of a queue, preserving their order
    ///
    /// The service creates the queue if it does not exist yet.
    pub async fn queue_requests(
        &self,
        requests: &[CrawlRequest],
        queue: &str,
    ) -> Result<Value, ServiceError> {
        const ACTION: &str = "Failed to queue requests";

        let body = serde_json::to_value(requests)
            .map_err(|e| ServiceError::invalid_request(ACTION, e))?;
        tracing::info!(queue, count = requests.len(), "Queueing requests");

        let call = ServiceCall::post(ACTION)
            .segment("requests")
            .segment(queue)
            .body(body);
        Ok(self.dispatcher.call(call).await?.into_json())
    }

    /// Reads up to `count` requests from the head of a queue without removing them
    pub async fn get_requests(&self, queue: &str, count: u32) -> Result<Vec<CrawlRequest>, ServiceError> {
        let call = ServiceCall::get("Failed to get requests")
            .segment("requests")
            .segment(queue)
            .query("count", count);
        let requests: Option<Vec<CrawlRequest>> = self.dispatcher.call_json(call).await?;
        Ok(requests.unwrap_or_default())
    }

    /// Removes up to `count` requests from the head of a queue
    pub async fn delete_requests(&self, queue: &str, count: u32) -> Result<Value, ServiceError> {
        tracing::info!(queue, count, "Deleting requests");
        let call = ServiceCall::delete("Failed to delete requests")
            .segment("requests")
            .segment(queue)
            .query("count", count);
        Ok(self.dispatcher.call(call).await?.into_json())
    }

    /// Removes every request from a queue; flushing an empty queue is not an error
    pub async fn flush_queue(&self, queue: &str) -> Result<Value, ServiceError> {
        tracing::info!(queue, "Flushing queue");
        let call = ServiceCall::put(format!("Failed to flush queue {}", queue))
            .segment("queues")
            .segment(queue);
        Ok(self.dispatcher.call(call).await?.into_json())
    }

    /// Reads queue statistics
    pub async fn get_info(&self, queue: &str) -> Result<QueueInfo, ServiceError> {
        let call = ServiceCall::get(format!("Failed to get info for queue {}", queue))
            .segment("queues")
            .segment(queue)
            .segment("info");
        self.dispatcher.call_json(call).await
    }
}
