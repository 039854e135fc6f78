use crate::api::CrawlerClient;
use crate::dispatch::{ServiceCall, ServiceError};
use crate::model::{Configuration, PatchOperation};
use serde_json::Value;

impl CrawlerClient {
    /// Reads the full configuration document
    pub async fn get_configuration(&self) -> Result<Configuration, ServiceError> {
        let call = ServiceCall::get("Failed to get crawler configuration").segment("config");
        self.dispatcher.call_json(call).await
    }

    /// Sends a batch of patch operations, applied atomically by the service
    ///
    /// Returns whatever the service answers with (often `null`).
    pub async fn configure_crawler(&self, patches: &[PatchOperation]) -> Result<Value, ServiceError> {
        const ACTION: &str = "Failed to patch crawler configuration";

        let body = serde_json::to_value(patches)
            .map_err(|e| ServiceError::invalid_request(ACTION, e))?;
        for patch in patches {
            tracing::info!(op = %patch.op, path = %patch.path, "Patching crawler configuration");
        }

        let call = ServiceCall::patch(ACTION).segment("config").body(body);
        Ok(self.dispatcher.call(call).await?.into_json())
    }

    /// Sets the desired crawler count; negative values are sent as zero
    pub async fn configure_count(&self, count: i64) -> Result<Value, ServiceError> {
        self.configure_crawler(&[PatchOperation::crawler_count(count)])
            .await
    }

    /// Replaces the list of organizations to crawl
    pub async fn configure_orgs<S: AsRef<str>>(&self, orgs: &[S]) -> Result<Value, ServiceError> {
        let patch = PatchOperation::org_list(orgs.iter().map(|org| org.as_ref().to_string()));
        self.configure_crawler(&[patch]).await
    }
}
