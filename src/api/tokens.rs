use crate::api::CrawlerClient;
use crate::dispatch::{ServiceCall, ServiceError};
use serde_json::Value;

/// Separator between tokens in the replacement set
const TOKEN_SEPARATOR: &str = ";";

impl CrawlerClient {
    /// Replaces the whole set of tokens the service accepts
    ///
    /// The tokens are sent as one `;`-joined string, so a token containing
    /// `;` is rejected before anything is sent.
    pub async fn set_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Value, ServiceError> {
        const ACTION: &str = "Failed to set tokens";

        if let Some(bad) = tokens.iter().position(|t| t.as_ref().contains(TOKEN_SEPARATOR)) {
            return Err(ServiceError::invalid_request(
                ACTION,
                format!("token #{} contains '{}'", bad + 1, TOKEN_SEPARATOR),
            ));
        }

        let joined = tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<&str>>()
            .join(TOKEN_SEPARATOR);
        tracing::info!(count = tokens.len(), "Replacing service token set");

        let call = ServiceCall::put(ACTION)
            .segment("config")
            .segment("tokens")
            .body(Value::String(joined));
        Ok(self.dispatcher.call(call).await?.into_json())
    }

    /// Reads back the current token set, in whatever form the service reports it
    pub async fn get_tokens(&self) -> Result<Value, ServiceError> {
        let call = ServiceCall::get("Failed to get tokens")
            .segment("config")
            .segment("tokens");
        Ok(self.dispatcher.call(call).await?.into_json())
    }
}
