use crate::common::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Outbound HTTP seam used by the catalog fetcher
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// GET `url` and decode the body as JSON. Non-success statuses are errors.
    async fn get_json(&self, url: &str) -> Result<Value>;
}
