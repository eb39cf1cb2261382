use crate::utils::error::Result;
use async_trait::async_trait;

/// The fetch capability: resolves a source identifier to a raw JSON body,
/// failing on transport problems or non-success responses.
#[async_trait]
pub trait PeopleSource: Send + Sync {
    async fn fetch(&self, source: &str) -> Result<serde_json::Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn request_timeout_seconds(&self) -> Option<u64>;
    fn output_format(&self) -> &str;
}
