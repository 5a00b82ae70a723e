pub mod gemini;
pub mod insight;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::models::insight::InsightRequest;

/// A remote vision-language model that comments on an image.
#[async_trait]
pub trait InsightProvider: Send + Sync + std::fmt::Debug {
    /// Sends one request. `Ok(None)` means the provider answered but the
    /// response carried no text.
    async fn generate(&self, request: &InsightRequest) -> anyhow::Result<Option<String>>;
}
