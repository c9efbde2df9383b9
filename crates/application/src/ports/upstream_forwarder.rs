use async_trait::async_trait;
use authdns_domain::DomainError;

/// Relays a raw query to the upstream resolver.
#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Sends `request` upstream and returns the reply bytes, carrying the
    /// same transaction id as `request`. Implementations bound the wait
    /// and fail with [`DomainError::QueryTimeout`] when it elapses.
    async fn forward(&self, request: &[u8]) -> Result<Vec<u8>, DomainError>;
}
