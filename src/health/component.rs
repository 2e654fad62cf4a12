use super::context::CheckContext;
use super::models::ComponentStatus;
use async_trait::async_trait;

/// A dependency whose health can be probed.
///
/// Implementations perform exactly one probe per call and never retry. Every failure of the
/// underlying dependency, including the context ending, is reported as an unhealthy
/// [`ComponentStatus`] rather than an error or a panic.
#[async_trait]
pub trait Component: Send + Sync {
    /// Stable lowercase name, unique within one health service.
    fn identifier(&self) -> &str;

    async fn health_check(&self, ctx: &CheckContext) -> ComponentStatus;
}
