use crate::error::GatewayError;
use async_trait::async_trait;

/// Adapter for the external service that turns a prompt into recommendation text.
///
/// Vendor wire formats stay behind this trait so [`crate::AiGateway`] and
/// everything above it never see them.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Liveness probe. An error means the service should be treated as down.
    async fn health_check(&self) -> Result<(), GatewayError>;

    /// Submit a prompt and return the display text extracted from the response.
    async fn run(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Get provider name (e.g., "langflow")
    fn provider_name(&self) -> &str;
}
