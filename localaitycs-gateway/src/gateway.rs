use crate::{client::UpstreamClient, error::GatewayError, prompt::build_prompt};
use shared_types::CompleteSubmission;
use std::sync::Arc;
use tracing::{info, warn};

/// Turns completed submissions into recommendation text through an upstream adapter.
pub struct AiGateway {
    upstream: Arc<dyn UpstreamClient>,
}

impl AiGateway {
    pub fn new(upstream: Arc<dyn UpstreamClient>) -> Self {
        Self { upstream }
    }

    pub fn provider_name(&self) -> &str {
        self.upstream.provider_name()
    }

    /// Probe the upstream, then send the prompt built from `submission`.
    ///
    /// A failed probe returns an unavailable error and the main request is
    /// never sent. No retries.
    pub async fn recommend(&self, submission: &CompleteSubmission) -> Result<String, GatewayError> {
        info!(
            budget = submission.budget,
            city = %submission.city,
            investment_type = %submission.investment_type,
            target_audience = %submission.target_audience,
            provider = self.provider_name(),
            "Requesting location recommendation"
        );

        if let Err(e) = self.upstream.health_check().await {
            warn!(error = %e, "Skipping recommendation, AI service unavailable");
            return Err(if e.is_unavailable() {
                e
            } else {
                GatewayError::unavailable(e.details())
            });
        }

        let prompt = build_prompt(submission);
        self.upstream.run(&prompt).await
    }
}
