use crate::config::UpstreamConfig;
use localaitycs_gateway::{langflow::LangflowClient, AiGateway};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub fn create_ai_gateway(config: &UpstreamConfig) -> anyhow::Result<Arc<AiGateway>> {
    let mut client = LangflowClient::new(
        config.flow_id.clone(),
        Duration::from_secs(config.timeout_secs),
    )?
    .with_base_url(config.base_url.clone());

    if let Some(api_key) = &config.api_key {
        client = client.with_api_key(api_key.clone());
    }
    if let Some(tweaks) = &config.tweaks {
        client = client.with_tweaks(tweaks.clone());
    }

    info!(
        base_url = %config.base_url,
        flow_id = %config.flow_id,
        authenticated = config.api_key.is_some(),
        "Configured AI gateway"
    );

    Ok(Arc::new(AiGateway::new(Arc::new(client))))
}
