use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::{
    error::GatewayError,
    langflow::types::{extract_message, LangflowRunRequest, DEFAULT_TWEAKS},
};

/// Client for a Langflow flow exposed over its run API
pub struct LangflowClient {
    api_key: Option<String>,
    flow_id: String,
    base_url: String,
    tweaks: Vec<String>,
    http_client: reqwest::Client,
}

impl LangflowClient {
    /// Create a client for the given flow with the default base URL and tweaks
    pub fn new(flow_id: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let flow_id = flow_id.into();
        if flow_id.is_empty() {
            return Err(GatewayError::invalid_config("Flow id cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::invalid_config(e.to_string()))?;

        Ok(Self {
            api_key: None,
            flow_id,
            base_url: "http://127.0.0.1:7860".to_string(),
            tweaks: DEFAULT_TWEAKS.iter().map(|t| t.to_string()).collect(),
            http_client,
        })
    }

    /// Set a custom base URL for the service
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Send `x-api-key` with every run request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replace the component ids forwarded as tweaks
    pub fn with_tweaks(mut self, tweaks: Vec<String>) -> Self {
        self.tweaks = tweaks;
        self
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    fn run_url(&self) -> String {
        format!("{}/api/v1/run/{}?stream=false", self.base_url, self.flow_id)
    }

    fn headers(&self) -> Result<HeaderMap, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.api_key {
            headers.insert(
                "x-api-key",
                HeaderValue::from_str(api_key)
                    .map_err(|_| GatewayError::invalid_config("Invalid API key format"))?,
            );
        }
        Ok(headers)
    }
}

#[async_trait]
impl crate::client::UpstreamClient for LangflowClient {
    async fn health_check(&self) -> Result<(), GatewayError> {
        let url = format!("{}/health-check", self.base_url);

        // Any HTTP answer proves the service is up; only transport failures count.
        self.http_client
            .get(&url)
            .send()
            .await
            .map(|response| {
                debug!(status = %response.status(), "AI service health check answered");
            })
            .map_err(|e| {
                warn!(error = %e, url = %url, "AI service health check failed");
                GatewayError::unavailable(e.to_string())
            })
    }

    async fn run(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = LangflowRunRequest::chat(prompt, self.tweaks.as_slice());

        let response = self
            .http_client
            .post(self.run_url())
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let body: serde_json::Value = response
                .json()
                .await
                .map_err(|e| GatewayError::parse(format!("Failed to parse response: {}", e)))?;
            debug!(response = %body, "AI API response");
            Ok(extract_message(&body))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = status.as_u16(), body = %error_text, "AI API error response");
            Err(GatewayError::api_error(status.as_u16(), error_text))
        }
    }

    fn provider_name(&self) -> &str {
        "langflow"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_flow_id_rejected() {
        let result = LangflowClient::new("", Duration::from_secs(5));
        assert!(result.is_err());
    }

    #[test]
    fn test_run_url_includes_flow_and_disables_streaming() {
        let client = LangflowClient::new("cd2f8e48", Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://localhost:7860/");
        assert_eq!(
            client.run_url(),
            "http://localhost:7860/api/v1/run/cd2f8e48?stream=false"
        );
    }

    #[test]
    fn test_api_key_header_only_when_configured() {
        let client = LangflowClient::new("flow", Duration::from_secs(5)).unwrap();
        assert!(client.headers().unwrap().get("x-api-key").is_none());

        let client = client.with_api_key("sk-test");
        assert_eq!(client.headers().unwrap()["x-api-key"], "sk-test");
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let client = LangflowClient::new("flow", Duration::from_secs(5))
            .unwrap()
            .with_api_key("bad\nkey");
        assert!(client.headers().is_err());
    }
}
