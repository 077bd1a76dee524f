use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of `POST /api/proxy/ai` on success.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct RecommendationResponse {
    pub message: String,
}

/// Body of `POST /api/proxy/ai` when the upstream call fails.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ProxyErrorResponse {
    pub error: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}
