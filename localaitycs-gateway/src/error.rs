use chrono::{DateTime, Utc};
use thiserror::Error;

/// What went wrong while asking the upstream service for a recommendation.
#[derive(Error, Debug)]
pub enum GatewayErrorKind {
    /// Liveness probe failed; the main request was never sent
    #[error("AI service is not available. Please ensure the service is running.")]
    Unavailable { reason: String },

    /// Upstream answered with a non-success status
    #[error("AI API responded with status: {status}")]
    Api { status: u16, body: String },

    /// Network or connection error
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// Response body could not be decoded
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Client could not be built from the given settings
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Gateway failure stamped with the moment it happened.
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub occurred_at: DateTime<Utc>,
}

impl From<GatewayErrorKind> for GatewayError {
    fn from(kind: GatewayErrorKind) -> Self {
        Self {
            kind,
            occurred_at: Utc::now(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(source: reqwest::Error) -> Self {
        GatewayErrorKind::Network { source }.into()
    }
}

impl GatewayError {
    /// Create a service-unavailable error
    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        GatewayErrorKind::Unavailable {
            reason: reason.into(),
        }
        .into()
    }

    /// Create an API status error
    pub fn api_error(status: u16, body: String) -> Self {
        GatewayErrorKind::Api { status, body }.into()
    }

    /// Create a parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        GatewayErrorKind::Parse {
            message: message.into(),
        }
        .into()
    }

    /// Create a configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        GatewayErrorKind::InvalidConfig {
            message: message.into(),
        }
        .into()
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.kind, GatewayErrorKind::Unavailable { .. })
    }

    /// Underlying cause, including upstream bodies and probe failures.
    pub fn details(&self) -> String {
        match &self.kind {
            GatewayErrorKind::Unavailable { reason } => format!("{}: {}", self.kind, reason),
            GatewayErrorKind::Api { body, .. } if !body.is_empty() => {
                format!("{}: {}", self.kind, body)
            }
            _ => self.kind.to_string(),
        }
    }
}
