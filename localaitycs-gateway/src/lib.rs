//! # LocalAItycs Gateway
//!
//! Forwards completed submissions to an external recommendation service and
//! extracts a single display text from its response.
//!
//! ## Example
//!
//! ```rust,no_run
//! use localaitycs_gateway::{langflow::LangflowClient, AiGateway};
//! use shared_types::CompleteSubmission;
//! use std::{sync::Arc, time::Duration};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LangflowClient::new("my-flow-id", Duration::from_secs(300))?
//!         .with_base_url("http://127.0.0.1:7860")
//!         .with_api_key("your-api-key");
//!     let gateway = AiGateway::new(Arc::new(client));
//!
//!     let text = gateway
//!         .recommend(&CompleteSubmission {
//!             budget: 1000.0,
//!             city: "Curitiba".to_string(),
//!             investment_type: "Padaria".to_string(),
//!             target_audience: "Famílias".to_string(),
//!         })
//!         .await?;
//!
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod gateway;
pub mod langflow;
pub mod prompt;

pub use client::UpstreamClient;
pub use error::{GatewayError, GatewayErrorKind};
pub use gateway::AiGateway;
pub use langflow::FALLBACK_MESSAGE;
pub use prompt::build_prompt;
