pub mod client;
pub mod types;

pub use client::LangflowClient;
pub use types::*;
