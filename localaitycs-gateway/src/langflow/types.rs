use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shown when the response carries no usable text.
pub const FALLBACK_MESSAGE: &str =
    "Desculpe, não foi possível processar a resposta neste momento.";

/// Component ids forwarded as empty tweaks on every run.
pub const DEFAULT_TWEAKS: &[&str] = &[
    "Agent-paooE",
    "ChatInput-Q5FcW",
    "PythonFunction-x3mJW",
    "NVIDIAEmbeddingsComponent-tRTkt",
    "Chroma-dOhpM",
    "ChatOutput-GwK2m",
];

/// Body of `POST /api/v1/run/{flow_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LangflowRunRequest {
    pub input_value: String,
    pub output_type: String,
    pub input_type: String,
    /// Per-component overrides; always empty objects here
    pub tweaks: Map<String, Value>,
}

impl LangflowRunRequest {
    pub fn chat<S: AsRef<str>>(input_value: impl Into<String>, tweaks: &[S]) -> Self {
        Self {
            input_value: input_value.into(),
            output_type: "chat".to_string(),
            input_type: "chat".to_string(),
            tweaks: tweaks
                .iter()
                .map(|id| (id.as_ref().to_string(), Value::Object(Map::new())))
                .collect(),
        }
    }
}

/// Pull the display text out of a run response.
///
/// Precedence: `outputs[0].outputs[0].results.message.data.text`, then a
/// top-level `message` string, then [`FALLBACK_MESSAGE`].
pub fn extract_message(response: &Value) -> String {
    nested_text(response)
        .or_else(|| response.get("message").and_then(Value::as_str))
        .unwrap_or(FALLBACK_MESSAGE)
        .to_string()
}

fn nested_text(response: &Value) -> Option<&str> {
    response
        .pointer("/outputs/0/outputs/0/results/message/data/text")
        .and_then(Value::as_str)
}
