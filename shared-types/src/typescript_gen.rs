/// Type names accepted by [`generate_typescript_definitions`], in export order.
pub const API_TYPE_NAMES: &[&str] = &[
    "Submission",
    "CompleteSubmission",
    "StoredSubmission",
    "TurnRole",
    "ConversationTurn",
    "ConversationView",
    "SendTurnRequest",
    "SendTurnResponse",
    "ErrorResponse",
    "RecommendationResponse",
    "ProxyErrorResponse",
];

pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let mut definitions = Vec::new();

    for name in type_names {
        let type_def = export_type(name)?;
        let cleaned = clean_type(type_def);

        if !cleaned.trim().is_empty() {
            definitions.push(cleaned);
        }
    }

    Ok(definitions.join("\n\n"))
}

fn export_type(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    use crate::*;
    use ts_rs::TS;

    let result = match name {
        "Submission" => Submission::export_to_string()?,
        "CompleteSubmission" => CompleteSubmission::export_to_string()?,
        "StoredSubmission" => StoredSubmission::export_to_string()?,

        "TurnRole" => TurnRole::export_to_string()?,
        "ConversationTurn" => ConversationTurn::export_to_string()?,
        "ConversationView" => ConversationView::export_to_string()?,
        "SendTurnRequest" => SendTurnRequest::export_to_string()?,
        "SendTurnResponse" => SendTurnResponse::export_to_string()?,

        "ErrorResponse" => ErrorResponse::export_to_string()?,
        "RecommendationResponse" => RecommendationResponse::export_to_string()?,
        "ProxyErrorResponse" => ProxyErrorResponse::export_to_string()?,

        _ => {
            return Err(format!(
                "Unknown type: '{}'. Available types can be found in shared-types/src/",
                name
            )
            .into());
        }
    };

    Ok(result)
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let lines: Vec<&str> = type_def.lines().collect();

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .cloned()
        .collect();

    filtered.join("\n").trim().to_string()
}
