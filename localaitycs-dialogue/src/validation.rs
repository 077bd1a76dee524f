use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Budget must be a plain decimal number, got '{0}'")]
    NotANumber(String),
    #[error("Budget must be greater than zero, got {0}")]
    NotPositive(f64),
}

fn budget_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // ASCII digits only; no sign, separators, currency or exponent
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("budget pattern is valid"))
}

/// Parse a budget answer. Surrounding whitespace is ignored.
pub fn parse_budget(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if !budget_pattern().is_match(trimmed) {
        return Err(ValidationError::NotANumber(trimmed.to_string()));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;

    // Long digit strings overflow to infinity
    if !value.is_finite() {
        return Err(ValidationError::NotANumber(trimmed.to_string()));
    }

    if value <= 0.0 {
        return Err(ValidationError::NotPositive(value));
    }

    Ok(value)
}
