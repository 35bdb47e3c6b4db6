//! Parsing of model responses into [`Interpretation`] values.
//!
//! Models are asked for a strict JSON object:
//!
//! ```json
//! {"command": "build", "confidence": 0.92, "alternatives": ["build-all"]}
//! ```
//!
//! In practice responses sometimes arrive wrapped in markdown code fences,
//! so parsing strips those first. Everything else (missing fields, wrong
//! types, out-of-range confidence, a null command paired with nonzero
//! confidence) is rejected.

use serde_json::Value;

use crate::core::error::DomainError;
use crate::interpret::entities::{Confidence, Interpretation};

/// Strip a surrounding markdown code fence (```json ... ``` or ``` ... ```)
/// if present, returning the inner payload.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json", "JSON", empty) up to the first newline.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return trimmed,
    };
    match body.rsplit_once("```") {
        Some((inner, _)) => inner.trim(),
        None => trimmed,
    }
}

/// Parse a raw model response into an [`Interpretation`].
pub fn parse_interpretation(raw: &str) -> Result<Interpretation, DomainError> {
    let payload = strip_code_fences(raw);
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| DomainError::InvalidInterpretation(format!("not valid JSON: {e}")))?;

    let Value::Object(map) = &value else {
        return Err(DomainError::InvalidInterpretation(
            "expected a JSON object".to_string(),
        ));
    };

    let command = match map.get("command") {
        Some(Value::String(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Some(Value::Null) => None,
        Some(other) => {
            return Err(DomainError::InvalidInterpretation(format!(
                "command must be a string or null, got {other}"
            )));
        }
        None => {
            return Err(DomainError::InvalidInterpretation(
                "missing field: command".to_string(),
            ));
        }
    };

    let confidence = match map.get("confidence") {
        Some(Value::Number(n)) => {
            let value = n.as_f64().ok_or_else(|| {
                DomainError::InvalidInterpretation(format!("confidence is not a float: {n}"))
            })?;
            Confidence::new(value)
                .map_err(|_| DomainError::InvalidInterpretation(format!(
                    "confidence {value} is outside [0.0, 1.0]"
                )))?
        }
        Some(other) => {
            return Err(DomainError::InvalidInterpretation(format!(
                "confidence must be a number, got {other}"
            )));
        }
        None => {
            return Err(DomainError::InvalidInterpretation(
                "missing field: confidence".to_string(),
            ));
        }
    };

    let alternatives = match map.get("alternatives") {
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) if !s.trim().is_empty() => out.push(s.trim().to_string()),
                    Value::String(_) => {}
                    other => {
                        return Err(DomainError::InvalidInterpretation(format!(
                            "alternatives must contain strings, got {other}"
                        )));
                    }
                }
            }
            out
        }
        Some(Value::Null) | None => {
            return Err(DomainError::InvalidInterpretation(
                "missing field: alternatives".to_string(),
            ));
        }
        Some(other) => {
            return Err(DomainError::InvalidInterpretation(format!(
                "alternatives must be an array, got {other}"
            )));
        }
    };

    let interpretation = Interpretation::new(command, confidence, alternatives)?;

    Ok(match map.get("reasoning") {
        Some(Value::String(s)) if !s.trim().is_empty() => interpretation.with_reasoning(s.trim()),
        _ => interpretation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let interp = parse_interpretation(
            r#"{"command": "build", "confidence": 0.92, "alternatives": ["build-all"]}"#,
        )
        .unwrap();
        assert_eq!(interp.command.as_deref(), Some("build"));
        assert_eq!(interp.confidence.value(), 0.92);
        assert_eq!(interp.alternatives, vec!["build-all"]);
    }

    #[test]
    fn test_parse_strips_json_fence() {
        let raw = "```json\n{\"command\": \"test\", \"confidence\": 1.0, \"alternatives\": []}\n```";
        let interp = parse_interpretation(raw).unwrap();
        assert_eq!(interp.command.as_deref(), Some("test"));
    }

    #[test]
    fn test_parse_strips_bare_fence() {
        let raw = "```\n{\"command\": null, \"confidence\": 0.0, \"alternatives\": []}\n```";
        let interp = parse_interpretation(raw).unwrap();
        assert!(interp.command.is_none());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_interpretation(r#"{"command": "build"}"#).is_err());
        assert!(parse_interpretation(r#"{"confidence": 0.5, "alternatives": []}"#).is_err());
        assert!(parse_interpretation(r#"{"command": "build", "confidence": 0.5}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_out_of_range_confidence() {
        let raw = r#"{"command": "build", "confidence": 1.5, "alternatives": []}"#;
        assert!(parse_interpretation(raw).is_err());
    }

    #[test]
    fn test_parse_rejects_null_command_with_confidence() {
        let raw = r#"{"command": null, "confidence": 0.7, "alternatives": []}"#;
        assert!(parse_interpretation(raw).is_err());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_interpretation("[1, 2, 3]").is_err());
        assert!(parse_interpretation("not json at all").is_err());
    }

    #[test]
    fn test_parse_empty_command_string_becomes_none() {
        let raw = r#"{"command": "  ", "confidence": 0.0, "alternatives": []}"#;
        let interp = parse_interpretation(raw).unwrap();
        assert!(interp.command.is_none());
    }

    #[test]
    fn test_parse_keeps_reasoning() {
        let raw = r#"{"command": "deploy", "confidence": 0.9, "alternatives": [], "reasoning": "matches deploy target"}"#;
        let interp = parse_interpretation(raw).unwrap();
        assert_eq!(interp.reasoning.as_deref(), Some("matches deploy target"));
    }
}
