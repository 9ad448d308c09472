//! Helper functions for parsing tool input and shaping tool output.
//!
//! Parsing functions delegate to the strum-derived FromStr implementations
//! on the enums in enquete-types.

use std::str::FromStr;

use enquete_types::{DisplayStyle, QuestionAttributes, QuestionType, RandomizationMode};

use crate::models::AddQuestionRequest;

// ============================================================================
// Parsing Helpers
// ============================================================================

/// Parse question type from string.
pub fn parse_question_type(s: &str) -> Option<QuestionType> {
    QuestionType::from_str(s)
}

/// Parse single-select display style from string.
pub fn parse_display_style(s: &str) -> Option<DisplayStyle> {
    DisplayStyle::from_str(s.trim()).ok()
}

/// Parse block randomization mode from string.
pub fn parse_randomization_mode(s: &str) -> Option<RandomizationMode> {
    RandomizationMode::from_str(s.trim()).ok()
}

/// Comma-separated canonical type names, for error messages.
pub fn question_type_names() -> String {
    QuestionType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collect the type-specific attributes of an add_question request.
pub fn question_attributes(req: &AddQuestionRequest) -> Result<QuestionAttributes, String> {
    let display = match req.display.as_deref() {
        Some(s) => Some(
            parse_display_style(s)
                .ok_or_else(|| format!("invalid display '{s}'. Use: vertical or horizontal"))?,
        ),
        None => None,
    };

    Ok(QuestionAttributes {
        min_selections: req.min_selections,
        max_selections: req.max_selections,
        min_value: req.min_value,
        max_value: req.max_value,
        scale: req.scale,
        display,
        multiline: req.multiline,
        placeholder: req.placeholder.clone(),
    })
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Tagged error payload: `{"error": "<message>"}`.
pub fn error_response(message: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

/// Compact JSON for tool results; serialization failures become error payloads.
pub fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_response(e))
}

/// Pretty JSON for resources; compact fallback never fails.
pub fn to_pretty_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Truncate a label to its first line and `max_chars` characters.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let trimmed = first_line.trim();

    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let truncated: String = trimmed.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_question_type("radio"), Some(QuestionType::SingleSelect));
        assert_eq!(parse_question_type("bogus"), None);
        assert_eq!(parse_display_style("Horizontal"), Some(DisplayStyle::Horizontal));
        assert_eq!(parse_randomization_mode(" FULL "), Some(RandomizationMode::Full));
        assert_eq!(parse_randomization_mode("sometimes"), None);
    }

    #[test]
    fn test_type_names_lists_all() {
        let names = question_type_names();
        for t in QuestionType::ALL {
            assert!(names.contains(t.as_str()));
        }
    }

    #[test]
    fn test_error_response_shape() {
        let v: serde_json::Value = serde_json::from_str(&error_response("boom")).unwrap();
        assert_eq!(v, serde_json::json!({"error": "boom"}));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("first\nsecond", 20), "first");
        assert_eq!(truncate_label("abcdefghijkl", 8), "abcde...");
    }
}
