//! Decode model output into a classification result

use crate::error::ClassifierError;
use serde_json::Value;
use taxonomer_domain::ClassificationResult;

/// Decode the message content of a completion
///
/// Decoding is all-or-nothing: the content must be a single JSON object.
pub fn decode_content(content: &str) -> Result<ClassificationResult, ClassifierError> {
    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => Ok(map),
        other => Err(ClassifierError::MalformedOutput(format!(
            "Expected JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_object() {
        let content = r#"{"IAB_categories": ["IAB1", "IAB14"], "Gender": "Female", "Extra": {"n": 1}}"#;
        let result = decode_content(content).unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result["IAB_categories"], json!(["IAB1", "IAB14"]));
        assert_eq!(result["Gender"], json!("Female"));
        assert_eq!(result["Extra"], json!({"n": 1}));
    }

    #[test]
    fn test_decode_matches_plain_json_decode() {
        let content = r#"{"Topics": ["villas", "travel", "luxury"], "Age_groups": ["boomers"]}"#;
        let expected: Value = serde_json::from_str(content).unwrap();
        assert_eq!(Value::Object(decode_content(content).unwrap()), expected);
    }

    #[test]
    fn test_decode_invalid_json() {
        let result = decode_content("This is not JSON");
        assert!(matches!(result, Err(ClassifierError::MalformedOutput(_))));
    }

    #[test]
    fn test_decode_truncated_json() {
        // max_tokens cut the object short
        let result = decode_content(r#"{"IAB_categories": ["IAB1", "IA"#);
        assert!(matches!(result, Err(ClassifierError::MalformedOutput(_))));
    }

    #[test]
    fn test_decode_non_object() {
        let result = decode_content(r#"["IAB1"]"#);
        match result {
            Err(ClassifierError::MalformedOutput(msg)) => assert!(msg.contains("array")),
            other => panic!("Expected MalformedOutput, got {:?}", other),
        }
    }
}
