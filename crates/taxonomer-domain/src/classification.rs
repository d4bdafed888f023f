//! Classification outcome types

use serde_json::{json, Map, Value};

/// Message carried by the sentinel payload of an unavailable classification
pub const UNAVAILABLE_MESSAGE: &str = "Unknown error!";

/// Decoded model output: taxonomy name to label, label list, or nested value
///
/// The shape is whatever the model returned; it is not validated against the
/// schema that constrained generation.
pub type ClassificationResult = Map<String, Value>;

/// Outcome of a single classification call
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The backend answered and its content decoded into a mapping
    Labeled(ClassificationResult),

    /// The backend could not produce a completion
    Unavailable {
        /// Human-readable cause, for logs; not part of the sentinel payload
        reason: String,
    },
}

impl Classification {
    /// Whether labels are available
    pub fn is_available(&self) -> bool {
        matches!(self, Classification::Labeled(_))
    }

    /// Borrow the decoded labels, if any
    pub fn labels(&self) -> Option<&ClassificationResult> {
        match self {
            Classification::Labeled(labels) => Some(labels),
            Classification::Unavailable { .. } => None,
        }
    }

    /// Take the decoded labels, if any
    pub fn into_labels(self) -> Option<ClassificationResult> {
        match self {
            Classification::Labeled(labels) => Some(labels),
            Classification::Unavailable { .. } => None,
        }
    }

    /// Sentinel payload reported for unavailable classifications
    pub fn sentinel() -> Value {
        json!({ "message": UNAVAILABLE_MESSAGE })
    }

    /// JSON form: the label mapping, or the sentinel
    pub fn to_json(&self) -> Value {
        match self {
            Classification::Labeled(labels) => Value::Object(labels.clone()),
            Classification::Unavailable { .. } => Self::sentinel(),
        }
    }
}

/// Flatten a result value into display strings
///
/// Strings stay as-is, arrays are flattened one level, anything else is
/// rendered as compact JSON.
pub fn label_texts(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_serializes_to_sentinel() {
        let outcome = Classification::Unavailable {
            reason: "HTTP 500".to_string(),
        };
        assert!(!outcome.is_available());
        assert_eq!(outcome.to_json(), json!({"message": "Unknown error!"}));
        assert!(outcome.labels().is_none());
    }

    #[test]
    fn test_labeled_to_json() {
        let mut labels = ClassificationResult::new();
        labels.insert("Gender".to_string(), json!(["Female"]));
        let outcome = Classification::Labeled(labels.clone());

        assert!(outcome.is_available());
        assert_eq!(outcome.to_json(), json!({"Gender": ["Female"]}));
        assert_eq!(outcome.into_labels(), Some(labels));
    }

    #[test]
    fn test_label_texts() {
        assert_eq!(label_texts(&json!("IAB1")), vec!["IAB1"]);
        assert_eq!(label_texts(&json!(["a", "b"])), vec!["a", "b"]);
        assert_eq!(label_texts(&json!([1, {"x": 2}])), vec!["1", "{\"x\":2}"]);
        assert!(label_texts(&Value::Null).is_empty());
    }
}
