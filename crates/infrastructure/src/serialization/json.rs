//! JSON serialization helpers for deterministic output.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Struct fields in declaration order, map keys in source order
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n'); // Trailing newline
    Ok(json)
}

/// Deserializes JSON from a string.
///
/// Handles both pretty-printed and minified JSON.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::collections::BTreeMap;
    use std::time::Duration;
    use testlang_domain::{AssertionKind, AssertionOutcome, CaseReport, HttpMethod, TestReport};

    #[test]
    fn test_stable_serialization_has_trailing_newline() {
        let mut map = BTreeMap::new();
        map.insert("z_key", "value1");
        map.insert("a_key", "value2");

        let json = to_json_stable(&map).expect("serialization should work");
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_stable_serialization_uses_two_space_indent() {
        let mut map = BTreeMap::new();
        map.insert("key", "value");

        let json = to_json_stable(&map).expect("serialization should work");
        assert!(json.contains("  \"key\""));
    }

    #[test]
    fn test_report_fields_keep_declaration_order() {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        let case = CaseReport::new(
            "GetUser",
            HttpMethod::Get,
            "http://localhost:8080/api/users/42",
            vec![AssertionOutcome::pass(
                AssertionKind::Status,
                "status",
                "200",
                "200",
            )],
            Duration::from_millis(3),
        );
        let report = TestReport::new("User API", vec![case], epoch, epoch);

        let json = to_json_stable(&report).expect("serialization should work");
        let position = |key: &str, indent: usize| {
            json.find(&format!("\n{}\"{key}\":", " ".repeat(indent)))
                .unwrap_or_else(|| panic!("{key} should be in json"))
        };

        let top_level = [
            "suite_name",
            "started_at",
            "finished_at",
            "cases",
            "total",
            "passed",
            "failed",
        ]
        .map(|key| position(key, 2));
        assert!(top_level.windows(2).all(|w| w[0] < w[1]));

        let case_fields = ["name", "method", "url", "outcomes", "elapsed_ms", "passed"]
            .map(|key| position(key, 6));
        assert!(case_fields.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(json, to_json_stable(&report).expect("serialization should work"));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let mut original = BTreeMap::new();
        original.insert("key".to_string(), "value".to_string());

        let json = to_json_stable(&original).expect("serialization should work");
        let restored: BTreeMap<String, String> =
            from_json(&json).expect("deserialization should work");

        assert_eq!(original, restored);
    }

    #[test]
    fn test_from_json_reports_syntax_errors() {
        let result: Result<BTreeMap<String, String>, _> = from_json(r#"{"invalid": }"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
