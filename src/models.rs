// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/run-{interpreter}`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ExecutionRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Exactly one of `output` or `error` is present on the wire.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ExecutionResult {
    Success { output: String },
    Failure { error: String },
}

/// One draggable fragment of a puzzle snippet.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeLine {
    pub id: String,
    pub text: String,
}

/// A code line as sent to the front-end, with its hover text if any keyword matched.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AnnotatedLine {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_result_wire_shape() {
        let ok = serde_json::to_value(ExecutionResult::Success { output: "3\n".into() }).unwrap();
        assert_eq!(ok, serde_json::json!({ "output": "3\n" }));

        let parsed: ExecutionResult =
            serde_json::from_str(r#"{"error":"ZeroDivisionError: division by zero"}"#).unwrap();
        assert!(matches!(parsed, ExecutionResult::Failure { .. }));
    }

    #[test]
    fn test_missing_code_defaults_to_empty() {
        let req: ExecutionRequest = serde_json::from_str("{}").unwrap();
        assert!(req.code.is_empty());

        let req: ExecutionRequest = serde_json::from_str(r#"{"code":null}"#).unwrap();
        assert!(req.code.is_empty());
    }
}
