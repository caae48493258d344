// Wire envelope shared by the procedure server and the client.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name -> validation messages, in the order they were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|messages| messages.is_empty())
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message recorded for `field`, if any.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorOut {
    #[serde(rename = "fieldErrors")]
    pub field_errors: FieldErrors,
}

/// Response envelope of every procedure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(
        default,
        rename = "validationError",
        skip_serializing_if = "Option::is_none"
    )]
    pub validation_error: Option<ValidationErrorOut>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
            code: None,
            validation_error: None,
        }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
            code: Some(code.to_string()),
            validation_error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_serialize_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.push("content", "Only emojis are allowed");
        let out = ValidationErrorOut { field_errors: errors };

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"fieldErrors": {"content": ["Only emojis are allowed"]}})
        );
    }

    #[test]
    fn missing_data_deserializes_as_none() {
        let body = r#"{"status":"error","message":"nope","code":"NOT_FOUND"}"#;
        let parsed: ApiResponse<u32> = serde_json::from_str(body).unwrap();
        assert!(!parsed.is_success());
        assert!(parsed.data.is_none());
        assert_eq!(parsed.code.as_deref(), Some("NOT_FOUND"));
    }

    #[test]
    fn first_returns_none_for_unknown_field() {
        let errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.first("content"), None);
    }
}
