//! Field Validation Errors
//!
//! Serialized as `{field: [{message, code}]}`; form-level messages use the
//! `__all__` key.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub const NON_FIELD: &str = "__all__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMessage {
    pub message: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<FieldMessage>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.fields.entry(field.to_string()).or_default().push(FieldMessage {
            message: message.into(),
            code: code.to_string(),
        });
    }

    pub fn required(&mut self, field: &str) {
        self.add(field, "required", "This field is required.");
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, field: &str) -> &[FieldMessage] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        write!(f, "{}", fields.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_like_form_errors() {
        let mut errors = ValidationErrors::new();
        errors.required("name");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": [{"message": "This field is required.", "code": "required"}]})
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(3), Ok(3));
        let mut errors = ValidationErrors::new();
        errors.add(NON_FIELD, "invalid", "Bad form");
        assert_eq!(errors.field(NON_FIELD).len(), 1);
        assert!(errors.into_result(()).is_err());
    }
}
