//! Quick-Add Form Protocol
//!
//! Create/update mode of a panel and interpretation of save responses.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::entity::EntityKind;
use crate::models::Record;

/// Keys the backend uses for form-level errors
pub const NON_FIELD_KEYS: [&str; 2] = ["__all__", "non_field_errors"];

/// Whether the next submit creates a record or updates one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Update(u32),
}

impl FormMode {
    /// Mode after a successful save of `saved_id`: creates stay creates
    /// (the form is cleared), updates keep pointing at the saved record.
    pub fn after_save(self, saved_id: u32) -> FormMode {
        match self {
            FormMode::Create => FormMode::Create,
            FormMode::Update(_) => FormMode::Update(saved_id),
        }
    }

    /// Value of the hidden `id` input
    pub fn hidden_id(&self) -> String {
        match self {
            FormMode::Create => String::new(),
            FormMode::Update(id) => id.to_string(),
        }
    }

    pub fn submit_caption(&self, kind: EntityKind) -> String {
        match self {
            FormMode::Create => kind.add_caption(),
            FormMode::Update(_) => kind.update_caption(),
        }
    }
}

/// Validation messages from a rejected save
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors {
    pub non_field: Vec<String>,
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    /// Build from the `errors` object. Messages may be plain strings or
    /// `{ "message": ... }` objects.
    pub fn from_value(errors: &Value) -> Self {
        let mut out = FormErrors::default();
        let Some(map) = errors.as_object() else {
            if let Some(message) = message_text(errors) {
                out.non_field.push(message);
            }
            return out;
        };
        for (key, value) in map {
            let messages: Vec<String> = match value {
                Value::Array(items) => items.iter().filter_map(message_text).collect(),
                other => message_text(other).into_iter().collect(),
            };
            if messages.is_empty() {
                continue;
            }
            if NON_FIELD_KEYS.contains(&key.as_str()) {
                out.non_field.extend(messages);
            } else {
                out.fields.entry(key.clone()).or_default().extend(messages);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.non_field.is_empty() && self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(|v| v.as_slice())
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("message").and_then(|m| m.as_str()).map(str::to_string),
        _ => None,
    }
}

/// How the page reacts to a save response
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<R> {
    Saved(R),
    Invalid(FormErrors),
    /// Unrecognized response: reload the page
    Reload,
}

pub fn parse_save_response<R: Record>(status_ok: bool, body: &str) -> SaveOutcome<R> {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return SaveOutcome::Reload;
    };
    if let Some(errors) = json.get("errors") {
        return SaveOutcome::Invalid(FormErrors::from_value(errors));
    }
    if !status_ok || json.get("success").and_then(Value::as_bool) != Some(true) {
        return SaveOutcome::Reload;
    }
    match json.get(R::KIND.slug()).cloned().map(serde_json::from_value::<R>) {
        Some(Ok(record)) => SaveOutcome::Saved(record),
        _ => SaveOutcome::Reload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, Task};

    #[test]
    fn test_mode_transitions() {
        assert_eq!(FormMode::Create.after_save(7), FormMode::Create);
        assert_eq!(FormMode::Update(7).after_save(7), FormMode::Update(7));
        assert_eq!(FormMode::Create.hidden_id(), "");
        assert_eq!(FormMode::Update(3).hidden_id(), "3");
        assert_eq!(FormMode::Create.submit_caption(EntityKind::Location), "Add Location");
        assert_eq!(FormMode::Update(1).submit_caption(EntityKind::Task), "Update Task");
    }

    #[test]
    fn test_saved_location() {
        let body = r#"{"success":true,"location":{"id":7,"name":"Garage","description":"","notes":[]}}"#;
        match parse_save_response::<Location>(true, body) {
            SaveOutcome::Saved(loc) => {
                assert_eq!(loc.id, 7);
                assert_eq!(loc.name, "Garage");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_field_errors_with_message_objects() {
        let body = r#"{"errors":{"name":[{"message":"This field is required."}]}}"#;
        match parse_save_response::<Location>(false, body) {
            SaveOutcome::Invalid(errors) => {
                assert_eq!(errors.field("name"), Some(&["This field is required.".to_string()][..]));
                assert!(errors.non_field.is_empty());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_non_field_errors() {
        let errors = FormErrors::from_value(&serde_json::json!({
            "__all__": ["Nope."],
            "non_field_errors": [{"message": "Also nope."}],
            "description": "Too long."
        }));
        assert_eq!(errors.non_field, vec!["Nope.", "Also nope."]);
        assert_eq!(errors.field("description"), Some(&["Too long.".to_string()][..]));
    }

    #[test]
    fn test_unrecognized_responses_reload() {
        assert_eq!(parse_save_response::<Task>(false, "<html>500</html>"), SaveOutcome::Reload);
        assert_eq!(parse_save_response::<Task>(false, r#"{"detail":"boom"}"#), SaveOutcome::Reload);
        assert_eq!(parse_save_response::<Task>(true, r#"{"success":true}"#), SaveOutcome::Reload);
        assert_eq!(
            parse_save_response::<Task>(true, r#"{"success":true,"location":{"id":1,"name":"x"}}"#),
            SaveOutcome::Reload
        );
    }
}
