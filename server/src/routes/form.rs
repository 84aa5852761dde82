//! Submitted Forms
//!
//! Quick-add panels post `multipart/form-data` and the chore panel posts
//! url-encoded; this collects every text field (repeated names keep all
//! values) and any uploaded files.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;

use crate::domain::ValidationErrors;
use super::error::ApiError;

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct SubmittedForm {
    fields: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadedFile>,
}

impl SubmittedForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = SubmittedForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            if field.file_name().is_some() {
                let file_name = field.file_name().map(String::from).filter(|n| !n.is_empty());
                let content_type = field.content_type().map(String::from);
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file was chosen
                if !bytes.is_empty() {
                    form.files.insert(name, UploadedFile { file_name, content_type, bytes });
                }
            } else {
                let value = field.text().await?;
                form.fields.entry(name).or_default().push(value);
            }
        }
        Ok(form)
    }

    /// First value of a field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    /// First value, trimmed, empty when absent
    pub fn trimmed(&self, name: &str) -> String {
        self.text(name).map(str::trim).unwrap_or_default().to_string()
    }

    /// Every value submitted under a repeated name (checkbox lists)
    pub fn all(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Checkbox semantics: present and not an explicit false
    pub fn flag(&self, name: &str) -> bool {
        self.text(name)
            .map(|v| !matches!(v.trim(), "" | "false" | "off" | "0"))
            .unwrap_or(false)
    }

    /// Optional non-negative integer no larger than `max`; blank is `None`
    pub fn whole_number(&self, name: &str, max: u32, errors: &mut ValidationErrors) -> Option<u32> {
        let raw = self.text(name).map(str::trim).filter(|s| !s.is_empty())?;
        match raw.parse::<i64>() {
            Ok(n) if n < 0 => {
                errors.add(name, "min_value", "Ensure this value is greater than or equal to 0.");
                None
            }
            Ok(n) => match u32::try_from(n) {
                Ok(value) if value <= max => Some(value),
                _ => {
                    errors.add(
                        name,
                        "max_value",
                        format!("Ensure this value is less than or equal to {}.", max),
                    );
                    None
                }
            },
            Err(_) => {
                errors.add(name, "invalid", "Enter a whole number.");
                None
            }
        }
    }

    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    /// Hidden `id`: blank means create
    pub fn id(&self) -> Result<Option<u32>, ApiError> {
        match self.text("id").map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ApiError::BadRequest(format!("invalid id: {}", raw))),
        }
    }

    /// Fields of an `application/x-www-form-urlencoded` post
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = SubmittedForm::default();
        for (name, value) in pairs {
            form.fields.entry(name).or_default().push(value);
        }
        form
    }

    #[cfg(test)]
    pub fn with_fields(pairs: &[(&str, &str)]) -> Self {
        Self::from_pairs(pairs.iter().map(|(n, v)| (n.to_string(), v.to_string())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_access() {
        let form = SubmittedForm::with_fields(&[
            ("name", "  Garage "),
            ("equipment", "1"),
            ("equipment", "3"),
            ("id", ""),
        ]);
        assert_eq!(form.trimmed("name"), "Garage");
        assert_eq!(form.all("equipment"), ["1".to_string(), "3".to_string()]);
        assert!(form.all("tasks").is_empty());
        assert_eq!(form.id().unwrap(), None);
    }

    #[test]
    fn test_whole_number() {
        let form = SubmittedForm::with_fields(&[
            ("points", " 3 "),
            ("penalty", "101"),
            ("age", "-1"),
            ("count", "lots"),
            ("blank", ""),
        ]);
        let mut errors = ValidationErrors::new();
        assert_eq!(form.whole_number("points", u32::MAX, &mut errors), Some(3));
        assert_eq!(form.whole_number("blank", u32::MAX, &mut errors), None);
        assert_eq!(form.whole_number("missing", u32::MAX, &mut errors), None);
        assert!(errors.is_empty());

        assert_eq!(form.whole_number("penalty", 100, &mut errors), None);
        assert_eq!(form.whole_number("age", u32::MAX, &mut errors), None);
        assert_eq!(form.whole_number("count", u32::MAX, &mut errors), None);
        assert_eq!(errors.field("penalty")[0].code, "max_value");
        assert_eq!(errors.field("age")[0].code, "min_value");
        assert_eq!(errors.field("count")[0].code, "invalid");
    }

    #[test]
    fn test_flag() {
        let form = SubmittedForm::with_fields(&[("a", "on"), ("b", "false"), ("c", "")]);
        assert!(form.flag("a"));
        assert!(!form.flag("b"));
        assert!(!form.flag("c"));
        assert!(!form.flag("missing"));
    }

    #[test]
    fn test_bad_id() {
        let form = SubmittedForm::with_fields(&[("id", "abc")]);
        assert!(form.id().is_err());
        let form = SubmittedForm::with_fields(&[("id", " 12 ")]);
        assert_eq!(form.id().unwrap(), Some(12));
    }
}
