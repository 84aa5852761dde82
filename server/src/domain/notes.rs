//! Notes Normalization
//!
//! Notes arrive from the quick-add panels as a JSON array in a hidden field.
//! Older clients sent plain text, which is still accepted.

use serde_json::Value;

/// Clean the submitted `notes` field into a list of non-blank strings
pub fn normalize_notes(raw: Option<&str>) -> Vec<String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Vec::new(),
        Some(r) if r.eq_ignore_ascii_case("null") || r.eq_ignore_ascii_case("none") => {
            return Vec::new()
        }
        Some(r) => r,
    };

    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
        return items
            .into_iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .filter(|s| !s.trim().is_empty())
            .collect();
    }

    let lines: Vec<String> = raw
        .replace('\r', "")
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    if lines.len() == 1 && lines[0].contains(',') {
        return lines[0]
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        assert_eq!(
            normalize_notes(Some(r#"["Top shelf", " ", null, 3]"#)),
            vec!["Top shelf".to_string(), "3".to_string()]
        );
    }

    #[test]
    fn test_empty_forms() {
        assert!(normalize_notes(None).is_empty());
        assert!(normalize_notes(Some("")).is_empty());
        assert!(normalize_notes(Some("NULL")).is_empty());
        assert!(normalize_notes(Some("None")).is_empty());
    }

    #[test]
    fn test_plain_text_fallback() {
        assert_eq!(normalize_notes(Some("a\r\nb\n\n")), vec!["a", "b"]);
        assert_eq!(normalize_notes(Some("a, b,,c")), vec!["a", "b", "c"]);
    }
}
