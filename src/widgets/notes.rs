//! Notes List
//!
//! Append-only list of free-text notes mirrored into a hidden `notes` field.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotesList {
    notes: Vec<String>,
}

impl NotesList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a prefilled hidden value. Anything that is not a JSON array
    /// (including the literal `null`) yields an empty list.
    pub fn from_hidden(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("null") {
            return Self::default();
        }
        let notes = match serde_json::from_str::<Value>(value) {
            Ok(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        };
        Self { notes }
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Append a note; blank input is ignored. Returns whether it was added.
    pub fn add(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.notes.push(text.to_string());
        true
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.notes.len() {
            self.notes.remove(index);
        }
    }

    pub fn set_notes(&mut self, notes: Vec<String>) {
        self.notes = notes
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Hidden field value: JSON array of strings
    pub fn to_hidden(&self) -> String {
        serde_json::to_string(&self.notes).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden_notes(list: &NotesList) -> Vec<String> {
        serde_json::from_str(&list.to_hidden()).unwrap()
    }

    #[test]
    fn test_hidden_matches_visible_order() {
        let mut list = NotesList::new();
        list.add("Check filter");
        list.add("Spare bags in drawer");
        list.add("Empty after use");
        list.remove(1);
        list.add("  Loud  ");
        assert_eq!(hidden_notes(&list), list.notes().to_vec());
        assert_eq!(list.notes(), ["Check filter", "Empty after use", "Loud"]);
    }

    #[test]
    fn test_whitespace_note_is_ignored() {
        let mut list = NotesList::new();
        list.add("one");
        assert!(!list.add("   \t "));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut list = NotesList::from_hidden(r#"["a"]"#);
        list.remove(3);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_from_hidden_tolerates_bad_values() {
        assert!(NotesList::from_hidden("null").is_empty());
        assert!(NotesList::from_hidden(" NULL ").is_empty());
        assert!(NotesList::from_hidden("{\"a\":1}").is_empty());
        assert!(NotesList::from_hidden("not json").is_empty());
        assert!(NotesList::from_hidden("").is_empty());

        let list = NotesList::from_hidden(r#"["keep", " ", 3, null]"#);
        assert_eq!(list.notes(), ["keep", "3"]);
    }

    #[test]
    fn test_set_notes_drops_blank_entries() {
        let mut list = NotesList::new();
        list.set_notes(vec!["a".into(), "".into(), " b ".into()]);
        assert_eq!(list.notes(), ["a", "b"]);
        list.clear();
        assert_eq!(list.to_hidden(), "[]");
    }
}
