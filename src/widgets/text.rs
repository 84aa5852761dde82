//! Card text helpers

/// Shown in place of an empty description or notes list
pub const PLACEHOLDER: &str = "—";

/// Cut `text` to at most `max` characters, appending an ellipsis when cut
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

pub fn or_placeholder(text: &str) -> String {
    if text.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Clean the garage floor", 9), "Clean the…");
        assert_eq!(truncate("ééééé", 3), "ééé…");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(or_placeholder("  "), "—");
        assert_eq!(or_placeholder("Garage"), "Garage");
    }
}
