//! Checklist filtering for multi-select option lists

/// Case-insensitive substring match; an empty query matches everything
pub fn matches_filter(label: &str, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || label.trim().to_lowercase().contains(&query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_filter() {
        assert!(matches_filter("Vacuum Cleaner", ""));
        assert!(matches_filter("Vacuum Cleaner", "  clean "));
        assert!(!matches_filter("Mop", "broom"));
    }
}
