//! Entity Configuration Table
//!
//! One row per quick-add entity: endpoints, captions and the tab it lives in.

/// Quick-add panels, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuickAddTab {
    #[default]
    Chore,
    Task,
    Location,
    Equipment,
}

impl QuickAddTab {
    pub const ALL: [QuickAddTab; 4] = [
        QuickAddTab::Chore,
        QuickAddTab::Task,
        QuickAddTab::Location,
        QuickAddTab::Equipment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QuickAddTab::Chore => "chore",
            QuickAddTab::Task => "task",
            QuickAddTab::Location => "location",
            QuickAddTab::Equipment => "equipment",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickAddTab::Chore => "Chore",
            QuickAddTab::Task => "Task",
            QuickAddTab::Location => "Location",
            QuickAddTab::Equipment => "Equipment",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

/// Entities edited through AJAX quick-add panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Location,
    Equipment,
    Task,
}

impl EntityKind {
    /// URL segment and JSON key of the saved record
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Location => "location",
            EntityKind::Equipment => "equipment",
            EntityKind::Task => "task",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Location => "Location",
            EntityKind::Equipment => "Equipment",
            EntityKind::Task => "Task",
        }
    }

    pub fn tab(&self) -> QuickAddTab {
        match self {
            EntityKind::Location => QuickAddTab::Location,
            EntityKind::Equipment => QuickAddTab::Equipment,
            EntityKind::Task => QuickAddTab::Task,
        }
    }

    pub fn list_url(&self, base: &str) -> String {
        format!("{}/{}/json/", base, self.slug())
    }

    pub fn record_url(&self, base: &str, id: u32) -> String {
        format!("{}/{}/{}/json/", base, self.slug(), id)
    }

    pub fn save_url(&self, base: &str) -> String {
        format!("{}/{}/save/", base, self.slug())
    }

    pub fn delete_url(&self, base: &str, id: u32) -> String {
        format!("{}/{}/{}/delete/", base, self.slug(), id)
    }

    /// Query parameter that asks the page to open this record for editing
    pub fn edit_param(&self) -> String {
        format!("edit_{}", self.slug())
    }

    /// Full-page navigation target used when the JSON endpoint is unusable
    pub fn edit_fallback_url(&self, path: &str, id: u32) -> String {
        format!("{}?{}={}", path, self.edit_param(), id)
    }

    /// DOM id of a record's collapsible card
    pub fn collapse_id(&self, id: u32) -> String {
        format!("collapse-{}-{}", self.slug(), id)
    }

    pub fn add_caption(&self) -> String {
        format!("Add {}", self.label())
    }

    pub fn update_caption(&self) -> String {
        format!("Update {}", self.label())
    }
}

/// Current page path with the trailing slash stripped
pub fn base_path(pathname: &str) -> String {
    pathname.trim_end_matches('/').to_string()
}
