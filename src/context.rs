//! Page Context
//!
//! Values derived from the host page once at startup and handed to panels.

use leptos::prelude::*;

use crate::dom;
use crate::entity::{base_path, QuickAddTab};
use crate::widgets::TabState;

#[derive(Clone, Copy)]
pub struct PageContext {
    /// Current page path without trailing slash; endpoints hang off it
    pub base: StoredValue<String>,
    /// Current page path as served, used for `?edit_...` fallbacks
    pub path: StoredValue<String>,
    /// Token copied into generated delete forms
    pub csrf_token: StoredValue<String>,
    /// Active quick-add tab
    pub tabs: RwSignal<TabState>,
}

impl PageContext {
    pub fn from_page() -> Self {
        let path = dom::pathname();
        // A `#task` style fragment opens that panel first
        let mut tabs = TabState::default();
        if let Some(name) = dom::hash() {
            tabs.activate_by_name(&name);
        }
        Self {
            base: StoredValue::new(base_path(&path)),
            path: StoredValue::new(path),
            csrf_token: StoredValue::new(dom::page_csrf_token()),
            tabs: RwSignal::new(tabs),
        }
    }

    pub fn base(&self) -> String {
        self.base.get_value()
    }

    pub fn path(&self) -> String {
        self.path.get_value()
    }

    pub fn activate(&self, tab: QuickAddTab) {
        self.tabs.update(|t| t.activate(tab));
    }
}
