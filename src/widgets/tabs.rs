//! Tab Controller State

use crate::entity::QuickAddTab;

/// Which quick-add panel is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabState {
    active: QuickAddTab,
}

impl TabState {
    pub fn new(active: QuickAddTab) -> Self {
        Self { active }
    }

    pub fn active(&self) -> QuickAddTab {
        self.active
    }

    pub fn is_active(&self, tab: QuickAddTab) -> bool {
        self.active == tab
    }

    pub fn activate(&mut self, tab: QuickAddTab) {
        self.active = tab;
    }

    /// Activate by panel name; unknown names leave the state alone
    pub fn activate_by_name(&mut self, name: &str) -> bool {
        match QuickAddTab::from_name(name) {
            Some(tab) => {
                self.active = tab;
                true
            }
            None => false,
        }
    }

    /// ArrowRight: wraps from the last tab to the first
    pub fn next(&mut self) -> QuickAddTab {
        self.step(1)
    }

    /// ArrowLeft: wraps from the first tab to the last
    pub fn previous(&mut self) -> QuickAddTab {
        self.step(QuickAddTab::ALL.len() - 1)
    }

    fn step(&mut self, offset: usize) -> QuickAddTab {
        let len = QuickAddTab::ALL.len();
        let next = (self.active.index() + offset) % len;
        self.active = QuickAddTab::ALL[next];
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_chore() {
        let tabs = TabState::default();
        assert!(tabs.is_active(QuickAddTab::Chore));
    }

    #[test]
    fn test_arrow_navigation_wraps() {
        let mut tabs = TabState::new(QuickAddTab::Equipment);
        assert_eq!(tabs.next(), QuickAddTab::Chore);
        assert_eq!(tabs.previous(), QuickAddTab::Equipment);
        assert_eq!(tabs.previous(), QuickAddTab::Location);
    }

    #[test]
    fn test_activate_by_name() {
        let mut tabs = TabState::default();
        assert!(tabs.activate_by_name("task"));
        assert_eq!(tabs.active(), QuickAddTab::Task);
        assert!(!tabs.activate_by_name("garage"));
        assert_eq!(tabs.active(), QuickAddTab::Task);
    }
}
