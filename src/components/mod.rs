//! UI Components
//!
//! Quick-add panels, their widgets and the record card lists.

mod tab_bar;
mod notes_editor;
mod steps_editor;
mod filterable_checklist;
mod form_errors;
mod delete_record_form;
mod record_card;
mod record_section;
mod location_panel;
mod equipment_panel;
mod task_panel;
mod chore_panel;

pub use tab_bar::QuickAddTabs;
pub use location_panel::{LocationList, LocationPanel, LocationPanelState};
pub use equipment_panel::{EquipmentList, EquipmentPanel, EquipmentPanelState};
pub use task_panel::{TaskList, TaskPanel, TaskPanelState};
pub use chore_panel::ChorePanel;
