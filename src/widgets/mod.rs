//! Widget View Models
//!
//! Plain state objects behind the quick-add panels. Components render these
//! through signals; none of them touch the DOM.

mod tabs;
mod notes;
mod steps;
mod record_list;
mod form;
mod chore;
mod filter;
mod text;

pub use tabs::TabState;
pub use notes::NotesList;
pub use steps::{StepEntry, StepsList};
pub use record_list::{RecordList, Upsert};
pub use form::{FormErrors, FormMode, SaveOutcome, parse_save_response, NON_FIELD_KEYS};
pub use chore::{ChoreFormState, Recurrence};
pub use filter::matches_filter;
pub use text::{truncate, or_placeholder, PLACEHOLDER};
