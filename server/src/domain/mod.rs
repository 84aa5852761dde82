//! Domain Layer
//!
//! Contains all domain entities and core abstractions.

mod chore;
mod entity;
mod equipment;
mod location;
mod notes;
mod task;
mod user;
mod validation;

pub use chore::{normalize_days_of_month, Chore, Recurrence, WEEKDAY_CODES};
pub use entity::{Entity, NamedEntity, DomainError, DomainResult};
pub use equipment::{Equipment, NamedRef};
pub use location::Location;
pub use notes::normalize_notes;
pub use task::{normalize_steps, Task};
#[cfg(test)]
pub use task::Step;
pub use user::{Role, User};
pub use validation::{ValidationErrors, NON_FIELD};
