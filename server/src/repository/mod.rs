//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod location_repo;
mod equipment_repo;
mod task_repo;
mod user_repo;
mod chore_repo;

#[cfg(test)]
mod tests;

pub use traits::{NamedRepository, Repository};
pub use db::{init_db, DbState};
pub use location_repo::LocationRepository;
pub use equipment_repo::EquipmentRepository;
pub use task_repo::TaskRepository;
pub use user_repo::UserRepository;
pub use chore_repo::ChoreRepository;
