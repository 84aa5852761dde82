//! Location Entity
//!
//! A place in the home where equipment is kept.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, NamedEntity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub notes: Vec<String>,
}

impl Location {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            notes: Vec::new(),
        }
    }
}

impl Entity for Location {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl NamedEntity for Location {
    fn name(&self) -> &str {
        &self.name
    }
}
