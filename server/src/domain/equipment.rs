//! Equipment Entity
//!
//! A tool or supply, optionally stored at a location and pictured.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, NamedEntity};

/// Reference to another record by id, carrying its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub count: Option<u32>,
    pub location: Option<NamedRef>,
    pub notes: Vec<String>,
    /// Public URL of the uploaded image (`/media/...`)
    pub image_url: Option<String>,
}

impl Equipment {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            count: None,
            location: None,
            notes: Vec::new(),
            image_url: None,
        }
    }
}

impl Entity for Equipment {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl NamedEntity for Equipment {
    fn name(&self) -> &str {
        &self.name
    }
}
