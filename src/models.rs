//! Frontend Models
//!
//! Records exchanged with the chores backend as JSON.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::entity::EntityKind;

/// Common surface every quick-add record exposes to cards and lists
pub trait Record: Clone + Eq + std::hash::Hash + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> u32;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn notes(&self) -> &[String];
}

/// Reference to a location embedded in another record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationRef {
    pub id: u32,
    pub name: String,
}

/// Reference to a piece of equipment embedded in a task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EquipmentRef {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Equipment {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub location: Option<LocationRef>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub notes: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Step as stored on a task (the `order` is the server's position)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    #[serde(default, skip_serializing)]
    pub persisted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_list")]
    pub steps: Vec<StepPayload>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub equipment: Vec<EquipmentRef>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub notes: Vec<String>,
}

/// Backend JSON fields are nullable; treat `null` as an empty list
fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Record for Location {
    const KIND: EntityKind = EntityKind::Location;

    fn id(&self) -> u32 { self.id }
    fn name(&self) -> &str { &self.name }
    fn description(&self) -> &str { &self.description }
    fn notes(&self) -> &[String] { &self.notes }
}

impl Record for Equipment {
    const KIND: EntityKind = EntityKind::Equipment;

    fn id(&self) -> u32 { self.id }
    fn name(&self) -> &str { &self.name }
    fn description(&self) -> &str { &self.description }
    fn notes(&self) -> &[String] { &self.notes }
}

impl Record for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn id(&self) -> u32 { self.id }
    fn name(&self) -> &str { &self.name }
    fn description(&self) -> &str { &self.description }
    fn notes(&self) -> &[String] { &self.notes }
}
