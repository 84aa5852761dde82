//! Task Entity
//!
//! Ordered steps plus the equipment needed to carry them out.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{Entity, NamedEntity};
use super::equipment::NamedRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub steps: Vec<Step>,
    pub equipment: Vec<NamedRef>,
    pub notes: Vec<String>,
}

impl Task {
    pub fn new(id: u32, name: String) -> Self {
        Self {
            id,
            name,
            description: String::new(),
            steps: Vec::new(),
            equipment: Vec::new(),
            notes: Vec::new(),
        }
    }
}

impl Entity for Task {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl NamedEntity for Task {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Clean the submitted `steps` field.
///
/// Unnamed and non-object entries are dropped; the rest are sorted by their
/// `order` (position when absent) and re-indexed from zero.
pub fn normalize_steps(raw: Option<&str>) -> Vec<Step> {
    let Some(Ok(Value::Array(items))) = raw
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(serde_json::from_str::<Value>)
    else {
        return Vec::new();
    };

    let mut steps: Vec<(i64, Step)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let obj = item.as_object()?;
            let name = match obj.get("name") {
                Some(Value::String(s)) => s.trim().to_string(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            if name.is_empty() {
                return None;
            }
            let description = match obj.get("description") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            let order = obj
                .get("order")
                .and_then(|o| o.as_i64().or_else(|| o.as_str().and_then(|s| s.trim().parse().ok())))
                .unwrap_or(index as i64);
            Some((order, Step { name, description, order: 0 }))
        })
        .collect();

    steps.sort_by_key(|(order, _)| *order);
    steps
        .into_iter()
        .enumerate()
        .map(|(index, (_, step))| Step { order: index, ..step })
        .collect()
}
