//! Steps List
//!
//! Ordered task steps. Steps loaded from an existing task are `persisted` and
//! render without reorder/remove controls; steps added while editing are not.

use serde::Serialize;
use serde_json::Value;

use crate::models::StepPayload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    pub name: String,
    pub description: String,
    pub persisted: bool,
}

/// Serialized step written to the hidden `steps` field
#[derive(Debug, Clone, PartialEq, Serialize)]
struct OrderedStep<'a> {
    name: &'a str,
    description: &'a str,
    order: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepsList {
    steps: Vec<StepEntry>,
}

impl StepsList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a prefilled hidden value, keeping each item's `persisted` flag
    pub fn from_hidden(value: &str) -> Self {
        let payload = match serde_json::from_str::<Value>(value.trim()) {
            Ok(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<StepPayload>(item).ok())
                .collect(),
            _ => Vec::new(),
        };
        let mut list = Self::default();
        list.set_steps(payload, None);
        list
    }

    pub fn steps(&self) -> &[StepEntry] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether reorder/remove controls are shown for this step
    pub fn can_edit(&self, index: usize) -> bool {
        self.steps.get(index).is_some_and(|s| !s.persisted)
    }

    /// Append a new (non-persisted) step. Empty names are rejected.
    pub fn add_step(&mut self, name: &str, description: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.steps.push(StepEntry {
            name: name.to_string(),
            description: description.trim().to_string(),
            persisted: false,
        });
        true
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    /// Move a step; a target outside the list is a no-op
    pub fn move_step(&mut self, from: usize, to: usize) {
        if from >= self.steps.len() || to >= self.steps.len() {
            return;
        }
        let step = self.steps.remove(from);
        self.steps.insert(to, step);
    }

    /// Replace the whole list. `persisted` overrides the per-item flag when
    /// given; items are sorted by their `order`, falling back to position.
    /// Steps without a name are dropped.
    pub fn set_steps(&mut self, steps: Vec<StepPayload>, persisted: Option<bool>) {
        let mut indexed: Vec<(usize, StepPayload)> = steps
            .into_iter()
            .enumerate()
            .filter(|(_, step)| !step.name.trim().is_empty())
            .map(|(idx, step)| (step.order.unwrap_or(idx), step))
            .collect();
        indexed.sort_by_key(|(order, _)| *order);
        self.steps = indexed
            .into_iter()
            .map(|(_, step)| StepEntry {
                persisted: persisted.unwrap_or(step.persisted),
                name: step.name.trim().to_string(),
                description: step.description,
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Current steps with `order` recomputed from position
    pub fn payload(&self) -> Vec<StepPayload> {
        self.steps
            .iter()
            .enumerate()
            .map(|(order, s)| StepPayload {
                name: s.name.clone(),
                description: s.description.clone(),
                order: Some(order),
                persisted: s.persisted,
            })
            .collect()
    }

    /// Hidden field value: JSON array of `{name, description, order}`
    pub fn to_hidden(&self) -> String {
        let out: Vec<OrderedStep<'_>> = self
            .steps
            .iter()
            .enumerate()
            .map(|(order, s)| OrderedStep {
                name: &s.name,
                description: &s.description,
                order,
            })
            .collect();
        serde_json::to_string(&out).unwrap_or_else(|_| "[]".to_string())
    }
}
