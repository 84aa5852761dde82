//! Record Store
//!
//! Uses Leptos reactive_stores so each card list re-renders on its own.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Equipment, Location, Task};
use crate::widgets::{RecordList, Upsert};

/// Records currently shown as cards
#[derive(Clone, Debug, Default, Store)]
pub struct RecordsState {
    pub locations: RecordList<Location>,
    pub equipment: RecordList<Equipment>,
    pub tasks: RecordList<Task>,
}

/// Type alias for the store
pub type RecordsStore = Store<RecordsState>;

// ========================
// Store Helper Functions
// ========================

pub fn store_upsert_location(store: &RecordsStore, location: Location) -> Upsert {
    let upsert = store.locations().write().upsert(location.clone());
    // Equipment cards show their location's name
    store.equipment().write().update_each(|eq| {
        if let Some(loc) = eq.location.as_mut().filter(|l| l.id == location.id) {
            loc.name = location.name.clone();
        }
    });
    upsert
}

pub fn store_upsert_equipment(store: &RecordsStore, equipment: Equipment) -> Upsert {
    let upsert = store.equipment().write().upsert(equipment.clone());
    store.tasks().write().update_each(|task| {
        if let Some(eq) = task.equipment.iter_mut().find(|e| e.id == equipment.id) {
            eq.name = equipment.name.clone();
        }
    });
    upsert
}

pub fn store_upsert_task(store: &RecordsStore, task: Task) -> Upsert {
    store.tasks().write().upsert(task)
}
