//! Homebase Quick-Add App
//!
//! Tabbed quick-add panels above the location, equipment and task lists.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{
    ChorePanel, EquipmentList, EquipmentPanel, EquipmentPanelState, LocationList, LocationPanel,
    LocationPanelState, QuickAddTabs, TaskList, TaskPanel, TaskPanelState,
};
use crate::context::PageContext;
use crate::dom;
use crate::entity::EntityKind;
use crate::models::{Equipment, Location, Record, Task};
use crate::quick_add::{open_for_edit, EditFallback, PanelState};
use crate::store::{RecordsState, RecordsStateStoreFields, RecordsStore};

#[component]
pub fn App() -> impl IntoView {
    // Page values and panel state, built once and handed to every component
    let ctx = PageContext::from_page();
    let store: RecordsStore = Store::new(RecordsState::default());
    let location_panel = LocationPanelState::new();
    let equipment_panel = EquipmentPanelState::new();
    let task_panel = TaskPanelState::new();

    // Load lists on mount, then honour `?edit_<entity>=<id>`
    spawn_local(async move {
        let base = ctx.base();
        match api::list_records::<Location>(&base).await {
            Ok(loaded) => store.locations().write().replace_all(loaded),
            Err(e) => web_sys::console::warn_1(&format!("[APP] locations not loaded: {}", e).into()),
        }
        match api::list_records::<Equipment>(&base).await {
            Ok(loaded) => store.equipment().write().replace_all(loaded),
            Err(e) => web_sys::console::warn_1(&format!("[APP] equipment not loaded: {}", e).into()),
        }
        match api::list_records::<Task>(&base).await {
            Ok(loaded) => store.tasks().write().replace_all(loaded),
            Err(e) => web_sys::console::warn_1(&format!("[APP] tasks not loaded: {}", e).into()),
        }

        edit_from_query(ctx, location_panel);
        edit_from_query(ctx, equipment_panel);
        edit_from_query(ctx, task_panel);
    });

    view! {
        <div class="homebase-layout">
            <section class="quick-add card">
                <QuickAddTabs ctx=ctx />
                <ChorePanel ctx=ctx store=store />
                <TaskPanel ctx=ctx store=store panel=task_panel />
                <LocationPanel ctx=ctx store=store panel=location_panel />
                <EquipmentPanel ctx=ctx store=store panel=equipment_panel />
            </section>

            <main class="record-lists">
                <TaskList ctx=ctx store=store panel=task_panel />
                <LocationList ctx=ctx store=store panel=location_panel />
                <EquipmentList ctx=ctx store=store panel=equipment_panel />
            </main>
        </div>
    }
}

/// One load attempt for a record requested through the page URL
fn edit_from_query<P: PanelState>(ctx: PageContext, panel: P) {
    let kind: EntityKind = <P::Record as Record>::KIND;
    let Some(raw) = dom::query_param(&kind.edit_param()) else {
        return;
    };
    match raw.parse::<u32>() {
        Ok(id) => open_for_edit(ctx, panel, id, EditFallback::LogOnly),
        Err(_) => web_sys::console::warn_1(&format!("[APP] bad {} value: {}", kind.edit_param(), raw).into()),
    }
}
