//! Location Quick-Add Panel
//!
//! Name, description and notes; cards list the same three.

use leptos::prelude::*;

use crate::context::PageContext;
use crate::entity::{EntityKind, QuickAddTab};
use crate::models::Location;
use crate::quick_add::{self, CommonFields, EditFallback, PanelState};
use crate::store::{store_upsert_location, RecordsStateStoreFields, RecordsStore};
use super::form_errors::{FieldError, FormErrorAlert};
use super::notes_editor::NotesEditor;
use super::record_card::{NotesSummary, RecordCard};
use super::record_section::RecordSection;

#[derive(Clone, Copy)]
pub struct LocationPanelState {
    pub fields: CommonFields,
}

impl LocationPanelState {
    pub fn new() -> Self {
        Self { fields: CommonFields::new(QuickAddTab::Location.name()) }
    }
}

impl PanelState for LocationPanelState {
    type Record = Location;

    fn common(&self) -> CommonFields {
        self.fields
    }

    fn populate(&self, record: &Location) {
        self.fields.load(record);
    }

    fn reset(&self) {
        self.fields.reset();
    }

    fn upsert(store: &RecordsStore, record: Location) {
        store_upsert_location(store, record);
    }
}

#[component]
pub fn LocationPanel(ctx: PageContext, store: RecordsStore, panel: LocationPanelState) -> impl IntoView {
    let f = panel.fields;
    let hidden = move || !ctx.tabs.with(|t| t.is_active(QuickAddTab::Location));

    view! {
        <div class="quick-add-panel" data-panel="location" role="tabpanel" class:hidden=hidden>
            <form
                enctype="multipart/form-data"
                on:submit=move |ev| quick_add::submit(ev, ctx, store, panel)
            >
                <FormErrorAlert errors=f.errors />
                <input type="hidden" name="id" prop:value=move || f.mode.get().hidden_id() />
                <label class="form-control">
                    <span class="label-text">"Name"</span>
                    <input
                        type="text"
                        name="name"
                        class="input input-bordered"
                        prop:value=move || f.name.get()
                        on:input=move |ev| f.name.set(event_target_value(&ev))
                    />
                    <FieldError errors=f.errors field="name" />
                </label>
                <label class="form-control">
                    <span class="label-text">"Description"</span>
                    <textarea
                        name="description"
                        class="textarea textarea-bordered"
                        prop:value=move || f.description.get()
                        on:input=move |ev| f.description.set(event_target_value(&ev))
                    ></textarea>
                    <FieldError errors=f.errors field="description" />
                </label>
                <NotesEditor panel="location" notes=f.notes />
                <FieldError errors=f.errors field="notes" />
                <button type="submit" class="btn btn-primary mt-2" disabled=move || f.pending.get()>
                    {move || f.mode.get().submit_caption(EntityKind::Location)}
                </button>
            </form>
        </div>
    }
}

#[component]
pub fn LocationList(ctx: PageContext, store: RecordsStore, panel: LocationPanelState) -> impl IntoView {
    let on_edit = Callback::new(move |id: u32| {
        quick_add::open_for_edit(ctx, panel, id, EditFallback::Navigate)
    });

    view! {
        <RecordSection
            title="Locations"
            open=panel.fields.list_open
            count=Signal::derive(move || store.locations().with(|l| l.records().len()))
        >
            <div id="location-list" class="record-list">
                <For
                    each=move || store.locations().with(|l| l.records().to_vec())
                    key=|location| location.clone()
                    children=move |location| view! { <LocationCard ctx=ctx record=location on_edit=on_edit /> }
                />
            </div>
        </RecordSection>
    }
}

#[component]
fn LocationCard(ctx: PageContext, record: Location, on_edit: Callback<u32>) -> impl IntoView {
    let notes = record.notes.clone();
    view! {
        <RecordCard ctx=ctx record=record on_edit=on_edit>
            <NotesSummary notes=notes />
        </RecordCard>
    }
}
