//! Equipment Quick-Add Panel
//!
//! Adds count, storage location and an optional image to the common fields.

use leptos::prelude::*;

use crate::context::PageContext;
use crate::entity::{EntityKind, QuickAddTab};
use crate::models::Equipment;
use crate::quick_add::{self, CommonFields, EditFallback, PanelState};
use crate::store::{store_upsert_equipment, RecordsStateStoreFields, RecordsStore};
use crate::widgets::PLACEHOLDER;
use super::form_errors::{FieldError, FormErrorAlert};
use super::notes_editor::NotesEditor;
use super::record_card::{NotesSummary, RecordCard};
use super::record_section::RecordSection;

#[derive(Clone, Copy)]
pub struct EquipmentPanelState {
    pub fields: CommonFields,
    /// Raw input text; the backend validates it
    pub count: RwSignal<String>,
    /// Selected location id, empty for none
    pub location_id: RwSignal<String>,
    /// Image of the record being edited, shown as a preview
    pub image_url: RwSignal<Option<String>>,
}

impl EquipmentPanelState {
    pub fn new() -> Self {
        Self {
            fields: CommonFields::new(QuickAddTab::Equipment.name()),
            count: RwSignal::new(String::new()),
            location_id: RwSignal::new(String::new()),
            image_url: RwSignal::new(None),
        }
    }
}

impl PanelState for EquipmentPanelState {
    type Record = Equipment;

    fn common(&self) -> CommonFields {
        self.fields
    }

    fn populate(&self, record: &Equipment) {
        self.fields.load(record);
        self.count.set(record.count.map(|c| c.to_string()).unwrap_or_default());
        self.location_id.set(record.location.as_ref().map(|l| l.id.to_string()).unwrap_or_default());
        self.image_url.set(record.image_url.clone());
    }

    fn reset(&self) {
        self.fields.reset();
        self.count.set(String::new());
        self.location_id.set(String::new());
        self.image_url.set(None);
    }

    fn upsert(store: &RecordsStore, record: Equipment) {
        store_upsert_equipment(store, record);
    }
}

#[component]
pub fn EquipmentPanel(ctx: PageContext, store: RecordsStore, panel: EquipmentPanelState) -> impl IntoView {
    let f = panel.fields;
    let hidden = move || !ctx.tabs.with(|t| t.is_active(QuickAddTab::Equipment));
    let location_options = move || {
        store.locations().with(|l| {
            l.records().iter().map(|loc| (loc.id.to_string(), loc.name.clone())).collect::<Vec<_>>()
        })
    };

    view! {
        <div class="quick-add-panel" data-panel="equipment" role="tabpanel" class:hidden=hidden>
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
                <label class="form-control">
                    <span class="label-text">"Count"</span>
                    <input
                        type="number"
                        min="0"
                        name="count"
                        class="input input-bordered"
                        prop:value=move || panel.count.get()
                        on:input=move |ev| panel.count.set(event_target_value(&ev))
                    />
                    <FieldError errors=f.errors field="count" />
                </label>
                <label class="form-control">
                    <span class="label-text">"Location"</span>
                    <select
                        name="location"
                        class="select select-bordered"
                        prop:value=move || panel.location_id.get()
                        on:change=move |ev| panel.location_id.set(event_target_value(&ev))
                    >
                        <option value="">{PLACEHOLDER}</option>
                        {move || location_options().into_iter().map(|(value, name)| {
                            let selected = panel.location_id.get_untracked() == value;
                            view! { <option value=value selected=selected>{name}</option> }
                        }).collect_view()}
                    </select>
                    <FieldError errors=f.errors field="location" />
                </label>
                <label class="form-control">
                    <span class="label-text">"Image"</span>
                    <input type="file" name="image" accept="image/*" class="file-input file-input-bordered" />
                    <FieldError errors=f.errors field="image" />
                </label>
                {move || panel.image_url.get().map(|src| view! {
                    <img src=src alt="Current image" class="equipment-image-preview" />
                })}
                <NotesEditor panel="equipment" notes=f.notes />
                <FieldError errors=f.errors field="notes" />
                <button type="submit" class="btn btn-primary mt-2" disabled=move || f.pending.get()>
                    {move || f.mode.get().submit_caption(EntityKind::Equipment)}
                </button>
            </form>
        </div>
    }
}

#[component]
pub fn EquipmentList(ctx: PageContext, store: RecordsStore, panel: EquipmentPanelState) -> impl IntoView {
    let on_edit = Callback::new(move |id: u32| {
        quick_add::open_for_edit(ctx, panel, id, EditFallback::Navigate)
    });

    view! {
        <RecordSection
            title="Equipment"
            open=panel.fields.list_open
            count=Signal::derive(move || store.equipment().with(|l| l.records().len()))
        >
            <div id="equipment-list" class="record-list">
                <For
                    each=move || store.equipment().with(|l| l.records().to_vec())
                    key=|equipment| equipment.clone()
                    children=move |equipment| view! { <EquipmentCard ctx=ctx record=equipment on_edit=on_edit /> }
                />
            </div>
        </RecordSection>
    }
}

#[component]
fn EquipmentCard(ctx: PageContext, record: Equipment, on_edit: Callback<u32>) -> impl IntoView {
    let count = record.count.map(|c| c.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string());
    let location = record.location.as_ref().map(|l| l.name.clone()).unwrap_or_else(|| PLACEHOLDER.to_string());
    let image = record.image_url.clone();
    let notes = record.notes.clone();
    view! {
        <RecordCard ctx=ctx record=record on_edit=on_edit>
            <p><span class="font-semibold">"Count: "</span>{count}</p>
            <p><span class="font-semibold">"Location: "</span>{location}</p>
            {image.map(|src| view! { <img src=src alt="" class="equipment-image" /> })}
            <NotesSummary notes=notes />
        </RecordCard>
    }
}
