//! Task Quick-Add Panel
//!
//! Common fields plus ordered steps and the equipment a task needs.

use std::collections::BTreeSet;

use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::FormData;

use crate::context::PageContext;
use crate::entity::{EntityKind, QuickAddTab};
use crate::models::Task;
use crate::quick_add::{self, sync_common_fields, CommonFields, EditFallback, PanelState};
use crate::store::{store_upsert_task, RecordsStateStoreFields, RecordsStore};
use crate::widgets::{StepsList, PLACEHOLDER};
use super::filterable_checklist::FilterableChecklist;
use super::form_errors::{FieldError, FormErrorAlert};
use super::notes_editor::NotesEditor;
use super::record_card::{NotesSummary, RecordCard};
use super::record_section::RecordSection;
use super::steps_editor::StepsEditor;

#[derive(Clone, Copy)]
pub struct TaskPanelState {
    pub fields: CommonFields,
    pub steps: RwSignal<StepsList>,
    pub equipment: RwSignal<BTreeSet<u32>>,
}

impl TaskPanelState {
    pub fn new() -> Self {
        let panel = QuickAddTab::Task.name();
        Self {
            fields: CommonFields::new(panel),
            steps: RwSignal::new(StepsList::from_hidden(&crate::dom::prefill(panel, "steps"))),
            equipment: RwSignal::new(BTreeSet::new()),
        }
    }
}

impl PanelState for TaskPanelState {
    type Record = Task;

    fn common(&self) -> CommonFields {
        self.fields
    }

    fn populate(&self, record: &Task) {
        self.fields.load(record);
        // Loaded steps stay editable in the quick-add panel
        self.steps.update(|s| s.set_steps(record.steps.clone(), Some(false)));
        self.equipment.set(record.equipment.iter().map(|e| e.id).collect());
    }

    fn reset(&self) {
        self.fields.reset();
        self.steps.update(|s| s.clear());
        self.equipment.set(BTreeSet::new());
    }

    fn sync_hidden(&self, data: &FormData) -> Result<(), JsValue> {
        sync_common_fields(self.fields, data)?;
        data.set_with_str("steps", &self.steps.with_untracked(|s| s.to_hidden()))
    }

    fn upsert(store: &RecordsStore, record: Task) {
        store_upsert_task(store, record);
    }
}

#[component]
pub fn TaskPanel(ctx: PageContext, store: RecordsStore, panel: TaskPanelState) -> impl IntoView {
    let f = panel.fields;
    let hidden = move || !ctx.tabs.with(|t| t.is_active(QuickAddTab::Task));
    let equipment_options = Signal::derive(move || {
        store.equipment().with(|l| l.records().iter().map(|e| (e.id, e.name.clone())).collect::<Vec<_>>())
    });

    view! {
        <div class="quick-add-panel" data-panel="task" role="tabpanel" class:hidden=hidden>
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
                <fieldset class="form-control">
                    <legend class="label-text">"Steps"</legend>
                    <StepsEditor steps=panel.steps />
                    <FieldError errors=f.errors field="steps" />
                </fieldset>
                <fieldset class="form-control">
                    <legend class="label-text">"Equipment"</legend>
                    <FilterableChecklist
                        id="task-equipment"
                        field="equipment"
                        options=equipment_options
                        selected=panel.equipment
                    />
                    <FieldError errors=f.errors field="equipment" />
                </fieldset>
                <NotesEditor panel="task" notes=f.notes />
                <FieldError errors=f.errors field="notes" />
                <button type="submit" class="btn btn-primary mt-2" disabled=move || f.pending.get()>
                    {move || f.mode.get().submit_caption(EntityKind::Task)}
                </button>
            </form>
        </div>
    }
}

#[component]
pub fn TaskList(ctx: PageContext, store: RecordsStore, panel: TaskPanelState) -> impl IntoView {
    let on_edit = Callback::new(move |id: u32| {
        quick_add::open_for_edit(ctx, panel, id, EditFallback::Navigate)
    });

    view! {
        <RecordSection
            title="Tasks"
            open=panel.fields.list_open
            count=Signal::derive(move || store.tasks().with(|l| l.records().len()))
        >
            <div id="task-list" class="record-list">
                <For
                    each=move || store.tasks().with(|l| l.records().to_vec())
                    key=|task| task.clone()
                    children=move |task| view! { <TaskCard ctx=ctx record=task on_edit=on_edit /> }
                />
            </div>
        </RecordSection>
    }
}

#[component]
fn TaskCard(ctx: PageContext, record: Task, on_edit: Callback<u32>) -> impl IntoView {
    let mut steps = StepsList::new();
    steps.set_steps(record.steps.clone(), Some(true));
    let steps: Vec<(String, String)> = steps
        .steps()
        .iter()
        .map(|s| (s.name.clone(), s.description.clone()))
        .collect();
    let equipment: Vec<String> = record.equipment.iter().map(|e| e.name.clone()).collect();
    let notes = record.notes.clone();

    view! {
        <RecordCard ctx=ctx record=record on_edit=on_edit>
            <div class="task-steps">
                <span class="font-semibold">"Steps: "</span>
                {if steps.is_empty() {
                    view! { <span>{PLACEHOLDER}</span> }.into_any()
                } else {
                    view! {
                        <ol class="list-decimal ml-4">
                            {steps.into_iter().map(|(name, description)| view! {
                                <li>
                                    <span class="font-semibold">{name}</span>
                                    {(!description.is_empty()).then(|| view! { <span class="text-sm ml-1">{description}</span> })}
                                </li>
                            }).collect_view()}
                        </ol>
                    }.into_any()
                }}
            </div>
            <p>
                <span class="font-semibold">"Equipment: "</span>
                {if equipment.is_empty() { PLACEHOLDER.to_string() } else { equipment.join(", ") }}
            </p>
            <NotesSummary notes=notes />
        </RecordCard>
    }
}
