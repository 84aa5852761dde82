//! Quick-Add Flow
//!
//! The load-for-edit and submit protocol shared by every entity panel. Panels
//! receive their widget state at construction and hand it in here; nothing is
//! looked up through page globals.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{FormData, HtmlFormElement, SubmitEvent};

use crate::api;
use crate::context::PageContext;
use crate::dom;
use crate::models::Record;
use crate::store::RecordsStore;
use crate::widgets::{FormErrors, FormMode, NotesList, SaveOutcome};

/// Fields and flags every quick-add panel has
#[derive(Clone, Copy)]
pub struct CommonFields {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub notes: RwSignal<NotesList>,
    pub mode: RwSignal<FormMode>,
    pub errors: RwSignal<FormErrors>,
    /// Save request in flight; the submit button is disabled meanwhile
    pub pending: RwSignal<bool>,
    /// Whether the panel's record list section is expanded
    pub list_open: RwSignal<bool>,
}

impl CommonFields {
    pub fn new(panel: &str) -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            notes: RwSignal::new(NotesList::from_hidden(&dom::prefill(panel, "notes"))),
            mode: RwSignal::new(FormMode::Create),
            errors: RwSignal::new(FormErrors::default()),
            pending: RwSignal::new(false),
            list_open: RwSignal::new(true),
        }
    }

    pub fn load<R: Record>(&self, record: &R) {
        self.name.set(record.name().to_string());
        self.description.set(record.description().to_string());
        self.notes.update(|n| n.set_notes(record.notes().to_vec()));
        self.mode.set(FormMode::Update(record.id()));
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.description.set(String::new());
        self.notes.update(|n| n.clear());
        self.mode.set(FormMode::Create);
        self.errors.set(FormErrors::default());
    }
}

/// Per-entity panel state
pub trait PanelState: Copy + Send + Sync + 'static {
    type Record: Record;

    fn common(&self) -> CommonFields;

    /// Fill every field and widget from a loaded or just-saved record
    fn populate(&self, record: &Self::Record);

    /// Back to a blank create form
    fn reset(&self);

    /// Write widget state into the outgoing form data
    fn sync_hidden(&self, data: &FormData) -> Result<(), JsValue> {
        sync_common_fields(self.common(), data)
    }

    fn upsert(store: &RecordsStore, record: Self::Record);
}

/// Notes and the create/update id, recomputed from widget state
pub fn sync_common_fields(common: CommonFields, data: &FormData) -> Result<(), JsValue> {
    data.set_with_str("notes", &common.notes.with_untracked(|n| n.to_hidden()))?;
    data.set_with_str("id", &common.mode.get_untracked().hidden_id())
}

/// What to do when a record cannot be loaded through the JSON endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditFallback {
    /// Navigate to `?edit_<entity>=<id>` and let the page prefill the form
    Navigate,
    /// Already arrived through that navigation; just log
    LogOnly,
}

pub fn open_for_edit<P: PanelState>(ctx: PageContext, panel: P, id: u32, fallback: EditFallback) {
    let kind = <P::Record as Record>::KIND;
    let base = ctx.base();
    let path = ctx.path();
    spawn_local(async move {
        match api::get_record::<P::Record>(&base, id).await {
            Ok(record) => {
                ctx.activate(kind.tab());
                panel.common().errors.set(FormErrors::default());
                panel.populate(&record);
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("[EDIT] {} {} not loaded: {}", kind.slug(), id, e).into());
                if fallback == EditFallback::Navigate {
                    dom::navigate(&kind.edit_fallback_url(&path, id));
                }
            }
        }
    });
}

pub fn submit<P: PanelState>(ev: SubmitEvent, ctx: PageContext, store: RecordsStore, panel: P) {
    ev.prevent_default();
    let common = panel.common();
    if common.pending.get_untracked() {
        return;
    }
    common.errors.set(FormErrors::default());

    let Some(form) = ev.target().and_then(|t| t.dyn_into::<HtmlFormElement>().ok()) else {
        return;
    };
    let data = match FormData::new_with_form(&form) {
        Ok(data) => data,
        Err(e) => {
            web_sys::console::error_1(&format!("[SAVE] form data unavailable: {:?}", e).into());
            dom::reload();
            return;
        }
    };
    if let Err(e) = panel.sync_hidden(&data) {
        web_sys::console::error_1(&format!("[SAVE] hidden fields not synced: {:?}", e).into());
    }

    common.pending.set(true);
    let base = ctx.base();
    spawn_local(async move {
        let outcome = api::save_record::<P::Record>(&base, &data).await;
        common.pending.set(false);
        match outcome {
            SaveOutcome::Saved(record) => {
                P::upsert(&store, record.clone());
                match common.mode.get_untracked().after_save(record.id()) {
                    FormMode::Create => {
                        form.reset();
                        panel.reset();
                    }
                    FormMode::Update(_) => panel.populate(&record),
                }
                common.list_open.set(true);
            }
            SaveOutcome::Invalid(errors) => common.errors.set(errors),
            SaveOutcome::Reload => dom::reload(),
        }
    });
}
