//! Record Card Component
//!
//! Collapsible summary/detail card shared by every entity list.

use leptos::prelude::*;

use crate::context::PageContext;
use crate::models::Record;
use crate::widgets::{or_placeholder, truncate, PLACEHOLDER};
use super::delete_record_form::DeleteRecordForm;

/// Characters of description shown in the collapsed header
const HEADER_DESCRIPTION_CHARS: usize = 60;

#[component]
pub fn RecordCard<R: Record>(
    ctx: PageContext,
    record: R,
    /// Opens the record in its quick-add panel
    on_edit: Callback<u32>,
    /// Entity-specific detail rows
    children: Children,
) -> impl IntoView {
    let kind = R::KIND;
    let id = record.id();
    let header_description = truncate(record.description(), HEADER_DESCRIPTION_CHARS);

    view! {
        <details id=kind.collapse_id(id) class="collapse collapse-arrow record-card" data-id=id>
            <summary class="collapse-title">
                <span class="font-semibold">{record.name().to_string()}</span>
                <span class="text-sm text-muted ml-2">{header_description}</span>
            </summary>
            <div class="collapse-content">
                <p class="record-description">{or_placeholder(record.description())}</p>
                {children()}
                <div class="card-actions mt-2">
                    <button type="button" class="btn btn-xs" on:click=move |_| on_edit.run(id)>
                        "Edit"
                    </button>
                    <DeleteRecordForm ctx=ctx kind=kind id=id />
                </div>
            </div>
        </details>
    }
}

/// Notes as a bulleted list, or the placeholder
#[component]
pub fn NotesSummary(notes: Vec<String>) -> impl IntoView {
    view! {
        <div class="record-notes">
            <span class="font-semibold">"Notes: "</span>
            {if notes.is_empty() {
                view! { <span>{PLACEHOLDER}</span> }.into_any()
            } else {
                view! {
                    <ul class="list-disc ml-4">
                        {notes.into_iter().map(|n| view! { <li>{n}</li> }).collect_view()}
                    </ul>
                }.into_any()
            }}
        </div>
    }
}
