//! Notes Editor Component
//!
//! Text input + list of notes, mirrored into the hidden `notes` field.

use leptos::prelude::*;

use crate::widgets::NotesList;

#[component]
pub fn NotesEditor(
    /// Panel name used for element ids (`<panel>-note-text`, ...)
    panel: &'static str,
    notes: RwSignal<NotesList>,
) -> impl IntoView {
    let (draft, set_draft) = signal(String::new());
    let input_ref = NodeRef::<leptos::html::Input>::new();

    let add_note = move || {
        let added = notes.try_update(|n| n.add(&draft.get_untracked())).unwrap_or(false);
        if added {
            set_draft.set(String::new());
        }
        if let Some(input) = input_ref.get() {
            let _ = input.focus();
        }
    };

    view! {
        <div class="notes-editor">
            <input type="hidden" name="notes" prop:value=move || notes.with(|n| n.to_hidden()) />
            <div class="flex gap-2">
                <input
                    type="text"
                    id=format!("{}-note-text", panel)
                    class="input input-bordered input-sm grow"
                    placeholder="Add a note"
                    node_ref=input_ref
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            add_note();
                        }
                    }
                />
                <button
                    type="button"
                    id=format!("add-{}-note", panel)
                    class="btn btn-sm"
                    on:click=move |_| add_note()
                >
                    "Add note"
                </button>
            </div>
            <ul id=format!("{}-notes-list", panel) class="notes-list">
                {move || notes.with(|n| n.notes().to_vec()).into_iter().enumerate().map(|(idx, note)| {
                    view! {
                        <li class="flex items-center justify-between">
                            <span>{note}</span>
                            <button
                                type="button"
                                class="btn btn-ghost btn-xs ml-2"
                                on:click=move |_| notes.update(|n| n.remove(idx))
                            >
                                "Remove"
                            </button>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}
