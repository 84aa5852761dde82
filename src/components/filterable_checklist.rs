//! Filterable Checklist Component
//!
//! Multi-select checkbox list with a text filter and a clear button.

use std::collections::BTreeSet;

use leptos::prelude::*;

use crate::widgets::matches_filter;

#[component]
pub fn FilterableChecklist(
    /// Prefix for element ids (`<id>-filter`, `<id>-options`, `<id>-clear`)
    id: &'static str,
    /// Form field name submitted once per checked option
    field: &'static str,
    #[prop(into)] options: Signal<Vec<(u32, String)>>,
    selected: RwSignal<BTreeSet<u32>>,
) -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let filter_ref = NodeRef::<leptos::html::Input>::new();

    view! {
        <div class="filterable-checklist">
            <div class="flex gap-2">
                <input
                    type="search"
                    id=format!("{}-filter", id)
                    class="input input-bordered input-sm grow"
                    placeholder="Filter"
                    node_ref=filter_ref
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <button
                    type="button"
                    id=format!("{}-clear", id)
                    class="btn btn-ghost btn-sm"
                    on:click=move |_| {
                        set_query.set(String::new());
                        if let Some(input) = filter_ref.get() {
                            let _ = input.focus();
                        }
                    }
                >
                    "Clear"
                </button>
            </div>
            <div id=format!("{}-options", id) class="checklist-options">
                <For
                    each=move || options.get()
                    key=|(option_id, label)| (*option_id, label.clone())
                    children=move |(option_id, label)| {
                        let text = label.clone();
                        let visible = move || matches_filter(&text, &query.get());
                        view! {
                            <label class="label cursor-pointer" style:display=move || if visible() { "" } else { "none" }>
                                <input
                                    type="checkbox"
                                    name=field
                                    value=option_id.to_string()
                                    class="checkbox checkbox-sm"
                                    prop:checked=move || selected.with(|s| s.contains(&option_id))
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        selected.update(|s| {
                                            if checked { s.insert(option_id); } else { s.remove(&option_id); }
                                        });
                                    }
                                />
                                <span class="label-text">{label}</span>
                            </label>
                        }
                    }
                />
            </div>
        </div>
    }
}
