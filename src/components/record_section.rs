//! Record Section Component
//!
//! Collapsible list section holding one entity's cards.

use leptos::prelude::*;

#[component]
pub fn RecordSection(
    #[prop(into)] title: String,
    /// Panels expand this after a successful save
    open: RwSignal<bool>,
    #[prop(into)] count: Signal<usize>,
    children: Children,
) -> impl IntoView {
    view! {
        <section class="record-section">
            <button
                type="button"
                class="record-section-toggle"
                aria-expanded=move || open.get().to_string()
                on:click=move |_| open.update(|o| *o = !*o)
            >
                {title} " (" {move || count.get()} ")"
            </button>
            <div class="record-section-body" class:hidden=move || !open.get()>
                {children()}
            </div>
        </section>
    }
}
