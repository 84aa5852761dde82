//! Quick-Add Tab Bar
//!
//! One tab per quick-add panel, with ArrowLeft/ArrowRight cycling.

use leptos::prelude::*;

use crate::context::PageContext;
use crate::entity::QuickAddTab;
use crate::widgets::TabState;

#[component]
pub fn QuickAddTabs(ctx: PageContext) -> impl IntoView {
    let tab_refs: Vec<NodeRef<leptos::html::Button>> =
        QuickAddTab::ALL.iter().map(|_| NodeRef::new()).collect();
    let tab_refs = StoredValue::new(tab_refs);

    let focus_tab = move |tab: QuickAddTab| {
        tab_refs.with_value(|refs| {
            if let Some(button) = refs.get(tab.index()).and_then(|r| r.get()) {
                let _ = button.focus();
            }
        });
    };

    view! {
        <div role="tablist" class="tabs tabs-boxed quick-add-tabs">
            {QuickAddTab::ALL.iter().map(|tab| {
                let tab = *tab;
                let node_ref = tab_refs.with_value(|refs| refs[tab.index()]);
                let is_active = move || ctx.tabs.with(|t| t.is_active(tab));
                view! {
                    <button
                        type="button"
                        role="tab"
                        node_ref=node_ref
                        data-tab=tab.name()
                        class=move || if is_active() { "tab tab-active" } else { "tab" }
                        aria-selected=move || is_active().to_string()
                        on:click=move |_| ctx.activate(tab)
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            // Move relative to the tab that has focus
                            let mut from = TabState::new(tab);
                            let next = match ev.key().as_str() {
                                "ArrowRight" => Some(from.next()),
                                "ArrowLeft" => Some(from.previous()),
                                _ => None,
                            };
                            if let Some(next) = next {
                                ev.prevent_default();
                                focus_tab(next);
                                ctx.activate(next);
                            }
                        }
                    >
                        {tab.label()}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
