//! Chore Quick-Add Panel
//!
//! Plain url-encoded form post (the CSRF token travels as a field); only the
//! dependent inputs are toggled client-side.

use std::collections::BTreeSet;

use leptos::prelude::*;

use crate::context::PageContext;
use crate::dom::CSRF_FIELD;
use crate::entity::QuickAddTab;
use crate::store::{RecordsStateStoreFields, RecordsStore};
use crate::widgets::{ChoreFormState, NotesList, Recurrence};
use super::filterable_checklist::FilterableChecklist;
use super::notes_editor::NotesEditor;

const WEEKDAYS: [(&str, &str); 7] = [
    ("MON", "Monday"),
    ("TUE", "Tuesday"),
    ("WED", "Wednesday"),
    ("THU", "Thursday"),
    ("FRI", "Friday"),
    ("SAT", "Saturday"),
    ("SUN", "Sunday"),
];

#[component]
pub fn ChorePanel(ctx: PageContext, store: RecordsStore) -> impl IntoView {
    let state = RwSignal::new(ChoreFormState::default());
    let notes = RwSignal::new(NotesList::from_hidden(&crate::dom::prefill("chore", "notes")));
    let equipment = RwSignal::new(BTreeSet::new());
    let tasks = RwSignal::new(BTreeSet::new());
    let hidden = move || !ctx.tabs.with(|t| t.is_active(QuickAddTab::Chore));
    let action = format!("{}/chore/save/", ctx.base());

    let equipment_options = Signal::derive(move || {
        store.equipment().with(|l| l.records().iter().map(|e| (e.id, e.name.clone())).collect::<Vec<_>>())
    });
    let task_options = Signal::derive(move || {
        store.tasks().with(|l| l.records().iter().map(|t| (t.id, t.name.clone())).collect::<Vec<_>>())
    });
    let show = |visible: bool| if visible { "" } else { "none" };

    view! {
        <div class="quick-add-panel" data-panel="chore" role="tabpanel" class:hidden=hidden>
            <form method="post" action=action>
                <input type="hidden" name=CSRF_FIELD value=ctx.csrf_token.get_value() />
                <label class="form-control">
                    <span class="label-text">"Name"</span>
                    <input type="text" name="name" class="input input-bordered" required=true />
                </label>
                <label class="form-control">
                    <span class="label-text">"Description"</span>
                    <textarea name="description" class="textarea textarea-bordered"></textarea>
                </label>
                <label class="form-control">
                    <span class="label-text">"Points"</span>
                    <input type="number" name="points" min="0" value="1" class="input input-bordered" />
                </label>

                <label class="label cursor-pointer">
                    <span class="label-text">"Recurring"</span>
                    <input
                        type="checkbox"
                        name="is_recurring"
                        class="toggle"
                        prop:checked=move || state.with(|s| s.is_recurring)
                        on:change=move |ev| state.update(|s| s.is_recurring = event_target_checked(&ev))
                    />
                </label>
                <div
                    id="chore-recurrence-block"
                    style:display=move || show(state.with(|s| s.recurrence_block_visible()))
                >
                    <select
                        name="recurrence"
                        class="select select-bordered"
                        on:change=move |ev| {
                            let code = event_target_value(&ev);
                            state.update(|s| s.recurrence = Recurrence::from_code(&code));
                        }
                    >
                        <option value="">"Select recurrence"</option>
                        {Recurrence::ALL.into_iter().map(|r| view! {
                            <option value=r.code()>{r.label()}</option>
                        }).collect_view()}
                    </select>
                    <select
                        name="recurrence_day_of_week"
                        class="select select-bordered"
                        style:display=move || show(state.with(|s| s.day_of_week_visible()))
                    >
                        <option value="">"Day of week"</option>
                        {WEEKDAYS.into_iter().map(|(code, label)| view! {
                            <option value=code>{label}</option>
                        }).collect_view()}
                    </select>
                    <input
                        type="number"
                        name="recurrence_day_of_month"
                        min="1"
                        max="31"
                        placeholder="Day of month"
                        class="input input-bordered"
                        style:display=move || show(state.with(|s| s.day_of_month_visible()))
                    />
                </div>

                <label class="label cursor-pointer">
                    <span class="label-text">"Penalize if incomplete"</span>
                    <input
                        type="checkbox"
                        name="penalize_incomplete"
                        class="toggle"
                        on:change=move |ev| state.update(|s| s.penalize_incomplete = event_target_checked(&ev))
                    />
                </label>
                <input
                    type="number"
                    name="penalty_amount"
                    min="0"
                    placeholder="Penalty"
                    class="input input-bordered"
                    style:display=move || show(state.with(|s| s.penalty_visible()))
                />

                <label class="label cursor-pointer">
                    <span class="label-text">"Age restricted"</span>
                    <input
                        type="checkbox"
                        name="age_restricted"
                        class="toggle"
                        on:change=move |ev| state.update(|s| s.set_age_restricted(event_target_checked(&ev)))
                    />
                </label>
                <input
                    type="number"
                    name="minimum_age"
                    min="0"
                    placeholder="Minimum age"
                    class="input input-bordered"
                    style:display=move || show(state.with(|s| s.minimum_age_visible()))
                    disabled=move || !state.with(|s| s.minimum_age_visible())
                    prop:value=move || state.with(|s| s.minimum_age.clone())
                    on:input=move |ev| state.update(|s| s.minimum_age = event_target_value(&ev))
                />

                <fieldset class="form-control">
                    <legend class="label-text">"Equipment"</legend>
                    <FilterableChecklist
                        id="chore-equipment"
                        field="equipment"
                        options=equipment_options
                        selected=equipment
                    />
                </fieldset>
                <fieldset class="form-control">
                    <legend class="label-text">"Tasks"</legend>
                    <FilterableChecklist id="chore-tasks" field="tasks" options=task_options selected=tasks />
                </fieldset>
                <NotesEditor panel="chore" notes=notes />
                <button type="submit" class="btn btn-primary mt-2">"Add Chore"</button>
            </form>
        </div>
    }
}
