//! Steps Editor Component
//!
//! Ordered task steps; only steps added in this session get controls.

use leptos::prelude::*;

use crate::widgets::StepsList;

#[component]
pub fn StepsEditor(steps: RwSignal<StepsList>) -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let name_ref = NodeRef::<leptos::html::Input>::new();

    let add_step = move || {
        let added = steps
            .try_update(|s| s.add_step(&name.get_untracked(), &description.get_untracked()))
            .unwrap_or(false);
        if added {
            set_name.set(String::new());
            set_description.set(String::new());
        }
        if let Some(input) = name_ref.get() {
            let _ = input.focus();
        }
    };

    view! {
        <div class="steps-editor">
            <input type="hidden" name="steps" prop:value=move || steps.with(|s| s.to_hidden()) />
            <div class="flex gap-2">
                <input
                    type="text"
                    id="task-step-name"
                    class="input input-bordered input-sm"
                    placeholder="Step name"
                    node_ref=name_ref
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    id="task-step-desc"
                    class="input input-bordered input-sm grow"
                    placeholder="Step description"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                />
                <button type="button" id="add-task-step" class="btn btn-sm" on:click=move |_| add_step()>
                    "Add step"
                </button>
            </div>
            <ol id="task-steps-list" class="steps-list">
                {move || {
                    let (entries, len) = steps.with(|s| (s.steps().to_vec(), s.len()));
                    entries.into_iter().enumerate().map(|(idx, step)| {
                        let editable = steps.with(|s| s.can_edit(idx));
                        view! {
                            <li class="flex items-center justify-between gap-2 py-1">
                                <div class="grow">
                                    <div class="font-semibold">{step.name}</div>
                                    <div class="text-sm text-muted">{step.description}</div>
                                </div>
                                <Show when=move || editable>
                                    <div class="flex items-center gap-1">
                                        <button
                                            type="button"
                                            class="btn btn-error btn-xs"
                                            on:click=move |_| steps.update(|s| s.remove(idx))
                                        >
                                            "Remove"
                                        </button>
                                        <button
                                            type="button"
                                            class="btn btn-ghost btn-xs"
                                            disabled={idx == 0}
                                            on:click=move |_| {
                                                if idx > 0 {
                                                    steps.update(|s| s.move_step(idx, idx - 1));
                                                }
                                            }
                                        >
                                            "↑"
                                        </button>
                                        <button
                                            type="button"
                                            class="btn btn-ghost btn-xs"
                                            disabled={idx + 1 == len}
                                            on:click=move |_| steps.update(|s| s.move_step(idx, idx + 1))
                                        >
                                            "↓"
                                        </button>
                                    </div>
                                </Show>
                            </li>
                        }
                    }).collect_view()
                }}
            </ol>
        </div>
    }
}
