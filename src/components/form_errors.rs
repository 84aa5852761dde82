//! Form Error Components
//!
//! Non-field errors as a dismissable alert, field errors inline after inputs.

use leptos::prelude::*;

use crate::widgets::FormErrors;

#[component]
pub fn FormErrorAlert(errors: RwSignal<FormErrors>) -> impl IntoView {
    view! {
        <Show when=move || errors.with(|e| !e.non_field.is_empty())>
            <div role="alert" class="alert alert-error ajax-error">
                <ul>
                    {move || errors.with(|e| e.non_field.clone()).into_iter().map(|msg| view! { <li>{msg}</li> }).collect_view()}
                </ul>
                <button
                    type="button"
                    class="btn btn-ghost btn-xs"
                    aria-label="Dismiss"
                    on:click=move |_| errors.update(|e| e.non_field.clear())
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}

/// Messages for one field, rendered directly after its input
#[component]
pub fn FieldError(errors: RwSignal<FormErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|e| e.field(field).map(|msgs| msgs.join(" "))).map(|text| {
            view! { <p class="text-error text-sm ajax-error">{text}</p> }
        })
    }
}
