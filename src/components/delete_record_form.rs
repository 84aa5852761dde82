//! Delete Record Form Component
//!
//! Posts to the record's delete endpoint after a browser confirmation.

use leptos::prelude::*;

use crate::context::PageContext;
use crate::dom::{self, CSRF_FIELD};
use crate::entity::EntityKind;

#[component]
pub fn DeleteRecordForm(ctx: PageContext, kind: EntityKind, id: u32) -> impl IntoView {
    let action = kind.delete_url(&ctx.base(), id);
    let prompt = format!("Delete this {}?", kind.label().to_lowercase());

    view! {
        <form
            method="post"
            action=action
            class="inline"
            on:submit=move |ev: web_sys::SubmitEvent| {
                if !dom::confirm(&prompt) {
                    ev.prevent_default();
                }
            }
        >
            <input type="hidden" name=CSRF_FIELD value=ctx.csrf_token.get_value() />
            <button type="submit" class="btn btn-error btn-xs">"Delete"</button>
        </form>
    }
}
