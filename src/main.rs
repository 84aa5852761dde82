//! Homebase Quick-Add Frontend Entry Point

mod models;
mod entity;
mod widgets;
mod dom;
mod api;
mod context;
mod store;
mod quick_add;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
