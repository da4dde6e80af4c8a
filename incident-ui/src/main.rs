mod app;
mod auth;
mod bridge;
mod home;
mod logging;
mod theme;

use leptos::*;

fn main() {
    logging::init();
    mount_to_body(|| view! { <app::Root/> })
}
