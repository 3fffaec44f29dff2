mod app;
mod browser;
mod chat;
mod config;
mod conversation;
mod error;
mod file_upload;
mod header;
mod i18n;
mod loading;
mod message;
mod preferences;
mod random;
mod scheduler;
mod state;
mod uploads;

use app::*;
use browser::LocalStorage;
use leptos::*;
use preferences::Preferences;

fn main() {
    console_error_panic_hook::set_once();
    // before mounting, so the first paint already has the right colors
    let theme = Preferences::new(LocalStorage).theme();
    browser::apply_theme(theme.resolve(browser::prefers_dark()));
    mount_to_body(move || {
        view! { <App theme=theme /> }
    })
}
