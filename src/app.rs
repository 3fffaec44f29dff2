use crate::browser::{self, LocalStorage, ObjectUrlPreviews};
use crate::config::SimulationConfig;
use crate::conversation::ChatBot;
use crate::file_upload::FileUpload;
use crate::header::Header;
use crate::i18n::translate;
use crate::preferences::Preferences;
use crate::random::BrowserRandom;
use crate::scheduler::BrowserScheduler;
use crate::state::{Language, Screen, Theme, UploadedFile};
use crate::uploads::UploadSimulator;
use leptos::logging::{log, warn};
use leptos::*;
use std::rc::Rc;
use web_sys::FileList;

/// User preferences shared with every component through context.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub language: RwSignal<Language>,
    pub theme: RwSignal<Theme>,
}

impl Settings {
    /// Reactive lookup, re-runs when the language changes.
    pub fn t(&self, key: &str) -> String {
        translate(self.language.get(), key)
    }
}

fn load_config() -> SimulationConfig {
    let search = window().location().search().unwrap_or_default();
    SimulationConfig::from_query(&search).unwrap_or_else(|err| {
        warn!("Ignoring query configuration: {err}");
        SimulationConfig::default()
    })
}

#[component]
pub fn App(theme: Theme) -> impl IntoView {
    let preferences = Preferences::new(LocalStorage);
    let language = preferences.language(browser::navigator_language().as_deref());
    let settings = Settings {
        language: create_rw_signal(language),
        theme: create_rw_signal(theme),
    };
    provide_context(settings);

    let config = load_config();
    provide_context(config.clone());

    let language_preferences = preferences.clone();
    create_effect(move |_| {
        let language = settings.language.get();
        if let Err(err) = language_preferences.set_language(language) {
            warn!("Could not save language: {err}");
        }
    });
    create_effect(move |_| {
        let theme = settings.theme.get();
        browser::apply_theme(theme.resolve(browser::prefers_dark()));
        if let Err(err) = preferences.set_theme(theme) {
            warn!("Could not save theme: {err}");
        }
    });

    let (files, set_files) = create_signal(Vec::<UploadedFile>::new());
    let uploads = store_value(UploadSimulator::new(
        BrowserScheduler,
        Rc::new(BrowserRandom),
        Rc::new(ObjectUrlPreviews),
        config,
        move |snapshot: &[UploadedFile]| {
            let _ = set_files.try_set(snapshot.to_vec());
        },
    ));
    on_cleanup(move || uploads.with_value(|uploads| uploads.shutdown()));

    let (screen, set_screen) = create_signal(Screen::default());

    let on_files = move |list: FileList| {
        let picked = browser::picked_files(&list);
        uploads.with_value(|uploads| {
            let ids = uploads.add(picked);
            log!("Added {} files, {} on the board", ids.len(), uploads.files().len());
        });
    };
    let on_remove = move |id: String| {
        uploads.with_value(|uploads| uploads.remove(&id));
    };
    let on_interact = move || {
        let completed = uploads.with_value(|uploads| uploads.completed_count());
        set_screen.update(|screen| *screen = screen.open_chat(completed));
    };
    let on_back = move || set_screen.update(|screen| *screen = screen.back_to_upload());

    view! {
        <div class="min-h-screen bg-gradient-to-br from-gray-50 to-gray-100 dark:from-gray-900 dark:to-gray-800 transition-colors duration-300">
            <Header />
            <main class="px-4 sm:px-6 lg:px-8 py-12">
                {move || match screen.get() {
                    Screen::Upload => {
                        view! {
                            <FileUpload
                                files=files
                                on_files=on_files
                                on_remove=on_remove
                                on_interact=on_interact
                            />
                        }
                            .into_view()
                    }
                    Screen::Chat => view! { <ChatBot on_back=on_back /> }.into_view(),
                }}
            </main>
            <div class="fixed inset-0 -z-10 overflow-hidden pointer-events-none">
                <div class="absolute top-0 left-1/4 w-72 h-72 bg-blue-300 dark:bg-blue-800 rounded-full mix-blend-multiply dark:mix-blend-normal filter blur-xl opacity-20 animate-pulse"></div>
                <div
                    class="absolute top-1/3 right-1/4 w-72 h-72 bg-emerald-300 dark:bg-emerald-800 rounded-full mix-blend-multiply dark:mix-blend-normal filter blur-xl opacity-20 animate-pulse"
                    style="animation-delay: 2s"
                ></div>
                <div
                    class="absolute bottom-1/4 left-1/3 w-72 h-72 bg-purple-300 dark:bg-purple-800 rounded-full mix-blend-multiply dark:mix-blend-normal filter blur-xl opacity-20 animate-pulse"
                    style="animation-delay: 4s"
                ></div>
            </div>
        </div>
    }
}
