use crate::app::Settings;
use crate::state::{Language, Theme};
use leptos::logging::warn;
use leptos::*;

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "common.lightMode",
        Theme::Dark => "common.darkMode",
        Theme::System => "common.system",
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let settings = expect_context::<Settings>();
    let change_language = move |ev| match event_target_value(&ev).parse::<Language>() {
        Ok(language) => settings.language.set(language),
        Err(err) => warn!("Language picker: {err}"),
    };

    view! {
        <header class="sticky top-0 z-50 bg-white/80 dark:bg-gray-900/80 backdrop-blur-lg border-b border-gray-200 dark:border-gray-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center space-x-3">
                        <div class="w-8 h-8 bg-gradient-to-br from-blue-500 to-emerald-500 rounded-lg flex items-center justify-center">
                            <GlobeIcon classes="w-5 h-5 text-white" />
                        </div>
                        <h1 class="text-xl font-bold text-gray-900 dark:text-white">
                            {move || settings.t("title")}
                        </h1>
                    </div>

                    <div class="flex items-center space-x-4">
                        <div class="relative">
                            <label for="language" class="sr-only">
                                {move || settings.t("common.language")}
                            </label>
                            <select
                                id="language"
                                class="appearance-none bg-gray-100 dark:bg-gray-800 border border-gray-300 dark:border-gray-600 rounded-lg px-3 py-2 pr-8 text-sm font-medium text-gray-700 dark:text-gray-200 focus:outline-none focus:ring-2 focus:ring-blue-500 focus:border-transparent transition-all duration-200"
                                on:change=change_language
                                prop:value=move || settings.language.get().code()
                            >
                                {Language::ALL
                                    .into_iter()
                                    .map(|language| {
                                        view! {
                                            <option
                                                value=language.code()
                                                selected=move || settings.language.get() == language
                                            >
                                                {format!("{} {}", language.flag(), language.label())}
                                            </option>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </select>
                            <GlobeIcon classes="absolute right-2 top-1/2 transform -translate-y-1/2 w-4 h-4 text-gray-500 pointer-events-none" />
                        </div>

                        <div class="flex items-center space-x-1 bg-gray-100 dark:bg-gray-800 rounded-lg p-1">
                            {Theme::ALL
                                .into_iter()
                                .map(|theme| {
                                    view! {
                                        <button
                                            type="button"
                                            title=move || settings.t(theme_label(theme))
                                            class=move || {
                                                if settings.theme.get() == theme {
                                                    "p-2 rounded-md transition-all duration-200 bg-white dark:bg-gray-700 shadow-sm text-blue-600 dark:text-blue-400"
                                                } else {
                                                    "p-2 rounded-md transition-all duration-200 text-gray-600 dark:text-gray-400 hover:text-gray-900 dark:hover:text-gray-100"
                                                }
                                            }
                                            on:click=move |_| settings.theme.set(theme)
                                        >
                                            <ThemeIcon theme=theme />
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
fn ThemeIcon(theme: Theme) -> impl IntoView {
    let path = match theme {
        Theme::Light => "M12 3v1m0 16v1m9-9h-1M4 12H3m15.364 6.364-.707-.707M6.343 6.343l-.707-.707m12.728 0-.707.707M6.343 17.657l-.707.707M16 12a4 4 0 1 1-8 0 4 4 0 0 1 8 0Z",
        Theme::Dark => "M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79Z",
        Theme::System => "M4 5h16a1 1 0 0 1 1 1v10a1 1 0 0 1-1 1H4a1 1 0 0 1-1-1V6a1 1 0 0 1 1-1Zm4 16h8m-4-4v4",
    };
    view! {
        <svg
            class="w-4 h-4"
            aria-hidden="true"
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
        >
            <path
                stroke="currentColor"
                stroke-linecap="round"
                stroke-linejoin="round"
                stroke-width="2"
                d=path
            />
        </svg>
    }
}

#[component]
fn GlobeIcon(#[prop(into)] classes: String) -> impl IntoView {
    view! {
        <svg
            class=classes
            aria-hidden="true"
            xmlns="http://www.w3.org/2000/svg"
            fill="none"
            viewBox="0 0 24 24"
        >
            <path
                stroke="currentColor"
                stroke-linecap="round"
                stroke-linejoin="round"
                stroke-width="2"
                d="M12 21a9 9 0 1 0 0-18m0 18a9 9 0 1 1 0-18m0 18c2.5-2.5 3.5-6 3.5-9S14.5 5.5 12 3m0 18c-2.5-2.5-3.5-6-3.5-9S9.5 5.5 12 3M3.5 9h17m-17 6h17"
            />
        </svg>
    }
}
