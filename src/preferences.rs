use crate::error::Error;
use crate::state::{Language, Theme};
use leptos::logging::warn;

pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";

/// Small string key-value storage, `localStorage` in the browser.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    fn set(&self, key: &str, value: &str) -> Result<(), Error>;
}

#[derive(Debug, Clone)]
pub struct Preferences<S> {
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn saved(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("Could not read {key} preference: {err}");
                None
            }
        }
    }

    pub fn theme(&self) -> Theme {
        match self.saved(THEME_KEY).map(|token| token.parse::<Theme>()) {
            Some(Ok(theme)) => theme,
            Some(Err(err)) => {
                warn!("Ignoring saved theme: {err}");
                Theme::default()
            }
            None => Theme::default(),
        }
    }

    /// Saved language first, then the browser locale when supported, then English.
    pub fn language(&self, browser_locale: Option<&str>) -> Language {
        if let Some(token) = self.saved(LANGUAGE_KEY) {
            match token.parse::<Language>() {
                Ok(language) => return language,
                Err(err) => warn!("Ignoring saved language: {err}"),
            }
        }
        browser_locale
            .and_then(Language::from_browser_locale)
            .unwrap_or(Language::En)
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), Error> {
        self.store.set(THEME_KEY, theme.token())
    }

    pub fn set_language(&self, language: Language) -> Result<(), Error> {
        self.store.set(LANGUAGE_KEY, language.code())
    }
}
