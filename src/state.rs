use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type FileId = String;

/// Object URL pointing at a picked file, must be revoked once the row goes away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Uploading,
    Completed,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub progress: f64,
    pub status: UploadStatus,
    pub preview: Option<PreviewHandle>,
}

impl UploadedFile {
    pub fn is_completed(&self) -> bool {
        self.status == UploadStatus::Completed
    }

    pub fn is_pdf(&self) -> bool {
        self.mime == "application/pdf"
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// A file as handed over by the picker or a drop, before it joins the board.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub preview: Option<PreviewHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Es, Language::Fr, Language::De];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::De => "Deutsch",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Language::En => "🇺🇸",
            Language::Es => "🇪🇸",
            Language::Fr => "🇫🇷",
            Language::De => "🇩🇪",
        }
    }

    /// `navigator.language` gives things like `fr-CA`, only the primary tag matters.
    pub fn from_browser_locale(locale: &str) -> Option<Language> {
        let primary = locale.get(..2)?.to_ascii_lowercase();
        primary.parse().ok()
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.code() == s)
            .ok_or_else(|| Error::UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn token(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn resolve(self, prefers_dark: bool) -> ResolvedTheme {
        match self {
            Theme::Light => ResolvedTheme::Light,
            Theme::Dark => ResolvedTheme::Dark,
            Theme::System if prefers_dark => ResolvedTheme::Dark,
            Theme::System => ResolvedTheme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.token() == s)
            .ok_or_else(|| Error::UnknownTheme(s.to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Upload,
    Chat,
}

impl Screen {
    /// The chat only opens once at least one upload went through.
    pub fn open_chat(self, completed_files: usize) -> Screen {
        if completed_files > 0 {
            Screen::Chat
        } else {
            self
        }
    }

    pub fn back_to_upload(self) -> Screen {
        Screen::Upload
    }
}
