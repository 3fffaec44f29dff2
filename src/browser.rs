use crate::error::{js_error, Error};
use crate::preferences::PreferenceStore;
use crate::state::{PickedFile, PreviewHandle, ResolvedTheme};
use crate::uploads::PreviewStore;
use leptos::logging::warn;
use leptos::{document, window};
use web_sys::{File, FileList, Storage, Url};

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, Error> {
        window()
            .local_storage()
            .map_err(|err| Error::Storage(js_error(err)))?
            .ok_or(Error::StorageUnavailable)
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| Error::Storage(js_error(err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| Error::Storage(js_error(err)))
    }
}

/// Object URLs created with `URL.createObjectURL`.
pub struct ObjectUrlPreviews;

impl ObjectUrlPreviews {
    pub fn create(file: &File) -> Option<PreviewHandle> {
        match Url::create_object_url_with_blob(file) {
            Ok(url) => Some(PreviewHandle(url)),
            Err(err) => {
                warn!("No preview for {}: {}", file.name(), js_error(err));
                None
            }
        }
    }
}

impl PreviewStore for ObjectUrlPreviews {
    fn release(&self, preview: &PreviewHandle) {
        if let Err(err) = Url::revoke_object_url(&preview.0) {
            warn!("Could not revoke {}: {}", preview.0, js_error(err));
        }
    }
}

pub fn picked_files(list: &FileList) -> Vec<PickedFile> {
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(|file| PickedFile {
            name: file.name(),
            size: file.size() as u64,
            mime: file.type_(),
            preview: ObjectUrlPreviews::create(&file),
        })
        .collect()
}

pub fn navigator_language() -> Option<String> {
    window().navigator().language()
}

pub fn prefers_dark() -> bool {
    match window().match_media("(prefers-color-scheme: dark)") {
        Ok(Some(query)) => query.matches(),
        Ok(None) => false,
        Err(err) => {
            warn!("Color scheme query failed: {}", js_error(err));
            false
        }
    }
}

/// Toggles the `dark` class on `<html>`, which the stylesheet keys on.
pub fn apply_theme(theme: ResolvedTheme) {
    let Some(root) = document().document_element() else {
        return;
    };
    let classes = root.class_list();
    let result = match theme {
        ResolvedTheme::Dark => classes.add_1("dark"),
        ResolvedTheme::Light => classes.remove_1("dark"),
    };
    if let Err(err) = result {
        warn!("Could not apply theme: {}", js_error(err));
    }
}
