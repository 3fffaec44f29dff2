use crate::error::Error;
use crate::state::Language;
use leptos::logging::error;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

fn source(language: Language) -> &'static str {
    match language {
        Language::En => include_str!("../locales/en.json"),
        Language::Es => include_str!("../locales/es.json"),
        Language::Fr => include_str!("../locales/fr.json"),
        Language::De => include_str!("../locales/de.json"),
    }
}

fn parse(language: Language) -> Result<Value, Error> {
    Ok(serde_json::from_str(source(language))?)
}

fn tables() -> &'static HashMap<Language, Value> {
    static TABLES: OnceLock<HashMap<Language, Value>> = OnceLock::new();
    TABLES.get_or_init(|| {
        Language::ALL
            .into_iter()
            .filter_map(|language| match parse(language) {
                Ok(table) => Some((language, table)),
                Err(err) => {
                    error!("Broken {language} locale table: {err}");
                    None
                }
            })
            .collect()
    })
}

/// Looks up a dotted key such as `upload.title`, returning the key itself when unresolved.
pub fn translate(language: Language, key: &str) -> String {
    let pointer = format!("/{}", key.replace('.', "/"));
    tables()
        .get(&language)
        .and_then(|table| table.pointer(&pointer))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .unwrap_or(key)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_keys(value: &Value, prefix: &str, keys: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    leaf_keys(child, &path, keys);
                }
            }
            _ => keys.push(prefix.to_string()),
        }
    }

    #[test]
    fn tables_parse() {
        for language in Language::ALL {
            parse(language).unwrap();
        }
    }

    #[test]
    fn translates_per_language() {
        assert_eq!(translate(Language::En, "upload.title"), "Upload Files");
        assert_eq!(translate(Language::Es, "upload.title"), "Subir Archivos");
        assert_eq!(
            translate(Language::Fr, "upload.title"),
            "Télécharger des Fichiers"
        );
        assert_eq!(translate(Language::De, "chat.send"), "Senden");
        assert_eq!(translate(Language::En, "title"), "File Upload & AI Assistant");
    }

    #[test]
    fn unresolved_key_is_returned_verbatim() {
        assert_eq!(translate(Language::En, "upload.missing"), "upload.missing");
        assert_eq!(translate(Language::De, "nope"), "nope");
        // a branch is not a display string
        assert_eq!(translate(Language::Fr, "upload"), "upload");
        assert_eq!(translate(Language::Es, ""), "");
    }

    #[test]
    fn every_locale_has_the_same_keys() {
        let mut reference = vec![];
        leaf_keys(&parse(Language::En).unwrap(), "", &mut reference);
        reference.sort();
        for language in Language::ALL {
            let mut keys = vec![];
            leaf_keys(&parse(language).unwrap(), "", &mut keys);
            keys.sort();
            assert_eq!(keys, reference, "{language}");
            for key in &keys {
                assert_ne!(&translate(language, key), key, "{language} {key}");
            }
        }
    }
}
