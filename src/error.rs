use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("local storage is not available")]
    StorageUnavailable,

    #[error("local storage failed: {0}")]
    Storage(String),

    #[error("could not schedule task: {0}")]
    Schedule(String),

    #[error("unknown language `{0}`")]
    UnknownLanguage(String),

    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("invalid value {value:?} for `{key}`")]
    Config { key: String, value: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Browser calls fail with an opaque `JsValue`, keep its debug rendering.
pub fn js_error(err: JsValue) -> String {
    format!("{err:?}")
}
