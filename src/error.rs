use wasm_bindgen::JsValue;

/// Everything that can go wrong while setting up a particle field.
///
/// Once a field is running nothing is fallible; drawing errors reported by the
/// browser are logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("no element with id '{0}'")]
    ElementNotFound(String),

    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),

    #[error("2d rendering context unavailable")]
    ContextUnavailable,
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
