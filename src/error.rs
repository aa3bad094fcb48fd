use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub(crate) enum LightboxError {
    #[error("window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("document has no {0} element")]
    MissingRoot(&'static str),
    #[error("overlay is missing its {0}")]
    MissingPart(&'static str),
    #[error("dom call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for LightboxError {
    fn from(error: JsValue) -> Self {
        LightboxError::Dom(js_err(error))
    }
}

pub(crate) type Result<T> = std::result::Result<T, LightboxError>;

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            if value != "{}" {
                return value;
            }
        }
    }
    format!("{error:?}")
}

/// Logs a failed entry point; nothing propagates to the host page.
pub(crate) fn report(context: &str, result: Result<()>) {
    if let Err(err) = result {
        gloo::console::warn!(format!("lightbox: {context} failed: {err}"));
    }
}
