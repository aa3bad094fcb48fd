use js_sys::Reflect;
use wasm_bindgen::JsValue;

use mizuki_lightbox_core::LightboxConfig;

pub(crate) const CONFIG_GLOBAL: &str = "__MIZUKI_LIGHTBOX__";

/// Reads `window.__MIZUKI_LIGHTBOX__`, falling back to defaults when it is
/// absent or unusable.
pub(crate) fn load_config() -> LightboxConfig {
    let Some(raw) = global_config_json() else {
        return LightboxConfig::default();
    };
    match parse_config(&raw) {
        Ok(config) => config,
        Err(message) => {
            gloo::console::warn!(format!("lightbox: ignoring config: {message}"));
            LightboxConfig::default()
        }
    }
}

pub(crate) fn parse_config(raw: &str) -> Result<LightboxConfig, String> {
    let config: LightboxConfig = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())
}

fn global_config_json() -> Option<String> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_null() || value.is_undefined() {
        return None;
    }
    if let Some(raw) = value.as_string() {
        return Some(raw);
    }
    js_sys::JSON::stringify(&value).ok()?.as_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(parse_config("{}"), Ok(LightboxConfig::default()));
    }

    #[test]
    fn overrides_are_applied() {
        let config = parse_config(r#"{"zoomStep": 1.25, "containers": [".album"]}"#)
            .expect("valid config");
        assert_eq!(config.zoom_step, 1.25);
        assert_eq!(config.container_selector().as_deref(), Some(".album"));
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = parse_config(r#"{"doubleClickScale": 9}"#).expect_err("out of range");
        assert!(err.contains("double-click scale"));
        assert!(parse_config("not json").is_err());
    }
}
