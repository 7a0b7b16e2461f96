//! Configuration handed over from page scripts.

use docs_nav_shared::NavConfig;
use wasm_bindgen::JsValue;

/// Read a [`NavConfig`] from a plain JS object.
///
/// `undefined` and `null` mean "template defaults"; missing keys keep their
/// defaults as well.
pub fn config_from_js(value: JsValue) -> Result<NavConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(NavConfig::default());
    }
    let config: NavConfig = serde_wasm_bindgen::from_value(value)?;
    config
        .validate()
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(config)
}
