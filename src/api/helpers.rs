//! Shared helpers for WASM API operations

use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Serialize a value for JavaScript, logging failures
pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        log::error!("Serialization error: {}", e);
        JsValue::from_str(&format!("Serialization error: {}", e))
    })
}

/// Turn any displayable error into a JavaScript error value
pub fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    log::error!("{}: {}", context, e);
    JsValue::from_str(&format!("{}: {}", context, e))
}
