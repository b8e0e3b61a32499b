//! Key signature WASM API
//!
//! JavaScript-facing wrappers around key transposition, key list lookup and
//! accidental state derivation.

pub mod helpers;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::{AccidentalState, Interval, KeyList, KeySigEvent};
use crate::xml::{FileDivision, SchemaError};
use helpers::{js_error, to_js};

/// Result of reading a key list document
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct KeyListReadResult {
    pub keys: Vec<(i32, KeySigEvent)>,
    pub schema_errors: Vec<String>,
}

fn read_key_list(xml: &str, file_division: i32) -> Result<(KeyList, Vec<SchemaError>), JsValue> {
    KeyList::from_xml_str(xml, crate::models::key_list::KEY_LIST_TAG, &FileDivision::new(file_division))
        .map_err(|e| js_error("Key list read error", e))
}

/// Transpose a key signature (-7..7) by a diatonic/chromatic interval
///
/// Out-of-range keys are clamped before transposing.
#[wasm_bindgen(js_name = transposeKeySignature)]
pub fn transpose_key_signature(key: i32, diatonic: i32, chromatic: i32) -> i32 {
    let event = KeySigEvent::new(key).transposed(Interval::new(diatonic, chromatic));
    log::debug!(
        "transposeKeySignature: {} by ({}, {}) -> {}",
        key,
        diatonic,
        chromatic,
        event.accidental_type()
    );
    event.accidental_type() as i32
}

/// Read a `<KeyList>` document and return its changes and schema errors
///
/// # Parameters
/// - `xml`: the document text
/// - `file_division`: ticks per quarter the document was written with (0 = internal)
#[wasm_bindgen(js_name = readKeyList)]
pub fn read_key_list_js(xml: &str, file_division: i32) -> Result<JsValue, JsValue> {
    let (list, errors) = read_key_list(xml, file_division)?;
    let result = KeyListReadResult {
        keys: list.iter().map(|(tick, event)| (tick, *event)).collect(),
        schema_errors: errors.iter().map(|e| e.to_string()).collect(),
    };
    to_js(&result)
}

/// Key signature in effect at `tick` in a `<KeyList>` document
#[wasm_bindgen(js_name = keySignatureAt)]
pub fn key_signature_at(xml: &str, tick: i32) -> Result<JsValue, JsValue> {
    let (list, _) = read_key_list(xml, 0)?;
    to_js(&list.key(tick))
}

/// Per-line accidentals (-1 flat, 0 natural, 1 sharp) implied by a key
#[wasm_bindgen(js_name = accidentalStateFor)]
pub fn accidental_state_for(key: i32) -> js_sys::Int8Array {
    let state = AccidentalState::from_key(&KeySigEvent::new(key));
    let values: Vec<i8> = state.as_slice().iter().map(|v| *v as i8).collect();
    js_sys::Int8Array::from(values.as_slice())
}
