//! Key Signature Timeline WASM Module
//!
//! Key signature state over a musical timeline: the key signature value
//! itself, its expansion into per-line accidentals, the list of key changes
//! along the score, and transposition of keys around the circle of fifths.

pub mod api;
pub mod models;
pub mod transposition;
pub mod xml;

// Re-export commonly used types
pub use models::accidental_state::{AccidentalState, AccidentalVal};
pub use models::key_list::KeyList;
pub use models::key_sig_event::{KeySig, KeySigEvent};
pub use models::tpc::Interval;
pub use transposition::{transpose_key, transpose_tpc};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            log::warn!("logger already initialized");
        }
    }

    log::info!("Key signature WASM module initialized");
}
