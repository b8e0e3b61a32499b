//! Models module for key signature state
//!
//! Value types for key signatures, their expansion into per-line
//! accidentals, and their placement along the timeline.

pub mod accidental_state;
pub mod key_list;
pub mod key_sig_event;
pub mod tpc;

// Re-export commonly used types
pub use accidental_state::{AccidentalState, AccidentalVal};
pub use key_list::KeyList;
pub use key_sig_event::{KeySig, KeySigEvent, MAX_ACCIDENTALS, MIN_ACCIDENTALS};
pub use tpc::{Interval, Tpc};
