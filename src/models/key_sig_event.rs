//! Key signature state at one point of the timeline
//!
//! A `KeySigEvent` is either unset (no key established yet), a standard
//! circle-of-fifths signature (-7 = seven flats .. +7 = seven sharps), or a
//! custom accidental pattern that is opaque to this crate. The natural
//! count travels alongside as a cancellation hint and is not part of the
//! key's identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::tpc::Interval;
use crate::transposition::transpose_key;

/// Most flats a standard signature can carry
pub const MIN_ACCIDENTALS: i8 = -7;
/// Most sharps a standard signature can carry
pub const MAX_ACCIDENTALS: i8 = 7;

// Packed legacy layout: 4 bits accidentals, 4 bits naturals, 16 bits
// custom pattern, 1 bit custom flag, 1 bit invalid flag (LSB first).
const SUBTYPE_ACCIDENTAL_SHIFT: u32 = 0;
const SUBTYPE_NATURAL_SHIFT: u32 = 4;
const SUBTYPE_CUSTOM_TYPE_SHIFT: u32 = 8;
const SUBTYPE_CUSTOM_FLAG_SHIFT: u32 = 24;
const SUBTYPE_INVALID_FLAG_SHIFT: u32 = 25;

/// Which representation a key signature uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeySig {
    /// No key signature has been established
    #[default]
    Unset,
    /// Sharps (positive) or flats (negative) in circle-of-fifths order
    Standard { accidentals: i8 },
    /// Non-standard pattern identified by its custom type number
    Custom { pattern: u16 },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "KeySigEventRepr", into = "KeySigEventRepr")]
pub struct KeySigEvent {
    kind: KeySig,
    natural_type: i8,
}

// Wire form; counts are widened so out-of-range values clamp instead of
// failing to parse.
#[derive(Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
enum KeySigRepr {
    Unset,
    Standard { accidentals: i32 },
    Custom { pattern: u16 },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeySigEventRepr {
    #[serde(flatten)]
    kind: KeySigRepr,
    #[serde(default)]
    natural_type: i32,
}

impl From<KeySigEventRepr> for KeySigEvent {
    fn from(repr: KeySigEventRepr) -> Self {
        let kind = match repr.kind {
            KeySigRepr::Unset => KeySig::Unset,
            KeySigRepr::Standard { accidentals } => KeySig::Standard {
                accidentals: limit("accidentalType", accidentals),
            },
            KeySigRepr::Custom { pattern } => KeySig::Custom { pattern },
        };
        Self {
            kind,
            natural_type: limit("naturalType", repr.natural_type),
        }
    }
}

impl From<KeySigEvent> for KeySigEventRepr {
    fn from(event: KeySigEvent) -> Self {
        let kind = match event.kind {
            KeySig::Unset => KeySigRepr::Unset,
            KeySig::Standard { accidentals } => KeySigRepr::Standard {
                accidentals: accidentals as i32,
            },
            KeySig::Custom { pattern } => KeySigRepr::Custom { pattern },
        };
        Self {
            kind,
            natural_type: event.natural_type as i32,
        }
    }
}

/// Clamp a signature count into [-7, 7], logging any correction
fn limit(field: &str, value: i32) -> i8 {
    if value < MIN_ACCIDENTALS as i32 {
        log::debug!("KeySigEvent: {} {} < {}", field, value, MIN_ACCIDENTALS);
        MIN_ACCIDENTALS
    } else if value > MAX_ACCIDENTALS as i32 {
        log::debug!("KeySigEvent: {} {} > {}", field, value, MAX_ACCIDENTALS);
        MAX_ACCIDENTALS
    } else {
        value as i8
    }
}

/// Sign-extend the low `bits` bits of `value`
fn sign_extend(value: i32, bits: u32) -> i32 {
    let shift = 32 - bits;
    (value << shift) >> shift
}

impl KeySigEvent {
    /// A standard signature with `n` sharps (positive) or flats (negative),
    /// clamped into [-7, 7]
    pub fn new(n: i32) -> Self {
        let mut event = Self::default();
        event.set_accidental_type(n);
        event
    }

    /// A custom signature
    pub fn custom(pattern: u16) -> Self {
        let mut event = Self::default();
        event.set_custom_type(pattern);
        event
    }

    /// The unset sentinel; same as `KeySigEvent::default()`
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> KeySig {
        self.kind
    }

    /// Switch to standard mode with `v` accidentals
    pub fn set_accidental_type(&mut self, v: i32) {
        self.kind = KeySig::Standard {
            accidentals: limit("accidentalType", v),
        };
    }

    /// Switch to custom mode; the accidental count reads as 0 from now on
    pub fn set_custom_type(&mut self, v: u16) {
        self.kind = KeySig::Custom { pattern: v };
    }

    pub fn set_natural_type(&mut self, v: i32) {
        self.natural_type = limit("naturalType", v);
    }

    /// Re-clamp the accidental and natural counts into [-7, 7].
    ///
    /// Setters already clamp, so this only corrects values that came in
    /// through an unchecked path.
    pub fn enforce_limits(&mut self) {
        if let KeySig::Standard { accidentals } = self.kind {
            self.kind = KeySig::Standard {
                accidentals: limit("accidentalType", accidentals as i32),
            };
        }
        self.natural_type = limit("naturalType", self.natural_type as i32);
    }

    /// Accidental count of a standard signature; 0 for custom and unset
    pub fn accidental_type(&self) -> i8 {
        match self.kind {
            KeySig::Standard { accidentals } => accidentals,
            _ => 0,
        }
    }

    pub fn natural_type(&self) -> i8 {
        self.natural_type
    }

    /// Custom pattern number; 0 unless in custom mode
    pub fn custom_type(&self) -> u16 {
        match self.kind {
            KeySig::Custom { pattern } => pattern,
            _ => 0,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.kind, KeySig::Custom { .. })
    }

    pub fn is_valid(&self) -> bool {
        !self.is_invalid()
    }

    pub fn is_invalid(&self) -> bool {
        self.kind == KeySig::Unset
    }

    /// Decode a packed subtype integer written by the previous file format.
    ///
    /// Fields that belong to an inactive mode (an accidental count on an
    /// invalid or custom event) cannot be represented and are dropped.
    pub fn from_subtype(subtype: i32) -> Self {
        let accidentals = sign_extend(subtype >> SUBTYPE_ACCIDENTAL_SHIFT, 4);
        let naturals = sign_extend(subtype >> SUBTYPE_NATURAL_SHIFT, 4);
        let custom_type = ((subtype >> SUBTYPE_CUSTOM_TYPE_SHIFT) & 0xFFFF) as u16;
        let custom = (subtype >> SUBTYPE_CUSTOM_FLAG_SHIFT) & 1 != 0;
        let invalid = (subtype >> SUBTYPE_INVALID_FLAG_SHIFT) & 1 != 0;

        let kind = if invalid {
            KeySig::Unset
        } else if custom {
            KeySig::Custom {
                pattern: custom_type,
            }
        } else {
            KeySig::Standard {
                accidentals: limit("accidentalType", accidentals),
            }
        };
        if kind == KeySig::Unset && (accidentals != 0 || custom || custom_type != 0) {
            log::debug!("KeySigEvent: dropping payload of invalid subtype {:#x}", subtype);
        }

        Self {
            kind,
            natural_type: limit("naturalType", naturals),
        }
    }

    /// Encode into the packed legacy layout. Only used for migration
    /// checks; current files store `<key>` elements instead.
    pub fn to_subtype(&self) -> i32 {
        let (accidentals, custom_type, custom, invalid) = match self.kind {
            KeySig::Unset => (0, 0, 0, 1),
            KeySig::Standard { accidentals } => (accidentals as i32, 0, 0, 0),
            KeySig::Custom { pattern } => (0, pattern as i32, 1, 0),
        };
        ((accidentals & 0xF) << SUBTYPE_ACCIDENTAL_SHIFT)
            | ((self.natural_type as i32 & 0xF) << SUBTYPE_NATURAL_SHIFT)
            | (custom_type << SUBTYPE_CUSTOM_TYPE_SHIFT)
            | (custom << SUBTYPE_CUSTOM_FLAG_SHIFT)
            | (invalid << SUBTYPE_INVALID_FLAG_SHIFT)
    }

    /// This event moved by `interval`. Custom and unset events have no
    /// circle-of-fifths position and come back unchanged.
    pub fn transposed(&self, interval: Interval) -> Self {
        match self.kind {
            KeySig::Standard { accidentals } => Self {
                kind: KeySig::Standard {
                    accidentals: transpose_key(accidentals, interval),
                },
                natural_type: self.natural_type,
            },
            _ => *self,
        }
    }
}

/// Natural count is a display hint, so it is left out of the comparison.
impl PartialEq for KeySigEvent {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for KeySigEvent {}

impl fmt::Display for KeySigEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            KeySig::Unset => write!(f, "invalid"),
            KeySig::Standard { accidentals } => {
                write!(f, "nat {} accidental {}", self.natural_type, accidentals)
            }
            KeySig::Custom { pattern } => {
                write!(f, "nat {} custom {}", self.natural_type, pattern)
            }
        }
    }
}
