//! Per-line accidental state implied by a key signature
//!
//! Lines are diatonic staff positions counted upward from C of the lowest
//! octave: `line = octave * 7 + step`. Eleven octaves give 77 lines, of which
//! the first 74 are tracked; anything above is simply not modelled.

use serde::{Deserialize, Serialize};

use crate::models::key_sig_event::KeySigEvent;
use crate::models::tpc::{tpc_to_step, Tpc, TPC_B_B, TPC_F_S};

/// Octaves covered by an accidental state
pub const OCTAVES: usize = 11;
/// Lines actually stored
pub const WORKING_SLOTS: usize = 74;

/// Accidental implied on a line
#[repr(i8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum AccidentalVal {
    Flat = -1,
    #[default]
    Natural = 0,
    Sharp = 1,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccidentalStateRepr")]
pub struct AccidentalState {
    state: Vec<AccidentalVal>,
}

#[derive(Deserialize)]
struct AccidentalStateRepr {
    state: Vec<AccidentalVal>,
}

impl TryFrom<AccidentalStateRepr> for AccidentalState {
    type Error = String;

    fn try_from(repr: AccidentalStateRepr) -> Result<Self, Self::Error> {
        if repr.state.len() != WORKING_SLOTS {
            return Err(format!(
                "accidental state has {} lines, expected {}",
                repr.state.len(),
                WORKING_SLOTS
            ));
        }
        Ok(Self { state: repr.state })
    }
}

impl Default for AccidentalState {
    fn default() -> Self {
        Self {
            state: vec![AccidentalVal::Natural; WORKING_SLOTS],
        }
    }
}

impl AccidentalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State preset for `key`
    pub fn from_key(key: &KeySigEvent) -> Self {
        let mut state = Self::new();
        state.init(key);
        state
    }

    /// Reset every line, then mark the lines the key signature alters.
    ///
    /// Only standard signatures are expanded. Custom signatures report an
    /// accidental count of 0 and leave every line natural.
    pub fn init(&mut self, key: &KeySigEvent) {
        self.state.clear();
        self.state.resize(WORKING_SLOTS, AccidentalVal::Natural);

        let count = key.accidental_type() as i32;
        let (base, direction, val): (Tpc, i32, AccidentalVal) = if count > 0 {
            (TPC_F_S, 1, AccidentalVal::Sharp)
        } else {
            (TPC_B_B, -1, AccidentalVal::Flat)
        };

        for octave in 0..OCTAVES {
            for i in 0..count.abs() {
                let line = tpc_to_step(base + direction * i) as usize + octave * 7;
                // lines past the top of the range are not tracked
                if line < WORKING_SLOTS {
                    self.state[line] = val;
                }
            }
        }
    }

    /// Accidental on `line`; lines outside the tracked range read as natural
    pub fn accidental_val(&self, line: usize) -> AccidentalVal {
        self.state.get(line).copied().unwrap_or_default()
    }

    /// Record an accidental on `line`. Returns false and changes nothing if
    /// the line is outside the tracked range.
    pub fn set_accidental_val(&mut self, line: usize, val: AccidentalVal) -> bool {
        match self.state.get_mut(line) {
            Some(slot) => {
                *slot = val;
                true
            }
            None => false,
        }
    }

    pub fn as_slice(&self) -> &[AccidentalVal] {
        &self.state
    }

    /// Lines holding `val`, ascending
    pub fn lines_with(&self, val: AccidentalVal) -> impl Iterator<Item = usize> + '_ {
        self.state
            .iter()
            .enumerate()
            .filter(move |(_, v)| **v == val)
            .map(|(line, _)| line)
    }
}
