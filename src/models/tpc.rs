/// Tonal pitch classes (tpc)
///
/// A tpc is a position on the line of fifths, so enharmonic spellings stay
/// distinct: F# and Gb are different values even though they sound the same.
///
///   Fbb Cbb ... Fb  Cb  Gb ... F   C   G  ... F#  C#  ... B#  F## ... B##
///   -1   0       6   7   8     13  14  15     20  21      26  27      33
///
/// Moving one step right adds a perfect fifth; twelve steps is an
/// enharmonic respelling (a diminished second, zero semitones).

use serde::{Deserialize, Serialize};

pub type Tpc = i32;

pub const TPC_MIN: Tpc = -1;
pub const TPC_MAX: Tpc = 33;

pub const TPC_F_BB: Tpc = -1;
pub const TPC_F_B: Tpc = 6;
pub const TPC_C_B: Tpc = 7;
pub const TPC_B_B: Tpc = 12;
pub const TPC_F: Tpc = 13;
pub const TPC_C: Tpc = 14;
pub const TPC_F_S: Tpc = 20;
pub const TPC_C_S: Tpc = 21;
pub const TPC_B_S: Tpc = 26;
pub const TPC_B_SS: Tpc = 33;

/// Diatonic step (0 = C .. 6 = B) for `tpc % 7`
const STEP_BY_FIFTH: [i32; 7] = [0, 4, 1, 5, 2, 6, 3];

/// Natural tpc for each diatonic step C D E F G A B
const NATURAL_TPC: [Tpc; 7] = [14, 16, 18, 13, 15, 17, 19];

/// Map a tonal pitch class to its diatonic step (0 = C, 6 = B).
///
/// Accidentals are ignored: F, F# and Fb all map to step 3.
pub fn tpc_to_step(tpc: Tpc) -> i32 {
    STEP_BY_FIFTH[tpc.rem_euclid(7) as usize]
}

/// Build a tpc from a diatonic step and an alteration in semitones.
///
/// Each semitone of alteration is seven fifths along the line.
pub fn step_to_tpc(step: i32, alter: i32) -> Tpc {
    NATURAL_TPC[step.rem_euclid(7) as usize] + alter * 7
}

/// Alteration in semitones carried by a tpc (-2 = double flat .. 2 = double sharp)
pub fn tpc_alter(tpc: Tpc) -> i32 {
    (tpc + 1).div_euclid(7) - 2
}

/// Whether a tpc is inside the supported double-flat..double-sharp range
pub fn tpc_is_valid(tpc: Tpc) -> bool {
    (TPC_MIN..=TPC_MAX).contains(&tpc)
}

/// Spelled name of a tpc, e.g. "F#", "Bb", "Cbb"
pub fn tpc_name(tpc: Tpc) -> String {
    const LETTERS: [&str; 7] = ["C", "D", "E", "F", "G", "A", "B"];
    let letter = LETTERS[tpc_to_step(tpc) as usize];
    let accidental = match tpc_alter(tpc) {
        -2 => "bb",
        -1 => "b",
        0 => "",
        1 => "#",
        2 => "##",
        _ => "?",
    };
    format!("{}{}", letter, accidental)
}

/// A transposition interval
///
/// `diatonic` counts letter steps, `chromatic` counts semitones. Both are
/// needed: an augmented fourth and a diminished fifth share six semitones
/// but spell differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Interval {
    pub diatonic: i32,
    pub chromatic: i32,
}

impl Interval {
    pub const UNISON: Interval = Interval::new(0, 0);
    pub const MINOR_SECOND: Interval = Interval::new(1, 1);
    pub const MAJOR_SECOND: Interval = Interval::new(1, 2);
    pub const MINOR_THIRD: Interval = Interval::new(2, 3);
    pub const MAJOR_THIRD: Interval = Interval::new(2, 4);
    pub const PERFECT_FOURTH: Interval = Interval::new(3, 5);
    pub const AUGMENTED_FOURTH: Interval = Interval::new(3, 6);
    pub const DIMINISHED_FIFTH: Interval = Interval::new(4, 6);
    pub const PERFECT_FIFTH: Interval = Interval::new(4, 7);
    pub const OCTAVE: Interval = Interval::new(7, 12);

    pub const fn new(diatonic: i32, chromatic: i32) -> Self {
        Self { diatonic, chromatic }
    }

    /// Same interval in the opposite direction
    pub const fn flip(self) -> Self {
        Self::new(self.diatonic.saturating_neg(), self.chromatic.saturating_neg())
    }

    pub const fn is_zero(&self) -> bool {
        self.diatonic == 0 && self.chromatic == 0
    }

    /// Distance of this interval along the line of fifths.
    ///
    /// Widened to i64 so arbitrarily large intervals cannot overflow.
    pub const fn fifths(&self) -> i64 {
        7 * self.chromatic as i64 - 12 * self.diatonic as i64
    }
}
