/// Key signature transposition around the circle of fifths
///
/// Keys are mapped to the tonic's tonal pitch class, transposed with the
/// spelling primitive and mapped back, so the result is spelled the same
/// way the rest of the score is.

use crate::models::tpc::{Interval, Tpc, TPC_C_B, TPC_C_S};
use crate::transposition::tpc_transpose::transpose_tpc;

//                      Cb  Gb  Db  Ab  Eb  Bb  F   C   G   D   A   E   B   F#  C#
const KEY_TO_TPC: [Tpc; 15] = [7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21];
const TPC_TO_KEY: [i8; 15] = [-7, -6, -5, -4, -3, -2, -1, 0, 1, 2, 3, 4, 5, 6, 7];

/// Transpose a key signature (-7 = Cb major .. 7 = C# major) by `interval`.
///
/// `key` must already lie in [-7, 7]; `KeySigEvent` guarantees that. A
/// result past seven sharps or flats is taken to its enharmonic key (Fb
/// major becomes E major).
pub fn transpose_key(key: i8, interval: Interval) -> i8 {
    debug_assert!((-7..=7).contains(&key), "key {} out of range", key);

    let tpc = KEY_TO_TPC[(key as i32 + 7) as usize];
    let mut tpc = transpose_tpc(tpc, interval, false);
    if tpc > TPC_C_S {
        tpc -= 12;
    } else if tpc < TPC_C_B {
        tpc += 12;
    }
    TPC_TO_KEY[(tpc - TPC_C_B) as usize]
}
