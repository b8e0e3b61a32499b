/// Spelling-aware transposition of tonal pitch classes
///
/// An interval is a fixed distance on the line of fifths, so transposing a
/// tpc is a shift. When double accidentals are not wanted, results past
/// Fb..B# are respelled enharmonically (twelve fifths at a time).

use crate::models::tpc::{tpc_is_valid, Interval, Tpc, TPC_B_S, TPC_F_B, TPC_MAX, TPC_MIN};

/// Transpose `tpc` by `interval`.
///
/// With `use_double_accidentals` the result may land anywhere in Fbb..B##;
/// otherwise it is respelled into the single-accidental range.
pub fn transpose_tpc(tpc: Tpc, interval: Interval, use_double_accidentals: bool) -> Tpc {
    if interval.is_zero() {
        return tpc;
    }

    let shifted = tpc as i64 + interval.fifths();
    let result = if use_double_accidentals {
        respell_into(shifted, TPC_MIN, TPC_MAX)
    } else {
        respell_into(shifted, TPC_F_B, TPC_B_S)
    };
    debug_assert!(tpc_is_valid(result));
    result
}

/// Move `tpc` by whole enharmonic steps (12 fifths) until it lies in
/// `lo..=hi`: down to the highest spelling not above `hi`, or up to the
/// lowest spelling not below `lo`.
fn respell_into(tpc: i64, lo: Tpc, hi: Tpc) -> Tpc {
    let (lo, hi) = (lo as i64, hi as i64);
    let respelled = if tpc > hi {
        tpc - 12 * (tpc - hi + 11).div_euclid(12)
    } else if tpc < lo {
        tpc + 12 * (lo - tpc + 11).div_euclid(12)
    } else {
        tpc
    };
    respelled as Tpc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tpc::{tpc_name, TPC_C};

    fn up(name_tpc: Tpc, interval: Interval) -> String {
        tpc_name(transpose_tpc(name_tpc, interval, false))
    }

    #[test]
    fn test_zero_interval_is_identity() {
        for tpc in -1..=33 {
            assert_eq!(transpose_tpc(tpc, Interval::UNISON, false), tpc);
            assert_eq!(transpose_tpc(tpc, Interval::UNISON, true), tpc);
        }
    }

    #[test]
    fn test_simple_intervals_from_c() {
        assert_eq!(up(TPC_C, Interval::MAJOR_SECOND), "D");
        assert_eq!(up(TPC_C, Interval::MINOR_SECOND), "Db");
        assert_eq!(up(TPC_C, Interval::MINOR_THIRD), "Eb");
        assert_eq!(up(TPC_C, Interval::AUGMENTED_FOURTH), "F#");
        assert_eq!(up(TPC_C, Interval::DIMINISHED_FIFTH), "Gb");
        assert_eq!(up(TPC_C, Interval::OCTAVE), "C");
    }

    #[test]
    fn test_spelling_preserved() {
        // E major third up is G#, not Ab
        assert_eq!(up(18, Interval::MAJOR_THIRD), "G#");
        // Ab major third up is C, not B#
        assert_eq!(up(10, Interval::MAJOR_THIRD), "C");
    }

    #[test]
    fn test_respelled_without_double_accidentals() {
        // B# major second up would be C##
        assert_eq!(up(TPC_B_S, Interval::MAJOR_SECOND), "D");
        assert_eq!(
            tpc_name(transpose_tpc(TPC_B_S, Interval::MAJOR_SECOND, true)),
            "C##"
        );
        // Fb major second down would be Ebb
        assert_eq!(up(TPC_F_B, Interval::MAJOR_SECOND.flip()), "D");
    }

    #[test]
    fn test_huge_intervals_stay_in_range() {
        let intervals = [
            Interval::new(0, i32::MAX / 2),
            Interval::new(0, i32::MAX),
            Interval::new(0, i32::MIN),
            Interval::new(i32::MAX, i32::MIN),
            Interval::new(i32::MIN, i32::MAX),
        ];
        for tpc in [TPC_F_B, TPC_C, TPC_B_S] {
            for interval in intervals {
                let single = transpose_tpc(tpc, interval, false);
                assert!((TPC_F_B..=TPC_B_S).contains(&single), "{:?}", interval);
                let double = transpose_tpc(tpc, interval, true);
                assert!(tpc_is_valid(double), "{:?}", interval);
            }
        }
    }

    #[test]
    fn test_many_octaves_keep_pitch_class() {
        // a thousand octaves of semitones only lands on B#, same as C
        assert_eq!(up(TPC_C, Interval::new(0, 12 * 1000)), "B#");
        assert_eq!(up(TPC_C, Interval::new(7 * 1000, 12 * 1000)), "C");
    }
}
