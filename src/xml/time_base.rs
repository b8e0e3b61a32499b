//! Conversion of persisted ticks into the timeline's tick unit

/// Internal ticks per quarter note
pub const DIVISION: i32 = 480;

/// Converts a tick read from a file into an internal tick
pub trait TimeBase {
    fn file_division(&self, raw_tick: i32) -> i32;
}

/// File written at the internal division; ticks pass through
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SameDivision;

impl TimeBase for SameDivision {
    fn file_division(&self, raw_tick: i32) -> i32 {
        raw_tick
    }
}

/// File written with `file` ticks per quarter, loaded at `internal`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDivision {
    pub file: i32,
    pub internal: i32,
}

impl FileDivision {
    pub fn new(file: i32) -> Self {
        Self {
            file,
            internal: DIVISION,
        }
    }
}

impl TimeBase for FileDivision {
    fn file_division(&self, raw_tick: i32) -> i32 {
        if self.file <= 0 || self.file == self.internal {
            return raw_tick;
        }
        let file = self.file as i64;
        let tick = (raw_tick as i64 * self.internal as i64 + file / 2) / file;
        // saturate ticks past the end of the timeline
        tick.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

impl<F: Fn(i32) -> i32> TimeBase for F {
    fn file_division(&self, raw_tick: i32) -> i32 {
        self(raw_tick)
    }
}
