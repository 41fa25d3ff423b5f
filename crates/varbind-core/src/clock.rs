#![forbid(unsafe_code)]

//! Logical frame clock used to stamp change-history records.
//!
//! The host advances the frame counter once per update tick. Everything is
//! thread-local, matching the single-threaded variable model.

use std::cell::Cell;
use std::time::{Duration, Instant};

thread_local! {
    static FRAME: Cell<u64> = const { Cell::new(0) };
    static EPOCH: Instant = Instant::now();
}

/// Advance the logical frame counter, returning the new frame number.
pub fn advance_frame() -> u64 {
    FRAME.with(|frame| {
        let next = frame.get().wrapping_add(1);
        frame.set(next);
        next
    })
}

/// Current logical frame number.
#[must_use]
pub fn current_frame() -> u64 {
    FRAME.with(Cell::get)
}

/// Time elapsed since the clock was first touched on this thread.
#[must_use]
pub fn elapsed() -> Duration {
    EPOCH.with(Instant::elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_advance_monotonically() {
        let start = current_frame();
        assert_eq!(advance_frame(), start + 1);
        assert_eq!(advance_frame(), start + 2);
        assert_eq!(current_frame(), start + 2);
    }

    #[test]
    fn elapsed_is_monotonic() {
        let a = elapsed();
        let b = elapsed();
        assert!(b >= a);
    }
}
