// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rate limiting for high-frequency event streams.
//!
//! Scroll and pointer events arrive at an unbounded rate; the handlers they
//! drive only need to run a few dozen times a second. Two gates cover the
//! patterns the page uses:
//!
//! - [`ThrottleGate`] — leading-edge: the first event in a window passes
//!   through immediately, then the gate stays closed for the window length.
//!   Used for scroll-driven class and style updates (~one frame, 16 ms).
//! - [`DebounceGate`] — trailing-edge: nothing fires while events keep
//!   arriving; once they pause for the quiet period, exactly one invocation
//!   is due. Used for the scroll-indicator fade.
//!
//! Both gates are passive. They never call anything; the caller asks them
//! whether a handler invocation is due at a given instant.

use crate::time::{Duration, Instant};

/// The scroll handlers run at most once per frame.
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(16);

/// Quiet period for the debounced scroll-indicator update.
pub const INDICATOR_DEBOUNCE: Duration = Duration::from_millis(10);

/// Leading-edge rate limiter: at most one invocation per window.
#[derive(Clone, Copy, Debug)]
pub struct ThrottleGate {
    window: Duration,
    closed_until: Option<Instant>,
}

impl ThrottleGate {
    /// Creates a gate that admits one event per `window`.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            closed_until: None,
        }
    }

    /// Records an event at `now` and returns whether the handler should run.
    ///
    /// The first event always passes. Subsequent events are swallowed until
    /// the window elapses.
    pub fn admit(&mut self, now: Instant) -> bool {
        match self.closed_until {
            Some(until) if now < until => false,
            _ => {
                self.closed_until = now.checked_add(self.window);
                true
            }
        }
    }
}

/// Trailing-edge rate limiter: fires once after events go quiet.
#[derive(Clone, Copy, Debug)]
pub struct DebounceGate {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl DebounceGate {
    /// Creates a gate that fires after `quiet` with no new events.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Records an event at `now`, pushing the pending deadline back.
    pub fn record(&mut self, now: Instant) {
        self.deadline = now.checked_add(self.quiet);
    }

    /// Returns `true` once per burst, when the quiet period has elapsed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Returns the instant the gate will fire, if a burst is pending.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_admits_leading_edge() {
        let mut gate = ThrottleGate::new(Duration(16));
        assert!(gate.admit(Instant(0)), "first event passes");
        assert!(!gate.admit(Instant(5)));
        assert!(!gate.admit(Instant(15)));
        assert!(gate.admit(Instant(16)), "window elapsed");
        assert!(!gate.admit(Instant(20)));
    }

    #[test]
    fn throttle_idle_gap_reopens() {
        let mut gate = ThrottleGate::new(Duration(16));
        assert!(gate.admit(Instant(0)));
        // Long idle gap; the next burst starts with an immediate admit.
        assert!(gate.admit(Instant(1000)));
        assert!(!gate.admit(Instant(1001)));
    }

    #[test]
    fn debounce_fires_once_after_quiet() {
        let mut gate = DebounceGate::new(Duration(10));
        gate.record(Instant(0));
        gate.record(Instant(4));
        gate.record(Instant(8));
        assert!(!gate.fire(Instant(12)), "still within quiet period");
        assert!(gate.fire(Instant(18)), "quiet period elapsed");
        assert!(!gate.fire(Instant(30)), "burst already consumed");
    }

    #[test]
    fn debounce_deadline_tracks_last_event() {
        let mut gate = DebounceGate::new(Duration(10));
        assert_eq!(gate.deadline(), None);
        gate.record(Instant(5));
        assert_eq!(gate.deadline(), Some(Instant(15)));
        gate.record(Instant(9));
        assert_eq!(gate.deadline(), Some(Instant(19)));
    }
}
