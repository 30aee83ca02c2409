// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Millisecond page time.
//!
//! [`Instant`] represents a point in time as whole milliseconds since the
//! page's time origin, matching the resolution this crate needs from
//! `performance.now()` (a [`DOMHighResTimeStamp`][mdn] truncated to ms).
//! [`Duration`] is a span in the same unit.
//!
//! Every machine in this crate takes time as an explicit argument rather than
//! reading a clock, so tests can drive them with plain numbers.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use core::fmt;
use core::ops::{Add, Sub};

/// A point in time, in whole milliseconds since the page's time origin.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Instant(pub u64);

impl Instant {
    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Returns the duration since an earlier instant, or zero if `earlier`
    /// is actually later.
    #[inline]
    #[must_use]
    pub const fn saturating_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }

    /// Checked addition of a duration.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, duration: Duration) -> Option<Self> {
        match self.0.checked_add(duration.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }
}

impl Add<Duration> for Instant {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub<Duration> for Instant {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Duration) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sub for Instant {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instant({}ms)", self.0)
    }
}

/// A span of time in whole milliseconds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Creates a duration from a millisecond count.
    #[inline]
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Returns the raw millisecond value.
    #[inline]
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Saturating subtraction.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Multiplies the duration by an integer factor, saturating on overflow.
    #[inline]
    #[must_use]
    pub const fn saturating_mul(self, factor: u64) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl Add for Duration {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Duration {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({}ms)", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instant_duration_ops() {
        let t = Instant(1000);
        let d = Duration(200);
        assert_eq!((t + d).millis(), 1200);
        assert_eq!((t - d).millis(), 800);
        assert_eq!(Instant(1200) - t, Duration(200));
    }

    #[test]
    fn saturating_since_clamps_to_zero() {
        let t = Instant(1000);
        assert_eq!(t.saturating_since(Instant(1500)), Duration::ZERO);
        assert_eq!(t.saturating_since(Instant(400)), Duration(600));
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(Instant(10).checked_add(Duration(5)), Some(Instant(15)));
        assert_eq!(Instant(u64::MAX).checked_add(Duration(1)), None);
    }

    #[test]
    fn duration_saturating_ops() {
        assert_eq!(Duration(100).saturating_sub(Duration(300)), Duration::ZERO);
        assert_eq!(Duration(150).saturating_mul(3), Duration(450));
        assert_eq!(Duration(u64::MAX).saturating_mul(2), Duration(u64::MAX));
    }
}
