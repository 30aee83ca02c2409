// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform capability gating.
//!
//! Two media queries decide which cosmetic components exist at all:
//! `(hover: hover)` and `(prefers-reduced-motion: reduce)`. The queries run
//! once at startup in the web layer; this module owns what they imply.
//!
//! Reduced motion never hides content — reveal-gated elements are shown
//! immediately instead of animated in, and smooth scrolling falls back to an
//! instant jump.

/// Capability snapshot taken at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// The primary input can hover (`(hover: hover)` matched).
    pub hover: bool,
    /// The user prefers reduced motion.
    pub reduce_motion: bool,
}

impl Capabilities {
    /// Cursor follower, magnetic buttons, tilt, and split text all need a
    /// hovering pointer and motion allowance.
    #[must_use]
    pub const fn pointer_effects(self) -> bool {
        self.hover && !self.reduce_motion
    }

    /// Whether reveals animate in (otherwise everything shows synchronously).
    #[must_use]
    pub const fn animated_reveals(self) -> bool {
        !self.reduce_motion
    }

    /// Whether in-page scrolling animates (`behavior: smooth`).
    #[must_use]
    pub const fn smooth_scrolling(self) -> bool {
        !self.reduce_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_device_disables_pointer_effects_only() {
        let caps = Capabilities {
            hover: false,
            reduce_motion: false,
        };
        assert!(!caps.pointer_effects());
        assert!(caps.animated_reveals());
        assert!(caps.smooth_scrolling());
    }

    #[test]
    fn reduced_motion_disables_all_animation() {
        let caps = Capabilities {
            hover: true,
            reduce_motion: true,
        };
        assert!(!caps.pointer_effects());
        assert!(!caps.animated_reveals());
        assert!(!caps.smooth_scrolling());
    }

    #[test]
    fn desktop_defaults_enable_everything() {
        let caps = Capabilities {
            hover: true,
            reduce_motion: false,
        };
        assert!(caps.pointer_effects());
        assert!(caps.animated_reveals());
    }
}
