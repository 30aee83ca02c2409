// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived scroll signals.
//!
//! The viewport dispatcher reads one number — the vertical scroll offset —
//! and fans it out into the signals the page reacts to: the navbar's
//! `scrolled` class, the read-progress bar width, the scroll-indicator fade,
//! and the active navigation link. Everything here is a pure function of
//! [`ViewportMetrics`] and the section geometry, so the web crate only has to
//! copy results into the DOM.

use crate::time::Duration;

/// Scroll offset (px) past which the navbar switches to its solid state.
pub const NAVBAR_SCROLLED_PX: f64 = 50.0;

/// Scroll offset (px) past which the hero scroll indicator fades out.
pub const INDICATOR_HIDE_PX: f64 = 100.0;

/// Extra probe depth (px) past the navbar when resolving the active section.
pub const SECTION_PROBE_PX: f64 = 100.0;

/// Breathing room (px) left between the navbar and a scrolled-to section.
pub const ANCHOR_GAP_PX: f64 = 20.0;

/// Delay before the `loaded` class is applied after the `load` event.
pub const PAGE_LOADED_DELAY: Duration = Duration::from_millis(100);

/// Scroll geometry sampled from the browser on each (throttled) scroll tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    /// Vertical scroll offset in px.
    pub scroll_y: f64,
    /// Height of the visible viewport in px.
    pub viewport_height: f64,
    /// Total scrollable height of the document in px.
    pub document_height: f64,
}

impl ViewportMetrics {
    /// Returns read progress as a percentage in `0.0..=100.0`.
    ///
    /// A document no taller than the viewport has nothing to scroll; that
    /// degenerate denominator reads as 0% rather than dividing by zero.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let scrollable = self.document_height - self.viewport_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
    }
}

/// Edge-detecting boolean signal over a scroll threshold.
///
/// Reports only *changes*, so the DOM class is touched once per flip instead
/// of once per scroll event.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdSignal {
    threshold: f64,
    active: bool,
}

impl ThresholdSignal {
    /// Creates a signal that is active while `value > threshold`.
    ///
    /// Starts inactive, matching a page loaded at the top.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            active: false,
        }
    }

    /// Feeds a new scroll offset; returns `Some(state)` when the signal flips.
    pub fn update(&mut self, value: f64) -> Option<bool> {
        let next = value > self.threshold;
        if next == self.active {
            return None;
        }
        self.active = next;
        Some(next)
    }

    /// Returns the current state without feeding a sample.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Vertical extent of one `<section id=…>`, in document coordinates.
///
/// Sections are assumed non-overlapping and listed in document order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionSpan {
    /// Offset of the section's top edge from the document top, in px.
    pub top: f64,
    /// Height of the section in px.
    pub height: f64,
}

impl SectionSpan {
    /// Returns whether `probe` falls inside `[top, top + height)`.
    #[must_use]
    pub fn contains(&self, probe: f64) -> bool {
        probe >= self.top && probe < self.top + self.height
    }
}

/// Resolves which section the reader is currently in, if any.
///
/// The probe point sits [`SECTION_PROBE_PX`] below the navbar's bottom edge
/// so a section counts as active slightly before its top reaches the navbar.
/// When ranges overlap despite the layout contract, the last match wins. No
/// match means no link is highlighted.
#[must_use]
pub fn active_section(
    sections: &[SectionSpan],
    scroll_y: f64,
    navbar_height: f64,
) -> Option<usize> {
    let probe = scroll_y + navbar_height + SECTION_PROBE_PX;
    sections
        .iter()
        .enumerate()
        .filter(|(_, s)| s.contains(probe))
        .map(|(i, _)| i)
        .next_back()
}

/// Scroll destination for an in-page anchor: the section top minus the navbar
/// height and [`ANCHOR_GAP_PX`], floored at the document top.
#[must_use]
pub fn anchor_target(section_top: f64, navbar_height: f64) -> f64 {
    (section_top - navbar_height - ANCHOR_GAP_PX).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_flips_exactly_on_crossing() {
        let mut navbar = ThresholdSignal::new(NAVBAR_SCROLLED_PX);
        assert_eq!(navbar.update(0.0), None, "starts inactive");
        assert_eq!(navbar.update(50.0), None, "boundary is not past");
        assert_eq!(navbar.update(50.5), Some(true));
        assert_eq!(navbar.update(400.0), None, "no repeat while past");
        assert_eq!(navbar.update(10.0), Some(false));
        assert!(!navbar.is_active());
    }

    #[test]
    fn progress_is_zero_for_short_pages() {
        let m = ViewportMetrics {
            scroll_y: 0.0,
            viewport_height: 900.0,
            document_height: 900.0,
        };
        assert_eq!(m.progress_percent(), 0.0);

        // Taller viewport than document (mobile address-bar weirdness).
        let m = ViewportMetrics {
            viewport_height: 1000.0,
            ..m
        };
        assert_eq!(m.progress_percent(), 0.0);
    }

    #[test]
    fn progress_spans_zero_to_hundred() {
        let mut m = ViewportMetrics {
            scroll_y: 0.0,
            viewport_height: 800.0,
            document_height: 2800.0,
        };
        assert_eq!(m.progress_percent(), 0.0);
        m.scroll_y = 1000.0;
        assert_eq!(m.progress_percent(), 50.0);
        m.scroll_y = 2000.0;
        assert_eq!(m.progress_percent(), 100.0);
    }

    fn sections() -> [SectionSpan; 3] {
        [
            SectionSpan {
                top: 0.0,
                height: 800.0,
            },
            SectionSpan {
                top: 800.0,
                height: 1200.0,
            },
            SectionSpan {
                top: 2000.0,
                height: 600.0,
            },
        ]
    }

    #[test]
    fn active_section_contains_probe() {
        let s = sections();
        // probe = scroll + 80 (navbar) + 100
        assert_eq!(active_section(&s, 0.0, 80.0), Some(0));
        assert_eq!(active_section(&s, 700.0, 80.0), Some(1));
        assert_eq!(active_section(&s, 1900.0, 80.0), Some(2));
    }

    #[test]
    fn no_section_matches_past_the_end() {
        let s = sections();
        // Probe lands past the last section's bottom edge.
        assert_eq!(active_section(&s, 3000.0, 80.0), None);
    }

    #[test]
    fn overlapping_sections_resolve_to_last() {
        let s = [
            SectionSpan {
                top: 0.0,
                height: 1000.0,
            },
            SectionSpan {
                top: 500.0,
                height: 1000.0,
            },
        ];
        assert_eq!(active_section(&s, 520.0, 0.0), Some(1));
    }

    #[test]
    fn anchor_target_floors_at_document_top() {
        assert_eq!(anchor_target(800.0, 80.0), 700.0);
        assert_eq!(anchor_target(50.0, 80.0), 0.0);
    }
}
