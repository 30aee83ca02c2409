// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven cosmetic math.
//!
//! Pure geometry for the three hover effects: the trailing custom cursor,
//! magnetic buttons, and project-card tilt. The web layer samples pointer
//! events into these types and copies the results into CSS transforms; no
//! state here outlives the interaction.
//!
//! All of this is gated behind hover capability and the reduced-motion
//! preference (see [`capability`](crate::capability)) — on a touch-primary
//! device none of it is constructed at all.

/// Per-frame blend factor for the cursor dot (tight follow).
pub const DOT_BLEND: f64 = 0.35;

/// Per-frame blend factor for the cursor outline (lagging follow).
pub const OUTLINE_BLEND: f64 = 0.15;

/// Fraction of the pointer-to-center delta a magnetic button moves.
pub const MAGNET_STRENGTH: f64 = 0.3;

/// Divisor mapping pointer offset (px) to tilt angle (deg).
pub const TILT_DIVISOR: f64 = 20.0;

/// Vertical lift (px) applied while a card is tilted.
pub const TILT_LIFT_PX: f64 = -8.0;

/// Per-character transition delay step (ms) for split-text headings.
pub const SPLIT_CHAR_STEP_MS: f64 = 30.0;

/// Linear interpolation from `start` toward `end`.
#[inline]
#[must_use]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

/// A point in viewport coordinates (px).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Blends this point toward `target` by `factor`.
    #[must_use]
    pub fn toward(self, target: Self, factor: f64) -> Self {
        Self {
            x: lerp(self.x, target.x, factor),
            y: lerp(self.y, target.y, factor),
        }
    }
}

/// An element's bounding box in viewport coordinates (px).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: self.left + self.width / 2.0,
            y: self.top + self.height / 2.0,
        }
    }
}

/// Two interpolated positions trailing the raw pointer.
///
/// The dot blends faster than the outline, which is what produces the
/// characteristic trailing-ring look. [`advance`](Self::advance) runs once
/// per animation frame for the life of the page; the loop never terminates
/// on its own and is cancelled only by navigation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorFollower {
    target: Point,
    dot: Point,
    outline: Point,
}

impl CursorFollower {
    /// Creates a follower with all positions at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest raw pointer position.
    pub fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    /// Advances one frame; returns the new `(dot, outline)` positions.
    pub fn advance(&mut self) -> (Point, Point) {
        self.dot = self.dot.toward(self.target, DOT_BLEND);
        self.outline = self.outline.toward(self.target, OUTLINE_BLEND);
        (self.dot, self.outline)
    }
}

/// Offset a magnetic button moves toward the pointer hovering over it.
#[must_use]
pub fn magnetic_offset(rect: Rect, pointer: Point) -> Point {
    let center = rect.center();
    Point {
        x: (pointer.x - center.x) * MAGNET_STRENGTH,
        y: (pointer.y - center.y) * MAGNET_STRENGTH,
    }
}

/// A card's 3D tilt, derived from where the pointer sits over it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    /// Rotation about the X axis, degrees.
    pub rotate_x_deg: f64,
    /// Rotation about the Y axis, degrees.
    pub rotate_y_deg: f64,
    /// Vertical translation, px.
    pub lift_px: f64,
}

impl Tilt {
    /// The rest pose (pointer left the card).
    pub const NEUTRAL: Self = Self {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
        lift_px: 0.0,
    };
}

/// Computes the tilt for a pointer at `pointer` (viewport coordinates) over
/// `rect`. Pointer below center tips the card toward the viewer; pointer
/// right of center turns it away.
#[must_use]
pub fn tilt_for(rect: Rect, pointer: Point) -> Tilt {
    let local_x = pointer.x - rect.left;
    let local_y = pointer.y - rect.top;
    let center_x = rect.width / 2.0;
    let center_y = rect.height / 2.0;
    Tilt {
        rotate_x_deg: (local_y - center_y) / TILT_DIVISOR,
        rotate_y_deg: (center_x - local_x) / TILT_DIVISOR,
        lift_px: TILT_LIFT_PX,
    }
}

/// Transition delay (ms) for character `index` of a split-text heading.
#[must_use]
pub fn split_char_delay_ms(index: usize) -> f64 {
    index as f64 * SPLIT_CHAR_STEP_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }

    #[test]
    fn follower_converges_dot_before_outline() {
        let mut follower = CursorFollower::new();
        follower.set_target(Point { x: 100.0, y: 0.0 });

        let (dot, outline) = follower.advance();
        assert_eq!(dot.x, 35.0);
        assert_eq!(outline.x, 15.0);

        // Both monotonically approach the target; the dot stays ahead.
        let (dot2, outline2) = follower.advance();
        assert!(dot2.x > dot.x && dot2.x < 100.0);
        assert!(outline2.x > outline.x && outline2.x < dot2.x);
    }

    #[test]
    fn magnetic_offset_is_zero_at_center() {
        let rect = Rect {
            left: 100.0,
            top: 100.0,
            width: 200.0,
            height: 50.0,
        };
        let center = rect.center();
        assert_eq!(magnetic_offset(rect, center), Point { x: 0.0, y: 0.0 });

        let pulled = magnetic_offset(
            rect,
            Point {
                x: center.x + 40.0,
                y: center.y - 10.0,
            },
        );
        assert_eq!(pulled, Point { x: 12.0, y: -3.0 });
    }

    #[test]
    fn tilt_signs_follow_pointer_quadrant() {
        let rect = Rect {
            left: 0.0,
            top: 0.0,
            width: 200.0,
            height: 100.0,
        };
        // Bottom-right corner: positive rotate_x, negative rotate_y.
        let t = tilt_for(rect, Point { x: 200.0, y: 100.0 });
        assert_eq!(t.rotate_x_deg, 2.5);
        assert_eq!(t.rotate_y_deg, -5.0);
        assert_eq!(t.lift_px, TILT_LIFT_PX);

        // Dead center: no rotation.
        let t = tilt_for(rect, Point { x: 100.0, y: 50.0 });
        assert_eq!(t.rotate_x_deg, 0.0);
        assert_eq!(t.rotate_y_deg, 0.0);
    }

    #[test]
    fn split_delay_scales_with_index() {
        assert_eq!(split_char_delay_ms(0), 0.0);
        assert_eq!(split_char_delay_ms(10), 300.0);
    }
}
