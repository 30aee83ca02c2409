// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot reveal scheduling.
//!
//! Reveal-gated elements start hidden and transition to visible exactly once,
//! when scrolled into view. The [`RevealScheduler`] owns that transition for
//! every watched element on the page — each element is registered once and
//! owned by exactly one watch, which consolidates what used to be several
//! overlapping intersection observers.
//!
//! A watch moves through three phases:
//!
//! ```text
//!   Pending ──intersect (ratio ≥ threshold)──► Scheduled{due} ──poll──► Revealed
//! ```
//!
//! `Revealed` is terminal. Re-intersecting a scheduled or revealed watch is a
//! no-op, so scrolling an element out of view and back never replays its
//! delay. Grouped watches (timeline items) reveal their members on a fixed
//! stagger instead of simultaneously.
//!
//! Under a reduced-motion preference the scheduler is bypassed entirely:
//! [`reveal_all`](RevealScheduler::reveal_all) marks everything revealed
//! synchronously and the caller creates no observers.

use alloc::vec::Vec;

use crate::time::{Duration, Instant};

/// Visibility ratio that triggers a standalone reveal.
pub const SINGLE_THRESHOLD: f64 = 0.1;

/// Visibility ratio that triggers a grouped (staggered) reveal.
pub const GROUP_THRESHOLD: f64 = 0.2;

/// Visibility ratio that triggers a split-text heading animation.
pub const SPLIT_TEXT_THRESHOLD: f64 = 0.5;

/// Delay between consecutive members of a staggered group.
pub const GROUP_STAGGER: Duration = Duration::from_millis(150);

/// Lead-in before a split-text heading starts animating.
pub const SPLIT_TEXT_LEAD_IN: Duration = Duration::from_millis(100);

/// Handle for one watched element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RevealId(pub u32);

/// Handle for a staggered group of elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Scheduled { due: Instant },
    Revealed,
}

#[derive(Debug)]
struct Watch {
    threshold: f64,
    delay: Duration,
    phase: Phase,
    /// Group members are scheduled by their group trigger, never by their
    /// own intersection.
    grouped: bool,
}

#[derive(Debug)]
struct Group {
    threshold: f64,
    step: Duration,
    members: Vec<RevealId>,
    triggered: bool,
}

/// Owns the pending→revealed transition for every watched element.
#[derive(Debug, Default)]
pub struct RevealScheduler {
    watches: Vec<Watch>,
    groups: Vec<Group>,
}

impl RevealScheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            watches: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Registers a standalone element with the given visibility threshold and
    /// reveal delay (the `data-aos-delay` annotation; default zero).
    pub fn register(&mut self, threshold: f64, delay: Duration) -> RevealId {
        let id = RevealId(self.watches.len() as u32);
        self.watches.push(Watch {
            threshold,
            delay,
            phase: Phase::Pending,
            grouped: false,
        });
        id
    }

    /// Registers a staggered group; members reveal `step × index` after the
    /// group's container first intersects.
    pub fn register_group(&mut self, threshold: f64, step: Duration) -> GroupId {
        let id = GroupId(self.groups.len() as u32);
        self.groups.push(Group {
            threshold,
            step,
            members: Vec::new(),
            triggered: false,
        });
        id
    }

    /// Adds a member to a group, in display order.
    ///
    /// # Panics
    ///
    /// Panics if `group` was not returned by this scheduler.
    pub fn register_member(&mut self, group: GroupId) -> RevealId {
        let id = RevealId(self.watches.len() as u32);
        self.watches.push(Watch {
            threshold: 0.0,
            delay: Duration::ZERO,
            phase: Phase::Pending,
            grouped: true,
        });
        self.groups[group.0 as usize].members.push(id);
        id
    }

    /// Feeds an intersection sample for a standalone watch.
    ///
    /// Schedules the reveal when the ratio first crosses the threshold; a
    /// scheduled or revealed watch ignores further samples. Returns `true`
    /// when this sample triggered the watch (the caller can then stop
    /// observing the element).
    pub fn intersect(&mut self, id: RevealId, ratio: f64, now: Instant) -> bool {
        let Some(watch) = self.watches.get_mut(id.0 as usize) else {
            return false;
        };
        if watch.grouped || watch.phase != Phase::Pending || ratio < watch.threshold {
            return false;
        }
        let due = now.checked_add(watch.delay).unwrap_or(now);
        watch.phase = Phase::Scheduled { due };
        true
    }

    /// Feeds an intersection sample for a group container.
    ///
    /// On first trigger, schedules every member at `now + step × index`.
    /// Returns `true` when this sample triggered the group.
    pub fn intersect_group(&mut self, id: GroupId, ratio: f64, now: Instant) -> bool {
        let Some(group) = self.groups.get_mut(id.0 as usize) else {
            return false;
        };
        if group.triggered || ratio < group.threshold {
            return false;
        }
        group.triggered = true;
        for (index, member) in group.members.iter().enumerate() {
            let due = now
                .checked_add(group.step.saturating_mul(index as u64))
                .unwrap_or(now);
            let watch = &mut self.watches[member.0 as usize];
            if watch.phase == Phase::Pending {
                watch.phase = Phase::Scheduled { due };
            }
        }
        true
    }

    /// Collects every watch whose delay has elapsed, marking each revealed.
    ///
    /// Results are ordered by due time (registration order breaks ties), so a
    /// staggered group comes out in increasing index order.
    pub fn take_due(&mut self, now: Instant) -> Vec<RevealId> {
        let mut due: Vec<(Instant, RevealId)> = Vec::new();
        for (index, watch) in self.watches.iter_mut().enumerate() {
            if let Phase::Scheduled { due: at } = watch.phase
                && at <= now
            {
                watch.phase = Phase::Revealed;
                due.push((at, RevealId(index as u32)));
            }
        }
        due.sort_by_key(|&(at, id)| (at, id.0));
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Returns the earliest pending due time, for arming a wakeup timer.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.watches
            .iter()
            .filter_map(|w| match w.phase {
                Phase::Scheduled { due } => Some(due),
                _ => None,
            })
            .min()
    }

    /// Reduced-motion path: marks every watch revealed immediately.
    ///
    /// Returns the ids that were not already revealed, in registration order.
    pub fn reveal_all(&mut self) -> Vec<RevealId> {
        let mut out = Vec::new();
        for (index, watch) in self.watches.iter_mut().enumerate() {
            if watch.phase != Phase::Revealed {
                watch.phase = Phase::Revealed;
                out.push(RevealId(index as u32));
            }
        }
        for group in &mut self.groups {
            group.triggered = true;
        }
        out
    }

    /// Returns whether the watch has reached its terminal state.
    #[must_use]
    pub fn is_revealed(&self, id: RevealId) -> bool {
        matches!(
            self.watches.get(id.0 as usize).map(|w| w.phase),
            Some(Phase::Revealed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_is_one_shot() {
        let mut sched = RevealScheduler::new();
        let id = sched.register(SINGLE_THRESHOLD, Duration::ZERO);

        assert!(!sched.intersect(id, 0.05, Instant(0)), "below threshold");
        assert!(sched.intersect(id, 0.1, Instant(10)), "at threshold");
        assert_eq!(sched.take_due(Instant(10)), [id]);
        assert!(sched.is_revealed(id));

        // Scrolling back into view must not replay anything.
        assert!(!sched.intersect(id, 1.0, Instant(500)));
        assert!(sched.take_due(Instant(1000)).is_empty());
    }

    #[test]
    fn delay_defers_the_reveal() {
        let mut sched = RevealScheduler::new();
        let id = sched.register(SINGLE_THRESHOLD, Duration(200));

        sched.intersect(id, 0.5, Instant(100));
        assert!(sched.take_due(Instant(250)).is_empty(), "not due yet");
        assert_eq!(sched.next_due(), Some(Instant(300)));
        assert_eq!(sched.take_due(Instant(300)), [id]);
        assert_eq!(sched.next_due(), None);
    }

    #[test]
    fn intersecting_while_scheduled_keeps_original_due() {
        let mut sched = RevealScheduler::new();
        let id = sched.register(SINGLE_THRESHOLD, Duration(200));

        assert!(sched.intersect(id, 0.5, Instant(0)));
        assert!(!sched.intersect(id, 0.9, Instant(150)), "already scheduled");
        assert_eq!(sched.next_due(), Some(Instant(200)));
    }

    #[test]
    fn group_staggers_members_in_index_order() {
        let mut sched = RevealScheduler::new();
        let group = sched.register_group(GROUP_THRESHOLD, GROUP_STAGGER);
        let a = sched.register_member(group);
        let b = sched.register_member(group);
        let c = sched.register_member(group);

        assert!(sched.intersect_group(group, 0.3, Instant(1000)));

        assert_eq!(sched.take_due(Instant(1000)), [a]);
        assert!(sched.take_due(Instant(1100)).is_empty());
        assert_eq!(sched.take_due(Instant(1150)), [b]);
        assert_eq!(sched.take_due(Instant(2000)), [c]);
    }

    #[test]
    fn group_triggers_once() {
        let mut sched = RevealScheduler::new();
        let group = sched.register_group(GROUP_THRESHOLD, GROUP_STAGGER);
        let a = sched.register_member(group);
        sched.register_member(group);

        assert!(sched.intersect_group(group, 1.0, Instant(0)));
        assert_eq!(sched.take_due(Instant(0)), [a]);
        assert!(!sched.intersect_group(group, 1.0, Instant(50)));
        // Second member still reveals on the original schedule.
        assert_eq!(sched.take_due(Instant(150)).len(), 1);
    }

    #[test]
    fn member_ignores_direct_intersection() {
        let mut sched = RevealScheduler::new();
        let group = sched.register_group(GROUP_THRESHOLD, GROUP_STAGGER);
        let a = sched.register_member(group);

        assert!(!sched.intersect(a, 1.0, Instant(0)));
        assert!(sched.take_due(Instant(1000)).is_empty());
    }

    #[test]
    fn reveal_all_is_synchronous_and_total() {
        let mut sched = RevealScheduler::new();
        let a = sched.register(SINGLE_THRESHOLD, Duration(400));
        let group = sched.register_group(GROUP_THRESHOLD, GROUP_STAGGER);
        let b = sched.register_member(group);
        let c = sched.register(SPLIT_TEXT_THRESHOLD, Duration::ZERO);

        assert_eq!(sched.reveal_all(), [a, b, c]);
        assert!(sched.is_revealed(a) && sched.is_revealed(b) && sched.is_revealed(c));
        // Nothing left to schedule or trigger.
        assert!(!sched.intersect_group(group, 1.0, Instant(0)));
        assert!(sched.reveal_all().is_empty());
    }

    #[test]
    fn mixed_due_ordering_is_by_due_time() {
        let mut sched = RevealScheduler::new();
        let slow = sched.register(SINGLE_THRESHOLD, Duration(300));
        let fast = sched.register(SINGLE_THRESHOLD, Duration(100));

        sched.intersect(slow, 1.0, Instant(0));
        sched.intersect(fast, 1.0, Instant(0));
        assert_eq!(sched.take_due(Instant(300)), [fast, slow]);
    }
}
