// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic page simulator.
//!
//! [`PageSim`] wires the `scrollwork_core` machines together the same way the
//! web crate does, but against a scripted clock and an in-memory mutation log
//! instead of a browser. Tests feed it scroll positions, intersection
//! samples, pointer moves, menu events, and form submissions, then
//! assert on the [`PageMutation`]s that a real page would have applied to the
//! DOM.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use scrollwork_core::form::{
    ContactForm, FieldSpec, FormUpdate, MessageKind, RelayOutcome, SubmitDecision,
};
use scrollwork_core::menu::{Menu, MenuEffects, MenuEvent};
use scrollwork_core::pointer::{CursorFollower, Point};
use scrollwork_core::rate::{DebounceGate, INDICATOR_DEBOUNCE, SCROLL_THROTTLE, ThrottleGate};
use scrollwork_core::reveal::{GroupId, RevealId, RevealScheduler};
use scrollwork_core::time::Instant;
use scrollwork_core::viewport::{
    INDICATOR_HIDE_PX, NAVBAR_SCROLLED_PX, SectionSpan, ThresholdSignal, ViewportMetrics,
    active_section,
};

/// One DOM mutation a real page would have applied.
#[derive(Clone, Debug, PartialEq)]
pub enum PageMutation {
    /// The navbar's `scrolled` class was added (`true`) or removed.
    NavbarScrolled(bool),
    /// The progress bar width changed, percent.
    ProgressWidth(f64),
    /// The hero scroll indicator faded in (`true`) or out.
    IndicatorVisible(bool),
    /// The active nav link changed (index into the section list).
    ActiveLink(Option<usize>),
    /// A watched element received its reveal class.
    Revealed(RevealId),
    /// The menu's classes / scroll lock / aria state were applied.
    MenuApplied(MenuEffects),
    /// An error marker was added to a field.
    FieldErrorSet(usize),
    /// An error marker was removed from a field.
    FieldErrorCleared(usize),
    /// The submit control was disabled (`true`) or re-enabled.
    SubmitDisabled(bool),
    /// A status message was shown.
    MessageShown {
        /// Success or error styling.
        kind: MessageKind,
        /// The visible text.
        text: String,
    },
    /// All form fields were cleared.
    FieldsCleared,
    /// The custom cursor's dot and outline were repositioned.
    CursorMoved {
        /// New dot position.
        dot: Point,
        /// New outline position.
        outline: Point,
    },
}

/// Layout the simulator pretends the page has.
#[derive(Clone, Debug)]
pub struct PageLayout {
    /// Viewport height, px.
    pub viewport_height: f64,
    /// Document height, px.
    pub document_height: f64,
    /// Navbar height, px.
    pub navbar_height: f64,
    /// Section extents, document order.
    pub sections: Vec<SectionSpan>,
}

/// The simulated page.
#[derive(Debug)]
pub struct PageSim {
    now: Instant,
    layout: PageLayout,
    scroll_gate: ThrottleGate,
    indicator_gate: DebounceGate,
    navbar: ThresholdSignal,
    indicator_hidden: ThresholdSignal,
    active_link: Option<usize>,
    scroll_y: f64,
    reveal_sched: RevealScheduler,
    menu: Menu,
    form: ContactForm,
    cursor: CursorFollower,
    log: Vec<PageMutation>,
}

impl PageSim {
    /// Creates a page at scroll offset 0 with the given layout and form.
    #[must_use]
    pub fn new(layout: PageLayout, fields: Vec<FieldSpec>) -> Self {
        Self {
            now: Instant(0),
            layout,
            scroll_gate: ThrottleGate::new(SCROLL_THROTTLE),
            indicator_gate: DebounceGate::new(INDICATOR_DEBOUNCE),
            navbar: ThresholdSignal::new(NAVBAR_SCROLLED_PX),
            indicator_hidden: ThresholdSignal::new(INDICATOR_HIDE_PX),
            active_link: None,
            scroll_y: 0.0,
            reveal_sched: RevealScheduler::new(),
            menu: Menu::new(),
            form: ContactForm::new(fields),
            cursor: CursorFollower::new(),
            log: Vec::new(),
        }
    }

    /// Returns the current simulated time.
    #[must_use]
    pub const fn now(&self) -> Instant {
        self.now
    }

    /// Gives mutable access to the reveal scheduler for registration.
    pub fn reveals(&mut self) -> &mut RevealScheduler {
        &mut self.reveal_sched
    }

    /// Returns everything logged so far, oldest first.
    #[must_use]
    pub fn log(&self) -> &[PageMutation] {
        &self.log
    }

    /// Drains the mutation log.
    pub fn take_log(&mut self) -> Vec<PageMutation> {
        core::mem::take(&mut self.log)
    }

    /// Advances the clock, firing any timers that come due on the way
    /// (debounce deadlines and scheduled reveals).
    pub fn advance_to(&mut self, now: Instant) {
        debug_assert!(now >= self.now, "time runs forward");
        self.now = now;

        if self.indicator_gate.fire(now) {
            let flipped = self.indicator_hidden.update(self.scroll_y);
            if let Some(hidden) = flipped {
                self.log.push(PageMutation::IndicatorVisible(!hidden));
            }
        }
        for id in self.reveal_sched.take_due(now) {
            self.log.push(PageMutation::Revealed(id));
        }
    }

    /// A scroll event at the current time: runs the throttled handler chain
    /// and records the debounced indicator update for later.
    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
        self.indicator_gate.record(self.now);

        if !self.scroll_gate.admit(self.now) {
            return;
        }

        if let Some(past) = self.navbar.update(scroll_y) {
            self.log.push(PageMutation::NavbarScrolled(past));
        }

        let metrics = ViewportMetrics {
            scroll_y,
            viewport_height: self.layout.viewport_height,
            document_height: self.layout.document_height,
        };
        self.log
            .push(PageMutation::ProgressWidth(metrics.progress_percent()));

        let active = active_section(&self.layout.sections, scroll_y, self.layout.navbar_height);
        if active != self.active_link {
            self.active_link = active;
            self.log.push(PageMutation::ActiveLink(active));
        }
    }

    /// An intersection callback for a standalone watch.
    pub fn intersect(&mut self, id: RevealId, ratio: f64) {
        self.reveal_sched.intersect(id, ratio, self.now);
        let now = self.now;
        for due in self.reveal_sched.take_due(now) {
            self.log.push(PageMutation::Revealed(due));
        }
    }

    /// An intersection callback for a group container.
    pub fn intersect_group(&mut self, id: GroupId, ratio: f64) {
        self.reveal_sched.intersect_group(id, ratio, self.now);
        let now = self.now;
        for due in self.reveal_sched.take_due(now) {
            self.log.push(PageMutation::Revealed(due));
        }
    }

    /// A menu interaction.
    pub fn menu_event(&mut self, event: MenuEvent) {
        if let Some(effects) = self.menu.handle(event) {
            self.log.push(PageMutation::MenuApplied(effects));
        }
    }

    /// A submit attempt with the given field values. Returns the payload the
    /// page would POST, if validation passed.
    pub fn submit(&mut self, values: &[String]) -> Option<Vec<(String, String)>> {
        match self.form.begin_submit(values) {
            SubmitDecision::Invalid { fields } => {
                for field in fields {
                    self.log.push(PageMutation::FieldErrorSet(field));
                }
                None
            }
            SubmitDecision::Busy => None,
            SubmitDecision::Submit { payload } => {
                self.log.push(PageMutation::SubmitDisabled(true));
                Some(payload)
            }
        }
    }

    /// The relay request concluded; applies the resulting form update.
    pub fn relay_concluded(&mut self, outcome: RelayOutcome) -> FormUpdate {
        let update = self.form.finish_submit(outcome);
        self.log.push(PageMutation::SubmitDisabled(false));
        if update.clear_fields {
            self.log.push(PageMutation::FieldsCleared);
        }
        self.log.push(PageMutation::MessageShown {
            kind: update.kind,
            text: update.message.clone(),
        });
        update
    }

    /// A keystroke in a field.
    pub fn field_edited(&mut self, field: usize) {
        if self.form.field_edited(field) {
            self.log.push(PageMutation::FieldErrorCleared(field));
        }
    }

    /// A raw pointer move; takes effect on the next [`frame`](Self::frame).
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.cursor.set_target(Point { x, y });
    }

    /// One animation frame: advances the cursor interpolation.
    pub fn frame(&mut self) {
        let (dot, outline) = self.cursor.advance();
        self.log.push(PageMutation::CursorMoved { dot, outline });
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;
    use alloc::vec;

    use scrollwork_core::form::FieldKind;
    use scrollwork_core::reveal::{GROUP_STAGGER, GROUP_THRESHOLD, SINGLE_THRESHOLD};
    use scrollwork_core::time::Duration;

    use super::*;

    fn layout() -> PageLayout {
        PageLayout {
            viewport_height: 800.0,
            document_height: 4000.0,
            navbar_height: 80.0,
            sections: vec![
                SectionSpan {
                    top: 0.0,
                    height: 900.0,
                },
                SectionSpan {
                    top: 900.0,
                    height: 1500.0,
                },
                SectionSpan {
                    top: 2400.0,
                    height: 1600.0,
                },
            ],
        }
    }

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec {
                name: "name".to_string(),
                kind: FieldKind::Text,
                required: true,
            },
            FieldSpec {
                name: "email".to_string(),
                kind: FieldKind::Email,
                required: true,
            },
            FieldSpec {
                name: "message".to_string(),
                kind: FieldKind::Text,
                required: true,
            },
        ]
    }

    fn sim() -> PageSim {
        PageSim::new(layout(), fields())
    }

    #[test]
    fn navbar_class_tracks_threshold() {
        let mut sim = sim();
        sim.scroll_to(30.0);
        assert!(
            !sim.log()
                .iter()
                .any(|m| matches!(m, PageMutation::NavbarScrolled(_))),
            "no flip below 50px"
        );

        sim.advance_to(Instant(100));
        sim.scroll_to(60.0);
        assert!(
            sim.log().contains(&PageMutation::NavbarScrolled(true)),
            "flips past 50px"
        );

        sim.advance_to(Instant(200));
        sim.scroll_to(0.0);
        assert!(sim.log().contains(&PageMutation::NavbarScrolled(false)));
    }

    #[test]
    fn scroll_burst_is_throttled() {
        let mut sim = sim();
        sim.scroll_to(100.0);
        for i in 1..10 {
            sim.advance_to(Instant(i));
            sim.scroll_to(100.0 + i as f64);
        }
        let progress_updates = sim
            .log()
            .iter()
            .filter(|m| matches!(m, PageMutation::ProgressWidth(_)))
            .count();
        assert_eq!(progress_updates, 1, "one handler run per 16ms window");
    }

    #[test]
    fn indicator_fades_after_debounce_quiet_period() {
        let mut sim = sim();
        sim.scroll_to(150.0);
        assert!(
            !sim.log()
                .iter()
                .any(|m| matches!(m, PageMutation::IndicatorVisible(_))),
            "debounced update not yet due"
        );
        sim.advance_to(Instant(10));
        assert!(sim.log().contains(&PageMutation::IndicatorVisible(false)));
    }

    #[test]
    fn active_link_follows_sections() {
        let mut sim = sim();
        sim.scroll_to(0.0);
        assert!(sim.log().contains(&PageMutation::ActiveLink(Some(0))));

        sim.advance_to(Instant(20));
        sim.scroll_to(1000.0);
        assert!(sim.log().contains(&PageMutation::ActiveLink(Some(1))));

        // At most one ActiveLink per distinct section.
        let changes = sim
            .log()
            .iter()
            .filter(|m| matches!(m, PageMutation::ActiveLink(_)))
            .count();
        assert_eq!(changes, 2);
    }

    #[test]
    fn staggered_reveals_come_out_in_order() {
        let mut sim = sim();
        let group = sim.reveals().register_group(GROUP_THRESHOLD, GROUP_STAGGER);
        let a = sim.reveals().register_member(group);
        let b = sim.reveals().register_member(group);
        let c = sim.reveals().register_member(group);

        sim.advance_to(Instant(1000));
        sim.intersect_group(group, 0.25);
        assert_eq!(sim.take_log(), [PageMutation::Revealed(a)]);

        sim.advance_to(Instant(1150));
        assert_eq!(sim.take_log(), [PageMutation::Revealed(b)]);

        sim.advance_to(Instant(1300));
        assert_eq!(sim.take_log(), [PageMutation::Revealed(c)]);
    }

    #[test]
    fn reveal_never_replays() {
        let mut sim = sim();
        let id = sim.reveals().register(SINGLE_THRESHOLD, Duration(100));

        sim.intersect(id, 0.5);
        sim.advance_to(Instant(100));
        assert_eq!(sim.take_log(), [PageMutation::Revealed(id)]);

        // Scroll away and back.
        sim.intersect(id, 0.0);
        sim.intersect(id, 1.0);
        sim.advance_to(Instant(5000));
        assert!(sim.take_log().is_empty(), "terminal state");
    }

    #[test]
    fn invalid_submit_never_produces_payload() {
        let mut sim = sim();
        let payload = sim.submit(&[String::new(), "a@b.com".to_string(), "hi".to_string()]);
        assert_eq!(payload, None);
        assert_eq!(sim.take_log(), [PageMutation::FieldErrorSet(0)]);
    }

    #[test]
    fn full_submit_round_trip() {
        let mut sim = sim();
        let payload = sim
            .submit(&[
                "A".to_string(),
                "a@b.com".to_string(),
                "hi".to_string(),
            ])
            .expect("valid input submits");
        assert_eq!(payload[1], ("email".to_string(), "a@b.com".to_string()));

        sim.relay_concluded(RelayOutcome::Delivered);
        assert_eq!(
            sim.take_log(),
            [
                PageMutation::SubmitDisabled(true),
                PageMutation::SubmitDisabled(false),
                PageMutation::FieldsCleared,
                PageMutation::MessageShown {
                    kind: MessageKind::Success,
                    text: scrollwork_core::form::SUCCESS_TEXT.to_string(),
                },
            ]
        );
    }

    #[test]
    fn failed_submit_keeps_fields() {
        let mut sim = sim();
        sim.submit(&["A".to_string(), "a@b.com".to_string(), "hi".to_string()])
            .expect("valid input submits");
        sim.relay_concluded(RelayOutcome::Rejected {
            message: Some("X".to_string()),
        });
        let log = sim.take_log();
        assert!(!log.contains(&PageMutation::FieldsCleared));
        assert!(log.contains(&PageMutation::MessageShown {
            kind: MessageKind::Error,
            text: "X".to_string(),
        }));
    }

    #[test]
    fn cursor_trails_the_pointer() {
        let mut sim = sim();
        sim.pointer_moved(100.0, 0.0);
        sim.frame();
        sim.frame();

        let log = sim.take_log();
        let [
            PageMutation::CursorMoved {
                dot: d1,
                outline: o1,
            },
            PageMutation::CursorMoved {
                dot: d2,
                outline: o2,
            },
        ] = log.as_slice()
        else {
            panic!("expected two cursor frames, got {log:?}");
        };
        assert!(o1.x < d1.x, "outline lags the dot");
        assert!(d1.x < d2.x && d2.x < 100.0, "dot approaches the pointer");
        assert!(o2.x < d2.x);
    }

    #[test]
    fn menu_flow_locks_and_releases_scroll() {
        let mut sim = sim();
        sim.menu_event(MenuEvent::ToggleActivated);
        sim.menu_event(MenuEvent::OutsidePressed);
        let log = sim.take_log();
        assert_eq!(log.len(), 2);
        let PageMutation::MenuApplied(open) = &log[0] else {
            panic!("expected MenuApplied, got {:?}", log[0]);
        };
        assert!(open.lock_body_scroll);
        let PageMutation::MenuApplied(closed) = &log[1] else {
            panic!("expected MenuApplied, got {:?}", log[1]);
        };
        assert!(!closed.lock_body_scroll);
    }
}
