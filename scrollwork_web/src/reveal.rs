// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-reveal wiring.
//!
//! Three kinds of element reveal themselves on scroll: `[data-aos]` elements
//! (standalone, optional `data-aos-delay`), `.timeline` containers (whose
//! `.timeline-item` children stagger in), and split-text headings. All of
//! them share one [`RevealScheduler`]; this module owns the
//! `IntersectionObserver`s that feed it and the single wakeup timer that
//! drains due reveals.
//!
//! With `prefers-reduced-motion` set, no observers are created at all and
//! every element is revealed synchronously at startup.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use scrollwork_core::reveal::{
    GROUP_STAGGER, GROUP_THRESHOLD, GroupId, RevealId, RevealScheduler, SINGLE_THRESHOLD,
    SPLIT_TEXT_LEAD_IN, SPLIT_TEXT_THRESHOLD,
};
use scrollwork_core::time::{Duration, Instant};

use crate::listen::set_timeout;
use crate::page::{PageContext, query_all_in, set_class};
use crate::raf;

/// Class applied to `[data-aos]` elements and timeline items.
const AOS_CLASS: &str = "aos-animate";
/// Class applied to split-text headings.
const SPLIT_CLASS: &str = "animate";

/// Bottom root margin for standalone reveals.
const SINGLE_ROOT_MARGIN: &str = "0px 0px -80px 0px";
/// Bottom root margin for timeline groups.
const GROUP_ROOT_MARGIN: &str = "0px 0px -100px 0px";

struct RevealTarget {
    id: RevealId,
    element: Element,
    class: &'static str,
}

struct RevealWiring {
    sched: RevealScheduler,
    targets: Vec<RevealTarget>,
    /// Group containers (the `.timeline` elements), by observer target.
    groups: Vec<(GroupId, Element)>,
    /// Deadline of the earliest armed wakeup timer, if any.
    next_wakeup: Option<Instant>,
}

/// Registers every reveal-gated element and creates the observers.
///
/// `split_targets` are the headings already prepared by the text splitter;
/// they are empty under reduced motion, which matches the splitter never
/// running there.
pub(crate) fn init(ctx: &Rc<PageContext>, split_targets: Vec<Element>) -> Result<(), JsValue> {
    let mut sched = RevealScheduler::new();
    let mut targets = Vec::new();
    let mut groups = Vec::new();

    let singles = ctx.query_all("[data-aos]");
    for element in &singles {
        let delay = element
            .dyn_ref::<web_sys::HtmlElement>()
            .and_then(|el| el.dataset().get("aosDelay"))
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(0);
        let id = sched.register(SINGLE_THRESHOLD, Duration::from_millis(delay));
        targets.push(RevealTarget {
            id,
            element: element.clone(),
            class: AOS_CLASS,
        });
    }

    let timelines = ctx.query_all(".timeline");
    for timeline in &timelines {
        let group = sched.register_group(GROUP_THRESHOLD, GROUP_STAGGER);
        for item in query_all_in(timeline, ".timeline-item") {
            let id = sched.register_member(group);
            targets.push(RevealTarget {
                id,
                element: item,
                class: AOS_CLASS,
            });
        }
        groups.push((group, timeline.clone()));
    }

    for heading in &split_targets {
        let id = sched.register(SPLIT_TEXT_THRESHOLD, SPLIT_TEXT_LEAD_IN);
        targets.push(RevealTarget {
            id,
            element: heading.clone(),
            class: SPLIT_CLASS,
        });
    }

    if !ctx.caps.animated_reveals() {
        for id in sched.reveal_all() {
            if let Some(target) = targets.iter().find(|t| t.id == id) {
                set_class(&target.element, target.class, true);
            }
        }
        return Ok(());
    }

    let wiring = Rc::new(RefCell::new(RevealWiring {
        sched,
        targets,
        groups,
        next_wakeup: None,
    }));

    let single_observer = make_observer(ctx, &wiring, SINGLE_THRESHOLD, Some(SINGLE_ROOT_MARGIN))?;
    for element in &singles {
        single_observer.observe(element);
    }

    let group_observer = make_observer(ctx, &wiring, GROUP_THRESHOLD, Some(GROUP_ROOT_MARGIN))?;
    for timeline in &timelines {
        group_observer.observe(timeline);
    }

    let split_observer = make_observer(ctx, &wiring, SPLIT_TEXT_THRESHOLD, None)?;
    for heading in &split_targets {
        split_observer.observe(heading);
    }

    Ok(())
}

/// Builds an observer whose entries feed the shared scheduler.
///
/// Containers registered as groups dispatch through `intersect_group`;
/// everything else is a standalone watch. Once an element triggers, it is
/// unobserved (the scheduler ignores replays anyway, but the browser can
/// stop tracking it).
fn make_observer(
    ctx: &Rc<PageContext>,
    wiring: &Rc<RefCell<RevealWiring>>,
    threshold: f64,
    root_margin: Option<&str>,
) -> Result<IntersectionObserver, JsValue> {
    let cb_ctx = Rc::clone(ctx);
    let cb_wiring = Rc::clone(wiring);
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let now = raf::now();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let element = entry.target();
                // Observers fire at the threshold crossing, so the reported
                // ratio can sit a hair under it; clamp up so the sample
                // always clears the watch's own threshold.
                let ratio = entry.intersection_ratio().max(threshold);

                let triggered = {
                    let mut w = cb_wiring.borrow_mut();
                    if let Some((group, _)) = w.groups.iter().find(|(_, el)| *el == element) {
                        let group = *group;
                        w.sched.intersect_group(group, ratio, now)
                    } else if let Some(id) = w
                        .targets
                        .iter()
                        .find(|t| t.element == element)
                        .map(|t| t.id)
                    {
                        w.sched.intersect(id, ratio, now)
                    } else {
                        false
                    }
                };
                if triggered {
                    observer.unobserve(&element);
                }
            }
            drain_due(&cb_ctx, &cb_wiring);
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

/// Applies every due reveal and, if any are still pending, makes sure a
/// wakeup timer is armed no later than the earliest one.
///
/// A stale timer (one whose reveals were drained early by an observer
/// callback) just wakes up, finds nothing due, and re-arms if needed.
fn drain_due(ctx: &Rc<PageContext>, wiring: &Rc<RefCell<RevealWiring>>) {
    let now = raf::now();
    let mut w = wiring.borrow_mut();
    for id in w.sched.take_due(now) {
        if let Some(target) = w.targets.iter().find(|t| t.id == id) {
            set_class(&target.element, target.class, true);
        }
    }
    let Some(due) = w.sched.next_due() else {
        return;
    };
    if matches!(w.next_wakeup, Some(at) if at <= due) {
        return;
    }
    w.next_wakeup = Some(due);
    let delay_ms = due.saturating_since(now).millis().max(1);
    drop(w);

    let cb_ctx = Rc::clone(ctx);
    let cb_wiring = Rc::clone(wiring);
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "reveal delays are well under i32::MAX milliseconds"
    )]
    let delay = delay_ms as i32;
    let armed = set_timeout(&ctx.window, delay, move || {
        cb_wiring.borrow_mut().next_wakeup = None;
        drain_due(&cb_ctx, &cb_wiring);
    });
    if armed.is_err() {
        wiring.borrow_mut().next_wakeup = None;
    }
}
