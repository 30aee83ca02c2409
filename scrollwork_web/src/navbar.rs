// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navbar scroll state, scroll progress, and the mobile menu.
//!
//! One throttled handler (run on `scroll` and `resize`) fans out into three
//! signals from `scrollwork_core::viewport`: the navbar's `scrolled` class,
//! the progress bar width, and the active-link highlight. The hero scroll
//! indicator runs on the debounce gate instead, so its fade fires once per
//! scroll burst.
//!
//! The mobile menu is the `scrollwork_core::menu` machine; every listener
//! here just feeds it events and mirrors the returned effects into the DOM.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use scrollwork_core::menu::{Menu, MenuEffects, MenuEvent};
use scrollwork_core::rate::{DebounceGate, INDICATOR_DEBOUNCE, SCROLL_THROTTLE, ThrottleGate};
use scrollwork_core::viewport::{
    INDICATOR_HIDE_PX, NAVBAR_SCROLLED_PX, SectionSpan, ThresholdSignal, ViewportMetrics,
    active_section,
};

use crate::listen::{listen, set_timeout};
use crate::page::{PageContext, set_class, set_style};
use crate::raf;

struct NavbarRefs {
    navbar: HtmlElement,
    progress_bar: HtmlElement,
    indicator: Option<HtmlElement>,
    links: Vec<Element>,
    sections: Vec<HtmlElement>,
    /// `links` entry whose `href` targets each section, by section index.
    link_for_section: Vec<Option<Element>>,
}

struct NavbarState {
    scroll_gate: ThrottleGate,
    indicator_gate: DebounceGate,
    scrolled: ThresholdSignal,
    indicator_hidden: ThresholdSignal,
    active: Option<usize>,
    indicator_timer_armed: bool,
}

/// Wires the scroll-driven navbar signals and the mobile menu.
pub(crate) fn init(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    init_menu(ctx)?;

    let Some(navbar) = ctx.by_id::<HtmlElement>("navbar") else {
        return Ok(());
    };

    let sections: Vec<HtmlElement> = ctx
        .query_all("section[id]")
        .into_iter()
        .filter_map(|el| el.dyn_into().ok())
        .collect();
    let links = ctx.query_all(".nav-link");
    let link_for_section = sections
        .iter()
        .map(|section| {
            let id = section.id();
            let href = format!("#{id}");
            links
                .iter()
                .find(|link| link.get_attribute("href").as_deref() == Some(&href))
                .cloned()
        })
        .collect();

    let refs = Rc::new(NavbarRefs {
        navbar,
        progress_bar: create_progress_bar(ctx)?,
        indicator: ctx
            .query_all(".scroll-indicator")
            .into_iter()
            .next()
            .and_then(|el| el.dyn_into().ok()),
        links,
        sections,
        link_for_section,
    });
    let state = Rc::new(RefCell::new(NavbarState {
        scroll_gate: ThrottleGate::new(SCROLL_THROTTLE),
        indicator_gate: DebounceGate::new(INDICATOR_DEBOUNCE),
        scrolled: ThresholdSignal::new(NAVBAR_SCROLLED_PX),
        indicator_hidden: ThresholdSignal::new(INDICATOR_HIDE_PX),
        active: None,
        indicator_timer_armed: false,
    }));

    let scroll_ctx = Rc::clone(ctx);
    let scroll_refs = Rc::clone(&refs);
    let scroll_state = Rc::clone(&state);
    listen(&ctx.window, "scroll", move |_event| {
        on_scroll(&scroll_ctx, &scroll_refs, &scroll_state);
    })?;

    // Resizing changes the progress denominator and section geometry, so it
    // re-runs the same (throttled) fan-out.
    let resize_ctx = Rc::clone(ctx);
    let resize_refs = Rc::clone(&refs);
    let resize_state = Rc::clone(&state);
    listen(&ctx.window, "resize", move |_event| {
        on_scroll(&resize_ctx, &resize_refs, &resize_state);
    })?;

    // Paint the initial state for pages restored mid-scroll.
    on_scroll(ctx, &refs, &state);
    Ok(())
}

/// The read-progress bar is synthesized rather than authored in the HTML.
fn create_progress_bar(ctx: &PageContext) -> Result<HtmlElement, JsValue> {
    let container: HtmlElement = ctx.document.create_element("div")?.unchecked_into();
    container.set_class_name("scroll-progress");
    let bar: HtmlElement = ctx.document.create_element("div")?.unchecked_into();
    bar.set_class_name("scroll-progress-bar");
    container.append_child(&bar)?;
    ctx.body.append_child(&container)?;
    Ok(bar)
}

fn scroll_offset(ctx: &PageContext) -> f64 {
    ctx.window.page_y_offset().unwrap_or(0.0)
}

fn on_scroll(ctx: &Rc<PageContext>, refs: &Rc<NavbarRefs>, state: &Rc<RefCell<NavbarState>>) {
    let now = raf::now();
    let scroll_y = scroll_offset(ctx);

    let mut s = state.borrow_mut();

    s.indicator_gate.record(now);
    let arm_indicator = refs.indicator.is_some() && !s.indicator_timer_armed;
    if arm_indicator {
        s.indicator_timer_armed = true;
    }

    if s.scroll_gate.admit(now) {
        update_signals(ctx, refs, &mut s, scroll_y);
    }
    drop(s);

    // Armed outside the borrow; the timer callback re-borrows the state.
    if arm_indicator {
        arm_indicator_timer(ctx, refs, state, INDICATOR_DEBOUNCE.millis());
    }
}

fn update_signals(ctx: &PageContext, refs: &NavbarRefs, s: &mut NavbarState, scroll_y: f64) {
    if let Some(past) = s.scrolled.update(scroll_y) {
        set_class(&refs.navbar, "scrolled", past);
    }

    let viewport_height = ctx
        .window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let document_height = ctx
        .document
        .document_element()
        .map_or(0.0, |el| f64::from(el.scroll_height()));
    let metrics = ViewportMetrics {
        scroll_y,
        viewport_height,
        document_height,
    };
    set_style(
        &refs.progress_bar,
        "width",
        &format!("{}%", metrics.progress_percent()),
    );

    // Section geometry is read live; layout can change under us (images
    // loading, fonts swapping).
    let spans: Vec<SectionSpan> = refs
        .sections
        .iter()
        .map(|section| SectionSpan {
            top: f64::from(section.offset_top()),
            height: f64::from(section.offset_height()),
        })
        .collect();
    let navbar_height = f64::from(refs.navbar.offset_height());
    let active = active_section(&spans, scroll_y, navbar_height);
    if active != s.active {
        s.active = active;
        for link in &refs.links {
            set_class(link, "active", false);
        }
        if let Some(index) = active
            && let Some(Some(link)) = refs.link_for_section.get(index)
        {
            set_class(link, "active", true);
        }
    }
}

/// Arms the trailing-edge timer for the scroll-indicator fade. If more
/// scroll events arrive before the quiet period ends, the callback re-arms
/// itself for the remainder.
fn arm_indicator_timer(
    ctx: &Rc<PageContext>,
    refs: &Rc<NavbarRefs>,
    state: &Rc<RefCell<NavbarState>>,
    delay_ms: u64,
) {
    let cb_ctx = Rc::clone(ctx);
    let cb_refs = Rc::clone(refs);
    let cb_state = Rc::clone(state);
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "debounce delays are tens of milliseconds"
    )]
    let delay = delay_ms as i32;
    let result = set_timeout(&ctx.window, delay, move || {
        let now = raf::now();
        let mut s = cb_state.borrow_mut();
        if s.indicator_gate.fire(now) {
            s.indicator_timer_armed = false;
            let scroll_y = scroll_offset(&cb_ctx);
            if let Some(hidden) = s.indicator_hidden.update(scroll_y)
                && let Some(indicator) = &cb_refs.indicator
            {
                set_style(indicator, "opacity", if hidden { "0" } else { "1" });
                set_style(
                    indicator,
                    "pointer-events",
                    if hidden { "none" } else { "auto" },
                );
            }
        } else if let Some(deadline) = s.indicator_gate.deadline() {
            let remaining = deadline.saturating_since(now).millis().max(1);
            drop(s);
            arm_indicator_timer(&cb_ctx, &cb_refs, &cb_state, remaining);
        } else {
            s.indicator_timer_armed = false;
        }
    });
    if result.is_err() {
        state.borrow_mut().indicator_timer_armed = false;
    }
}

/// Wires the hamburger menu to the `Menu` machine.
fn init_menu(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let (Some(toggle), Some(nav_menu)) = (
        ctx.by_id::<HtmlElement>("menuToggle"),
        ctx.by_id::<HtmlElement>("navMenu"),
    ) else {
        return Ok(());
    };

    let menu = Rc::new(RefCell::new(Menu::new()));

    let apply = {
        let ctx = Rc::clone(ctx);
        let toggle = toggle.clone();
        let nav_menu = nav_menu.clone();
        move |fx: MenuEffects| {
            set_class(&toggle, "active", fx.open);
            set_class(&nav_menu, "active", fx.open);
            set_style(
                &ctx.body,
                "overflow",
                if fx.lock_body_scroll { "hidden" } else { "" },
            );
            let _ = toggle.set_attribute(
                "aria-expanded",
                if fx.aria_expanded { "true" } else { "false" },
            );
        }
    };

    let click_menu = Rc::clone(&menu);
    let click_apply = apply.clone();
    listen(&toggle, "click", move |_event| {
        if let Some(fx) = click_menu.borrow_mut().handle(MenuEvent::ToggleActivated) {
            click_apply(fx);
        }
    })?;

    let key_menu = Rc::clone(&menu);
    let key_apply = apply.clone();
    listen(&toggle, "keydown", move |event| {
        let key_event: KeyboardEvent = event.unchecked_into();
        let key = key_event.key();
        if key == "Enter" || key == " " {
            key_event.prevent_default();
            if let Some(fx) = key_menu.borrow_mut().handle(MenuEvent::ToggleActivated) {
                key_apply(fx);
            }
        }
    })?;

    for link in ctx.query_all(".nav-link") {
        let link_menu = Rc::clone(&menu);
        let link_apply = apply.clone();
        listen(&link, "click", move |_event| {
            if let Some(fx) = link_menu.borrow_mut().handle(MenuEvent::LinkActivated) {
                link_apply(fx);
            }
        })?;
    }

    let escape_menu = Rc::clone(&menu);
    let escape_apply = apply.clone();
    listen(&ctx.document, "keydown", move |event| {
        let key_event: KeyboardEvent = event.unchecked_into();
        if key_event.key() == "Escape"
            && let Some(fx) = escape_menu.borrow_mut().handle(MenuEvent::DismissRequested)
        {
            escape_apply(fx);
        }
    })?;

    let outside_menu = Rc::clone(&menu);
    let outside_apply = apply;
    listen(&ctx.document, "click", move |event| {
        let inside = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(".nav-container").ok().flatten())
            .is_some();
        if !inside
            && let Some(fx) = outside_menu.borrow_mut().handle(MenuEvent::OutsidePressed)
        {
            outside_apply(fx);
        }
    })?;

    Ok(())
}
