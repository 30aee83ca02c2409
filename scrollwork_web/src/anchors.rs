// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-page anchor navigation.
//!
//! Fragment links (`a[href^="#"]`) scroll to their target section with the
//! navbar height and a fixed gap subtracted, so headings land below the
//! fixed navbar instead of underneath it. The logo scrolls back to the top
//! and resets the URL hash.
//!
//! Smooth scrolling degrades to an instant jump under
//! `prefers-reduced-motion`.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use scrollwork_core::viewport::anchor_target;

use crate::listen::listen;
use crate::page::PageContext;

/// Wires every fragment link and the logo.
pub(crate) fn init(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    for anchor in ctx.query_all(r##"a[href^="#"]"##) {
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        let click_ctx = Rc::clone(ctx);
        listen(&anchor, "click", move |event| {
            event.prevent_default();
            scroll_to_fragment(&click_ctx, &href);
        })?;
    }

    for logo in ctx.query_all(".logo") {
        let click_ctx = Rc::clone(ctx);
        listen(&logo, "click", move |event| {
            event.prevent_default();
            scroll_to(&click_ctx, 0.0);
            if let Ok(path) = click_ctx.window.location().pathname() {
                push_url(&click_ctx, &path);
            }
        })?;
    }

    Ok(())
}

fn scroll_to_fragment(ctx: &PageContext, fragment: &str) {
    // A bare "#" means "top of page".
    if fragment == "#" {
        scroll_to(ctx, 0.0);
        return;
    }
    let Some(target) = ctx.by_id::<HtmlElement>(&fragment[1..]) else {
        return;
    };
    let navbar_height = ctx
        .by_id::<HtmlElement>("navbar")
        .map_or(0.0, |navbar| f64::from(navbar.offset_height()));
    let top = anchor_target(f64::from(target.offset_top()), navbar_height);
    scroll_to(ctx, top);
}

fn scroll_to(ctx: &PageContext, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(if ctx.caps.smooth_scrolling() {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    });
    ctx.window.scroll_to_with_scroll_to_options(&options);
}

fn push_url(ctx: &PageContext, url: &str) {
    if let Ok(history) = ctx.window.history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
    }
}
