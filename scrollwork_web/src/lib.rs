// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser glue for Scrollwork.
//!
//! This crate wires the state machines in [`scrollwork_core`] to a real
//! page:
//!
//! - [`init_page`]: one-shot startup that wires every behavior
//! - [`RafLoop`]: `requestAnimationFrame` tick source for the cursor
//!
//! Startup builds a single page context (window, document, body, capability
//! snapshot) and hands it to each component's `init`. Components
//! find their elements by the page's structural IDs and classes; a page
//! without a given element simply doesn't get that behavior.
//!
//! Everything registered here lives for the life of the page. Listeners and
//! the cursor's frame loop are leaked deliberately; navigation is the only
//! teardown.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

mod anchors;
mod extras;
mod form;
mod listen;
mod navbar;
mod page;
mod pointer;
mod raf;
mod reveal;

pub use raf::{FrameStamp, RafLoop, now};

use page::PageContext;

/// Wires every page behavior against the current document.
///
/// Call once, after the DOM is parsed. [`main`] does this automatically when
/// the module is loaded as the page's entry point.
pub fn init_page() -> Result<(), JsValue> {
    let ctx = Rc::new(PageContext::acquire()?);

    navbar::init(&ctx)?;
    anchors::init(&ctx)?;
    form::init(&ctx)?;

    let split_headings = extras::split_text(&ctx)?;
    reveal::init(&ctx, split_headings)?;

    pointer::init(&ctx)?;
    extras::init(&ctx)?;
    Ok(())
}

/// Module entry point: runs [`init_page`] once the DOM is parsed.
///
/// # Errors
///
/// Fails when the global window or document is missing, or when initial DOM
/// wiring fails; deferred initialization logs instead, since there is no
/// caller left to return to.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        listen::listen(&document, "DOMContentLoaded", move |_event| {
            if let Err(err) = init_page() {
                web_sys::console::error_2(&JsValue::from_str("scrollwork: init failed"), &err);
            }
        })?;
    } else {
        init_page()?;
    }
    Ok(())
}
