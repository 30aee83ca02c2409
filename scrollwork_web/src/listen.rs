// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event-listener registration.
//!
//! Every listener on the page lives as long as the page, so registration
//! leaks its closure intentionally (`Closure::forget`), the same way the
//! frame loop leaks its tick closure. There is no unbind path — navigation
//! is the only teardown.

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

/// Registers a page-lifetime listener for `kind` events on `target`.
pub(crate) fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Arms a `setTimeout` callback; the closure leaks, which is fine for the
/// handful of fire-once timers the page arms.
pub(crate) fn set_timeout(
    window: &web_sys::Window,
    delay_ms: i32,
    handler: impl FnOnce() + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::once(handler);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    )?;
    closure.forget();
    Ok(())
}
