// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-level odds and ends.
//!
//! The load-complete flourish, lazy-image promotion, split-text heading
//! preparation, footer year stamping, and the console banner. None of these
//! hold state past startup except the handful of timers and the lazy-image
//! fallback observer.

use std::rc::Rc;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlElement, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    console,
};

use scrollwork_core::pointer::split_char_delay_ms;
use scrollwork_core::viewport::PAGE_LOADED_DELAY;

use crate::listen::{listen, set_timeout};
use crate::page::{PageContext, set_class, set_style};

pub(crate) fn init(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    init_page_loaded(ctx)?;
    init_lazy_images(ctx)?;
    stamp_year(ctx);
    console_banner();
    Ok(())
}

/// Adds the `loaded` class shortly after the page finishes loading, so the
/// stylesheet can run its entrance transitions against settled layout.
fn init_page_loaded(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    if ctx.document.ready_state() == "complete" {
        arm_loaded_timer(ctx)?;
    } else {
        let load_ctx = Rc::clone(ctx);
        listen(&ctx.window, "load", move |_event| {
            let _ = arm_loaded_timer(&load_ctx);
        })?;
    }
    Ok(())
}

fn arm_loaded_timer(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let body = ctx.body.clone();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "the load flourish delay is 100ms"
    )]
    let delay = PAGE_LOADED_DELAY.millis() as i32;
    set_timeout(&ctx.window, delay, move || {
        set_class(&body, "loaded", true);
    })
}

/// Promotes `data-src` images. Browsers with native lazy loading get their
/// real `src` immediately and the browser does the deferring; otherwise an
/// observer swaps each image in as it approaches the viewport.
fn init_lazy_images(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    if supports_native_lazy(ctx) {
        for img in ctx.query_all(r#"img[loading="lazy"]"#) {
            if let Ok(img) = img.dyn_into::<HtmlImageElement>()
                && let Some(src) = img.dataset().get("src")
            {
                img.set_src(&src);
            }
        }
        return Ok(());
    }

    let images = ctx.query_all("img[data-src]");
    if images.is_empty() {
        return Ok(());
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Some(img) = target.dyn_ref::<HtmlImageElement>()
                    && let Some(src) = img.dataset().get("src")
                {
                    img.set_src(&src);
                    let _ = img.remove_attribute("data-src");
                }
                observer.unobserve(&target);
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);
    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    callback.forget();

    for img in &images {
        observer.observe(img);
    }
    Ok(())
}

/// Checks for `loading` on `HTMLImageElement.prototype`.
fn supports_native_lazy(ctx: &PageContext) -> bool {
    let Ok(ctor) = js_sys::Reflect::get(ctx.window.as_ref(), &JsValue::from_str("HTMLImageElement"))
    else {
        return false;
    };
    let Ok(proto) = js_sys::Reflect::get(&ctor, &JsValue::from_str("prototype")) else {
        return false;
    };
    js_sys::Reflect::has(&proto, &JsValue::from_str("loading")).unwrap_or(false)
}

/// Rebuilds each `[data-split-text]` heading as per-character spans with a
/// cascading transition delay, and returns the headings so the reveal wiring
/// can watch them. Skipped entirely (returning no headings) without hover
/// capability or under reduced motion.
pub(crate) fn split_text(ctx: &PageContext) -> Result<Vec<Element>, JsValue> {
    if !ctx.caps.pointer_effects() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    for heading in ctx.query_all("[data-split-text]") {
        let text = heading.text_content().unwrap_or_default();
        heading.set_inner_html("");
        set_class(&heading, "split-text", true);

        for (index, ch) in text.chars().enumerate() {
            let span: HtmlElement = ctx.document.create_element("span")?.unchecked_into();
            span.set_class_name("char");
            // Plain spaces collapse inside inline-block spans.
            let ch = if ch == ' ' { '\u{00a0}' } else { ch };
            span.set_text_content(Some(&ch.to_string()));
            set_style(
                &span,
                "transition-delay",
                &format!("{}s", split_char_delay_ms(index) / 1000.0),
            );
            heading.append_child(&span)?;
        }
        out.push(heading);
    }
    Ok(out)
}

/// Writes the current year into every `.current-year` element.
fn stamp_year(ctx: &PageContext) {
    let year = js_sys::Date::new_0().get_full_year();
    for el in ctx.query_all(".current-year") {
        el.set_text_content(Some(&year.to_string()));
    }
}

/// Styled greeting for anyone who opens the console.
fn console_banner() {
    const TITLE: &str =
        "font-size: 24px; font-weight: bold; color: #0A0A0A; font-family: Georgia, serif;";
    const SUBTITLE: &str =
        "font-size: 14px; color: #525252; font-family: -apple-system, sans-serif;";
    const DETAIL: &str = "font-size: 12px; color: #8A8A8A; font-family: -apple-system, sans-serif;";

    let line = |text: &str, style: &str| {
        console::log_2(
            &JsValue::from_str(&format!("%c{text}")),
            &JsValue::from_str(style),
        );
    };
    line("HELLO.", TITLE);
    line("Full-Stack Developer", SUBTITLE);
    line("", "");
    line("Built with HTML, CSS & WebAssembly", DETAIL);
    line("No frameworks, just clean code.", DETAIL);
    line("", "");
    line("Interested in collaborating? Get in touch!", SUBTITLE);
}
