// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page context.
//!
//! [`PageContext`] is built once at startup and passed to every component's
//! initializer. It owns the window/document handles and the capability
//! snapshot, so nothing else in the crate does ambient `window()` lookups or
//! re-runs media queries.
//!
//! The DOM itself is the configuration surface: components find their
//! elements through the context by the page's structural IDs and classes
//! (`navbar`, `menuToggle`, `contactForm`, …) and dataset annotations
//! (`data-aos`, `data-split-text`, …). A missing element disables its
//! component rather than failing startup.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

use scrollwork_core::capability::Capabilities;

/// Singleton handles and capabilities, constructed once.
pub(crate) struct PageContext {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) body: HtmlElement,
    pub(crate) caps: Capabilities,
}

impl PageContext {
    /// Acquires the window, document, and body, and runs the two capability
    /// media queries.
    pub(crate) fn acquire() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;

        let caps = Capabilities {
            hover: media_matches(&window, "(hover: hover)"),
            reduce_motion: media_matches(&window, "(prefers-reduced-motion: reduce)"),
        };

        Ok(Self {
            window,
            document,
            body,
            caps,
        })
    }

    /// Looks up an element by id, cast to the expected type.
    pub(crate) fn by_id<T: JsCast>(&self, id: &str) -> Option<T> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into().ok())
    }

    /// Collects every element matching a selector.
    pub(crate) fn query_all(&self, selector: &str) -> Vec<Element> {
        collect_elements(self.document.query_selector_all(selector))
    }
}

/// [`PageContext::query_all`] scoped to one element's subtree.
pub(crate) fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    collect_elements(root.query_selector_all(selector))
}

fn collect_elements(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
    let mut out = Vec::new();
    if let Ok(list) = list {
        for i in 0..list.length() {
            if let Some(node) = list.item(i)
                && let Ok(el) = node.dyn_into::<Element>()
            {
                out.push(el);
            }
        }
    }
    out
}

/// Runs a media query once; an unsupported query reads as "no match".
fn media_matches(window: &Window, query: &str) -> bool {
    matches!(window.match_media(query), Ok(Some(mql)) if mql.matches())
}

/// Adds or removes a class, ignoring the (effectively infallible) DOM error.
pub(crate) fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

/// Sets an inline style property, ignoring the DOM error.
pub(crate) fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}
