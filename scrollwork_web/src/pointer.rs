// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-driven cosmetic effects.
//!
//! The trailing custom cursor, magnetic primary buttons, project-card tilt,
//! and the skill-card glow position. All the math lives in
//! [`scrollwork_core::pointer`]; this module samples mouse events and copies
//! the results into CSS transforms and custom properties.
//!
//! The cursor and magnetic buttons require hover capability (they make no
//! sense on touch); tilt and glow are gated on reduced motion only, matching
//! how the page treats them as decoration rather than interaction.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent};

use scrollwork_core::pointer::{CursorFollower, Point, Rect, Tilt, magnetic_offset, tilt_for};

use crate::listen::listen;
use crate::page::{PageContext, set_class, set_style};
use crate::raf::RafLoop;

/// Elements the cursor ring reacts to.
const HOVER_TARGETS: &str = "a, button, .btn, .project-card, .skill-category, .social-icon, \
                             .timeline-tag, .tech-badge, input, textarea";

pub(crate) fn init(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    if !ctx.caps.reduce_motion {
        init_tilt(ctx)?;
        init_skill_glow(ctx)?;
    }
    if ctx.caps.pointer_effects() {
        init_cursor(ctx)?;
        init_magnetic(ctx)?;
    }
    Ok(())
}

fn pointer_of(event: &MouseEvent) -> Point {
    Point {
        x: f64::from(event.client_x()),
        y: f64::from(event.client_y()),
    }
}

fn rect_of(el: &HtmlElement) -> Rect {
    let rect = el.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// Builds the custom cursor and starts its interpolation loop.
fn init_cursor(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let root: HtmlElement = ctx.document.create_element("div")?.unchecked_into();
    root.set_class_name("cursor");
    let dot: HtmlElement = ctx.document.create_element("div")?.unchecked_into();
    dot.set_class_name("cursor-dot");
    let outline: HtmlElement = ctx.document.create_element("div")?.unchecked_into();
    outline.set_class_name("cursor-outline");
    root.append_child(&dot)?;
    root.append_child(&outline)?;
    ctx.body.append_child(&root)?;

    let follower = Rc::new(RefCell::new(CursorFollower::new()));

    let move_follower = Rc::clone(&follower);
    let move_root = root.clone();
    listen(&ctx.document, "mousemove", move |event| {
        let event: MouseEvent = event.unchecked_into();
        move_follower.borrow_mut().set_target(pointer_of(&event));
        set_class(&move_root, "visible", true);
    })?;

    let enter_root = root.clone();
    listen(&ctx.document, "mouseenter", move |_event| {
        set_class(&enter_root, "visible", true);
    })?;
    let leave_root = root.clone();
    listen(&ctx.document, "mouseleave", move |_event| {
        set_class(&leave_root, "visible", false);
    })?;
    let down_root = root.clone();
    listen(&ctx.document, "mousedown", move |_event| {
        set_class(&down_root, "clicking", true);
    })?;
    let up_root = root.clone();
    listen(&ctx.document, "mouseup", move |_event| {
        set_class(&up_root, "clicking", false);
    })?;

    for target in ctx.query_all(HOVER_TARGETS) {
        let hover_root = root.clone();
        listen(&target, "mouseenter", move |_event| {
            set_class(&hover_root, "hovering", true);
        })?;
        let hover_root = root.clone();
        listen(&target, "mouseleave", move |_event| {
            set_class(&hover_root, "hovering", false);
        })?;
    }

    let raf = RafLoop::new(move |_stamp| {
        let (dot_pos, outline_pos) = follower.borrow_mut().advance();
        set_style(&dot, "transform", &follow_transform(dot_pos));
        set_style(&outline, "transform", &follow_transform(outline_pos));
    });
    raf.start();
    // The cursor runs for the life of the page; keep the loop alive.
    core::mem::forget(raf);

    Ok(())
}

fn follow_transform(pos: Point) -> String {
    format!(
        "translate({}px, {}px) translate(-50%, -50%)",
        pos.x, pos.y
    )
}

/// Primary buttons drift toward the pointer while hovered.
fn init_magnetic(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    for button in ctx.query_all(".btn-primary") {
        let Ok(button) = button.dyn_into::<HtmlElement>() else {
            continue;
        };

        // The box is measured on entry, not per move; mid-hover layout
        // shifts are rare and self-correct on the next entry.
        let rect: Rc<Cell<Option<Rect>>> = Rc::new(Cell::new(None));

        let enter_rect = Rc::clone(&rect);
        let enter_button = button.clone();
        listen(&button, "mouseenter", move |_event| {
            enter_rect.set(Some(rect_of(&enter_button)));
        })?;

        let move_rect = Rc::clone(&rect);
        let move_button = button.clone();
        listen(&button, "mousemove", move |event| {
            let Some(rect) = move_rect.get() else {
                return;
            };
            let event: MouseEvent = event.unchecked_into();
            let offset = magnetic_offset(rect, pointer_of(&event));
            set_style(
                &move_button,
                "transform",
                &format!("translate({}px, {}px)", offset.x, offset.y),
            );
        })?;

        let leave_button = button.clone();
        listen(&button, "mouseleave", move |_event| {
            set_style(&leave_button, "transform", "translate(0, 0)");
        })?;
    }
    Ok(())
}

/// Project cards tilt in 3D under the pointer.
fn init_tilt(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    for card in ctx.query_all(".project-card:not(.project-card-placeholder)") {
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            continue;
        };

        let move_card = card.clone();
        listen(&card, "mousemove", move |event| {
            let event: MouseEvent = event.unchecked_into();
            let tilt = tilt_for(rect_of(&move_card), pointer_of(&event));
            set_style(&move_card, "transform", &tilt_transform(tilt));
        })?;

        let leave_card = card.clone();
        listen(&card, "mouseleave", move |_event| {
            set_style(&leave_card, "transform", &tilt_transform(Tilt::NEUTRAL));
        })?;
    }
    Ok(())
}

fn tilt_transform(tilt: Tilt) -> String {
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY({}px)",
        tilt.rotate_x_deg, tilt.rotate_y_deg, tilt.lift_px
    )
}

/// Skill cards expose the pointer position as CSS custom properties, which
/// the stylesheet uses to place a radial highlight.
fn init_skill_glow(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    for category in ctx.query_all(".skill-category") {
        let Ok(category) = category.dyn_into::<HtmlElement>() else {
            continue;
        };

        let move_category = category.clone();
        listen(&category, "mousemove", move |event| {
            let event: MouseEvent = event.unchecked_into();
            let rect = rect_of(&move_category);
            let pointer = pointer_of(&event);
            set_style(
                &move_category,
                "--mouse-x",
                &format!("{}px", pointer.x - rect.left),
            );
            set_style(
                &move_category,
                "--mouse-y",
                &format!("{}px", pointer.y - rect.top),
            );
        })?;
    }
    Ok(())
}
