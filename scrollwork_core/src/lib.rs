// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-interaction state machines for the Scrollwork behavior layer.
//!
//! `scrollwork_core` holds every decision the page makes — which CSS state a
//! widget should be in, which element reveals next, whether a form submission
//! may leave the page — as pure state machines over explicit timestamps. It is
//! `no_std` compatible (with `alloc`) and has no browser types anywhere, so
//! the whole crate tests natively.
//!
//! # Architecture
//!
//! The crate is organized around an event loop that turns raw browser events
//! into DOM mutation commands:
//!
//! ```text
//!   Backend (event source: scroll / pointer / intersection / submit)
//!       │
//!       ▼
//!   rate gates ──► signal & widget machines ──► mutation commands
//!   (throttle,     (viewport, reveal, menu,     (class flips, style
//!    debounce)      form, pointer)               values, messages)
//! ```
//!
//! **[`time`]** — Millisecond [`Instant`](time::Instant) and
//! [`Duration`](time::Duration), matching `performance.now()` resolution.
//!
//! **[`rate`]** — Leading-edge throttle and trailing-edge debounce gates that
//! bound how often scroll handlers run.
//!
//! **[`viewport`]** — Derived scroll signals: navbar threshold, progress
//! percentage, active section, smooth-scroll targets.
//!
//! **[`reveal`]** — One-shot reveal scheduler. Each watched element moves
//! `Pending → Scheduled → Revealed` exactly once and never reverts.
//!
//! **[`form`]** — Contact form machine: local validation, a single in-flight
//! submission, and outcome-to-message mapping.
//!
//! **[`menu`]** — Mobile menu as an explicit two-state machine with a single
//! transition function.
//!
//! **[`pointer`]** — Interpolation math for the trailing cursor, magnetic
//! buttons, and card tilt.
//!
//! **[`capability`]** — Hover and reduced-motion gating for the cosmetic
//! components.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod capability;
pub mod form;
pub mod menu;
pub mod pointer;
pub mod rate;
pub mod reveal;
pub mod time;
pub mod viewport;
