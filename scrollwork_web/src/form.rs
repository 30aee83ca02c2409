// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact form wiring.
//!
//! The DOM side of the [`ContactForm`] machine: field specs are read off the
//! form's inputs at startup, submit/blur/input listeners feed the machine,
//! and the machine's decisions drive the error markers, the loading state,
//! and the status message. The POST itself runs on
//! [`wasm_bindgen_futures::spawn_local`]; exactly one request can be in
//! flight because the machine refuses a second submit while `Submitting`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Element, Headers, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, RequestInit, Response, Window, console,
};

use scrollwork_core::form::{
    ContactForm, FieldKind, FieldSpec, FormUpdate, MessageKind, RELAY_ENDPOINT, RelayOutcome,
    SubmitDecision,
};

use crate::listen::{listen, set_timeout};
use crate::page::{PageContext, query_all_in, set_class};

/// A form control that participates in validation.
enum FieldEl {
    Input(HtmlInputElement),
    Area(HtmlTextAreaElement),
}

impl FieldEl {
    fn from_element(el: Element) -> Option<Self> {
        match el.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(Self::Input(input)),
            Err(el) => el.dyn_into::<HtmlTextAreaElement>().ok().map(Self::Area),
        }
    }

    fn spec(&self) -> FieldSpec {
        match self {
            Self::Input(input) => FieldSpec {
                name: input.name(),
                kind: if input.type_() == "email" {
                    FieldKind::Email
                } else {
                    FieldKind::Text
                },
                required: input.required(),
            },
            Self::Area(area) => FieldSpec {
                name: area.name(),
                kind: FieldKind::Text,
                required: area.required(),
            },
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Input(input) => input.value(),
            Self::Area(area) => area.value(),
        }
    }

    fn element(&self) -> &Element {
        match self {
            Self::Input(input) => input,
            Self::Area(area) => area,
        }
    }
}

struct FormRefs {
    form: HtmlFormElement,
    fields: Vec<FieldEl>,
    submit_btn: Option<HtmlButtonElement>,
    btn_text: Option<Element>,
    btn_loading: Option<Element>,
    message: Option<HtmlElement>,
}

/// Wires the contact form, if the page has one.
pub(crate) fn init(ctx: &Rc<PageContext>) -> Result<(), JsValue> {
    let Some(form) = ctx.by_id::<HtmlFormElement>("contactForm") else {
        return Ok(());
    };

    let fields: Vec<FieldEl> = query_all_in(&form, "input, textarea")
        .into_iter()
        .filter_map(FieldEl::from_element)
        .collect();
    let submit_btn: Option<HtmlButtonElement> = form
        .query_selector(".submit-btn")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into().ok());
    let (btn_text, btn_loading) = submit_btn.as_ref().map_or((None, None), |btn| {
        (
            btn.query_selector(".btn-text").ok().flatten(),
            btn.query_selector(".btn-loading").ok().flatten(),
        )
    });

    let machine = Rc::new(RefCell::new(ContactForm::new(
        fields.iter().map(FieldEl::spec).collect(),
    )));
    let refs = Rc::new(FormRefs {
        form,
        fields,
        submit_btn,
        btn_text,
        btn_loading,
        message: ctx.by_id::<HtmlElement>("formMessage"),
    });

    for (index, field) in refs.fields.iter().enumerate() {
        let blur_machine = Rc::clone(&machine);
        let blur_refs = Rc::clone(&refs);
        listen(field.element(), "blur", move |_event| {
            let field = &blur_refs.fields[index];
            let ok = blur_machine
                .borrow_mut()
                .field_blurred(index, &field.value());
            set_class(field.element(), "error", !ok);
        })?;

        let input_machine = Rc::clone(&machine);
        let input_refs = Rc::clone(&refs);
        listen(field.element(), "input", move |_event| {
            if input_machine.borrow_mut().field_edited(index) {
                set_class(input_refs.fields[index].element(), "error", false);
            }
        })?;
    }

    let submit_ctx = Rc::clone(ctx);
    let submit_machine = Rc::clone(&machine);
    let submit_refs = Rc::clone(&refs);
    listen(&refs.form, "submit", move |event| {
        event.prevent_default();
        on_submit(&submit_ctx, &submit_machine, &submit_refs);
    })?;

    Ok(())
}

fn on_submit(ctx: &Rc<PageContext>, machine: &Rc<RefCell<ContactForm>>, refs: &Rc<FormRefs>) {
    let values: Vec<String> = refs.fields.iter().map(FieldEl::value).collect();
    let decision = machine.borrow_mut().begin_submit(&values);
    let payload = match decision {
        SubmitDecision::Busy => return,
        SubmitDecision::Invalid { .. } => {
            sync_error_markers(machine, refs);
            return;
        }
        SubmitDecision::Submit { payload } => {
            sync_error_markers(machine, refs);
            payload
        }
    };

    set_loading(refs, true);

    let mut body = serde_json::Map::new();
    for (name, value) in payload {
        body.insert(name, serde_json::Value::String(value));
    }
    let body = serde_json::Value::Object(body).to_string();

    let task_ctx = Rc::clone(ctx);
    let task_machine = Rc::clone(machine);
    let task_refs = Rc::clone(refs);
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = post_payload(&task_ctx.window, &body).await;
        let update = task_machine.borrow_mut().finish_submit(outcome);
        set_loading(&task_refs, false);
        apply_update(&task_ctx, &task_refs, update);
    });
}

/// Mirrors the machine's per-field error markers into the DOM.
fn sync_error_markers(machine: &Rc<RefCell<ContactForm>>, refs: &FormRefs) {
    let machine = machine.borrow();
    for (index, field) in refs.fields.iter().enumerate() {
        set_class(field.element(), "error", machine.has_error(index));
    }
}

fn set_loading(refs: &FormRefs, loading: bool) {
    if let Some(btn) = &refs.submit_btn {
        btn.set_disabled(loading);
    }
    if let Some(text) = &refs.btn_text {
        set_class(text, "hidden", loading);
    }
    if let Some(spinner) = &refs.btn_loading {
        set_class(spinner, "hidden", !loading);
    }
}

fn apply_update(ctx: &Rc<PageContext>, refs: &Rc<FormRefs>, update: FormUpdate) {
    if update.clear_fields {
        refs.form.reset();
    }
    let Some(message) = &refs.message else {
        return;
    };
    message.set_text_content(Some(&update.message));
    message.set_class_name(match update.kind {
        MessageKind::Success => "form-message success",
        MessageKind::Error => "form-message error",
    });

    if let Some(dismiss) = update.dismiss_after {
        let dismiss_refs = Rc::clone(refs);
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_possible_wrap,
            reason = "the dismiss delay is a few seconds"
        )]
        let delay = dismiss.millis() as i32;
        let _ = set_timeout(&ctx.window, delay, move || {
            if let Some(message) = &dismiss_refs.message {
                set_class(message, "hidden", true);
            }
        });
    }
}

/// POSTs the JSON payload to the relay and classifies the result.
///
/// Any path that does not produce a well-formed JSON response is a transport
/// failure; a well-formed response decides delivered-vs-rejected via its
/// `success` flag and `message` text.
async fn post_payload(window: &Window, body: &str) -> RelayOutcome {
    let Ok(headers) = Headers::new() else {
        return RelayOutcome::TransportFailed;
    };
    if headers.set("Content-Type", "application/json").is_err()
        || headers.set("Accept", "application/json").is_err()
    {
        return RelayOutcome::TransportFailed;
    }
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(headers.as_ref());
    init.set_body(&JsValue::from_str(body));

    let response = match JsFuture::from(window.fetch_with_str_and_init(RELAY_ENDPOINT, &init)).await
    {
        Ok(value) => value,
        Err(err) => {
            console::error_2(&JsValue::from_str("contact form: request failed"), &err);
            return RelayOutcome::TransportFailed;
        }
    };
    let Ok(response) = response.dyn_into::<Response>() else {
        return RelayOutcome::TransportFailed;
    };
    let http_ok = response.ok();

    let Ok(text_promise) = response.text() else {
        return RelayOutcome::TransportFailed;
    };
    let text = match JsFuture::from(text_promise).await {
        Ok(value) => value.as_string().unwrap_or_default(),
        Err(err) => {
            console::error_2(&JsValue::from_str("contact form: unreadable response"), &err);
            return RelayOutcome::TransportFailed;
        }
    };
    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&text) else {
        return RelayOutcome::TransportFailed;
    };

    let delivered = parsed
        .get("success")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);
    if http_ok && delivered {
        RelayOutcome::Delivered
    } else {
        RelayOutcome::Rejected {
            message: parsed
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
        }
    }
}
