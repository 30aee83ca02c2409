// Copyright 2026 the Scrollwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact form submission flow.
//!
//! The [`ContactForm`] machine owns the full submit lifecycle:
//!
//! ```text
//!   Idle ──begin_submit──► (validate) ──any field invalid──► Idle + markers
//!                              │
//!                              ▼ all valid
//!                         Submitting ──finish_submit──► Idle + FormUpdate
//! ```
//!
//! Validation never touches the network: a submission with any invalid field
//! is rejected before a request exists. While `Submitting`, further submit
//! attempts are refused — the web layer also disables the submit control, so
//! at most one request is ever in flight. Every outcome path ends back in
//! `Idle` with the control re-enabled; there is no retry logic.
//!
//! Error markers are per-field and optimistic: editing an errored field
//! clears its marker immediately, and re-validation waits for the next blur
//! or submit.

use alloc::string::String;
use alloc::vec::Vec;

use crate::time::Duration;

/// The relay endpoint the payload is posted to.
pub const RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// How long the success message stays up before it self-dismisses.
pub const SUCCESS_DISMISS: Duration = Duration::from_millis(6000);

/// Shown when the relay confirms delivery.
pub const SUCCESS_TEXT: &str = "Message sent successfully! I'll get back to you soon.";

/// Shown when the relay rejects the submission without its own message.
pub const REJECTED_FALLBACK_TEXT: &str = "Something went wrong. Please try again.";

/// Shown when the request never completed (network or parse failure).
pub const CONNECTION_ERROR_TEXT: &str =
    "Connection error. Please check your internet and try again.";

/// How a field's value is validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; only the `required` rule applies.
    Text,
    /// Must look like `local@domain.tld` when non-empty.
    Email,
}

/// Static description of one form field, read from the DOM at startup.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    /// The field's `name` attribute, used as the payload key.
    pub name: String,
    /// Validation rule for the field's value.
    pub kind: FieldKind,
    /// Whether an empty (after trimming) value blocks submission.
    pub required: bool,
}

/// Returns whether `value` passes the email shape check.
///
/// The accepted shape is the usual permissive one: ASCII only, no whitespace,
/// exactly one `@`, and a `.` somewhere strictly inside the part after the
/// `@`. This is a plausibility filter, not RFC 5322.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    if !value.is_ascii() || value.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.len() < 3 {
        return false;
    }
    domain[1..domain.len() - 1].contains('.')
}

/// Validates one field value against its spec. Values are trimmed first;
/// the email rule only applies to non-empty values.
#[must_use]
pub fn field_is_valid(spec: &FieldSpec, value: &str) -> bool {
    let value = value.trim();
    if spec.required && value.is_empty() {
        return false;
    }
    match spec.kind {
        FieldKind::Text => true,
        FieldKind::Email => value.is_empty() || is_valid_email(value),
    }
}

/// Phase of the submission machine.
///
/// Validation and outcome handling are transient: they begin and end within
/// a single [`begin_submit`] or [`finish_submit`] call, so only the states
/// that persist across turns of the event loop are represented.
///
/// [`begin_submit`]: ContactForm::begin_submit
/// [`finish_submit`]: ContactForm::finish_submit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// No submission in progress; the submit control is enabled.
    #[default]
    Idle,
    /// A request is in flight; the submit control is disabled.
    Submitting,
}

/// What [`ContactForm::begin_submit`] decided.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitDecision {
    /// Validation failed; the listed field indices get error markers and no
    /// request is issued.
    Invalid {
        /// Indices into the field list, in field order.
        fields: Vec<usize>,
    },
    /// A submission is already in flight; ignore this attempt.
    Busy,
    /// Validation passed; POST `payload` to [`RELAY_ENDPOINT`].
    Submit {
        /// Field `name → value` pairs, in field order, untrimmed.
        payload: Vec<(String, String)>,
    },
}

/// How the relay request concluded, as observed by the web layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    /// HTTP success and the response body's success flag was true.
    Delivered,
    /// A well-formed response said no, optionally with its own message.
    Rejected {
        /// Server-provided failure text, if any.
        message: Option<String>,
    },
    /// The request rejected or the response body was unreadable.
    TransportFailed,
}

/// Style of user-visible status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// Delivery confirmation; self-dismisses.
    Success,
    /// Anything recoverable; stays up until the next attempt.
    Error,
}

/// DOM-facing result of a finished submission.
#[derive(Clone, Debug, PartialEq)]
pub struct FormUpdate {
    /// The status line to show.
    pub message: String,
    /// Whether to style it as success or error.
    pub kind: MessageKind,
    /// Whether to clear every field (delivery only; failures keep the
    /// entered values for correction).
    pub clear_fields: bool,
    /// When set, hide the message again after this long.
    pub dismiss_after: Option<Duration>,
}

/// The contact form submission machine.
#[derive(Debug)]
pub struct ContactForm {
    fields: Vec<FieldSpec>,
    errored: Vec<bool>,
    phase: FormPhase,
}

impl ContactForm {
    /// Creates a machine over the given field list (DOM order).
    #[must_use]
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        let errored = alloc::vec![false; fields.len()];
        Self {
            fields,
            errored,
            phase: FormPhase::Idle,
        }
    }

    /// Returns the field specs, in the order indices refer to.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Returns whether the field currently carries an error marker.
    #[must_use]
    pub fn has_error(&self, field: usize) -> bool {
        self.errored.get(field).copied().unwrap_or(false)
    }

    /// A submit attempt with the current field values (DOM order).
    ///
    /// Validates every field. On failure the machine stays `Idle`, the
    /// failing fields are marked, and no payload is produced. On success the
    /// machine enters `Submitting` and hands back the payload to POST.
    pub fn begin_submit(&mut self, values: &[String]) -> SubmitDecision {
        if self.phase == FormPhase::Submitting {
            return SubmitDecision::Busy;
        }

        let mut invalid = Vec::new();
        for (index, spec) in self.fields.iter().enumerate() {
            let value = values.get(index).map_or("", String::as_str);
            let ok = field_is_valid(spec, value);
            self.errored[index] = !ok;
            if !ok {
                invalid.push(index);
            }
        }
        if !invalid.is_empty() {
            return SubmitDecision::Invalid { fields: invalid };
        }

        self.phase = FormPhase::Submitting;
        let payload = self
            .fields
            .iter()
            .zip(values)
            .map(|(spec, value)| (spec.name.clone(), value.clone()))
            .collect();
        SubmitDecision::Submit { payload }
    }

    /// The in-flight request concluded; maps the outcome to a status message
    /// and returns the machine to `Idle`.
    pub fn finish_submit(&mut self, outcome: RelayOutcome) -> FormUpdate {
        self.phase = FormPhase::Idle;
        match outcome {
            RelayOutcome::Delivered => FormUpdate {
                message: String::from(SUCCESS_TEXT),
                kind: MessageKind::Success,
                clear_fields: true,
                dismiss_after: Some(SUCCESS_DISMISS),
            },
            RelayOutcome::Rejected { message } => FormUpdate {
                message: message.unwrap_or_else(|| String::from(REJECTED_FALLBACK_TEXT)),
                kind: MessageKind::Error,
                clear_fields: false,
                dismiss_after: None,
            },
            RelayOutcome::TransportFailed => FormUpdate {
                message: String::from(CONNECTION_ERROR_TEXT),
                kind: MessageKind::Error,
                clear_fields: false,
                dismiss_after: None,
            },
        }
    }

    /// A keystroke landed in the field; clears its error marker if set.
    ///
    /// Returns `true` when a marker was cleared (the DOM class needs
    /// removing).
    pub fn field_edited(&mut self, field: usize) -> bool {
        match self.errored.get_mut(field) {
            Some(marker) if *marker => {
                *marker = false;
                true
            }
            _ => false,
        }
    }

    /// The field lost focus; re-validates it in isolation.
    ///
    /// Returns whether the value is valid, updating the error marker either
    /// way.
    pub fn field_blurred(&mut self, field: usize, value: &str) -> bool {
        let Some(spec) = self.fields.get(field) else {
            return true;
        };
        let ok = field_is_valid(spec, value);
        if let Some(marker) = self.errored.get_mut(field) {
            *marker = !ok;
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;
    use alloc::vec;

    use super::*;

    fn contact_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec {
                name: "name".to_string(),
                kind: FieldKind::Text,
                required: true,
            },
            FieldSpec {
                name: "email".to_string(),
                kind: FieldKind::Email,
                required: true,
            },
            FieldSpec {
                name: "message".to_string(),
                kind: FieldKind::Text,
                required: true,
            },
            FieldSpec {
                name: "access_key".to_string(),
                kind: FieldKind::Text,
                required: false,
            },
        ]
    }

    fn values(name: &str, email: &str, message: &str) -> Vec<String> {
        vec![
            name.to_string(),
            email.to_string(),
            message.to_string(),
            "relay-key-1234".to_string(),
        ]
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.domain.io"));

        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"), "no dot after @");
        assert!(!is_valid_email("a@b."), "dot must not be last");
        assert!(!is_valid_email("a@.b"), "dot must not follow @");
        assert!(!is_valid_email("@b.com"), "empty local part");
        assert!(!is_valid_email("a b@c.com"), "whitespace");
        assert!(!is_valid_email("a@b@c.com"), "two @");
        assert!(!is_valid_email("\u{e9}@b.com"), "non-ASCII");
    }

    #[test]
    fn required_field_blocks_submission() {
        let mut form = ContactForm::new(contact_fields());
        let decision = form.begin_submit(&values("", "a@b.com", "hi"));
        assert_eq!(decision, SubmitDecision::Invalid { fields: vec![0] });
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(form.has_error(0));
        assert!(!form.has_error(1));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut form = ContactForm::new(contact_fields());
        let decision = form.begin_submit(&values("   ", "a@b.com", "\t\n"));
        assert_eq!(
            decision,
            SubmitDecision::Invalid { fields: vec![0, 2] },
            "trimmed-empty required fields fail"
        );
    }

    #[test]
    fn malformed_email_blocks_submission() {
        let mut form = ContactForm::new(contact_fields());
        let decision = form.begin_submit(&values("A", "not-an-email", "hi"));
        assert_eq!(decision, SubmitDecision::Invalid { fields: vec![1] });
    }

    #[test]
    fn valid_input_produces_one_payload() {
        let mut form = ContactForm::new(contact_fields());
        let decision = form.begin_submit(&values("A", "a@b.com", "hi"));
        let SubmitDecision::Submit { payload } = decision else {
            panic!("expected Submit, got {decision:?}");
        };
        assert_eq!(payload.len(), 4);
        assert_eq!(payload[0], ("name".to_string(), "A".to_string()));
        assert_eq!(payload[3].0, "access_key");
        assert_eq!(form.phase(), FormPhase::Submitting);

        // Double-submit while in flight is refused.
        assert_eq!(
            form.begin_submit(&values("A", "a@b.com", "hi")),
            SubmitDecision::Busy
        );
    }

    #[test]
    fn delivery_clears_fields_and_self_dismisses() {
        let mut form = ContactForm::new(contact_fields());
        form.begin_submit(&values("A", "a@b.com", "hi"));
        let update = form.finish_submit(RelayOutcome::Delivered);
        assert_eq!(update.kind, MessageKind::Success);
        assert_eq!(update.message, SUCCESS_TEXT);
        assert!(update.clear_fields);
        assert_eq!(update.dismiss_after, Some(SUCCESS_DISMISS));
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[test]
    fn rejection_keeps_fields_and_prefers_server_text() {
        let mut form = ContactForm::new(contact_fields());
        form.begin_submit(&values("A", "a@b.com", "hi"));
        let update = form.finish_submit(RelayOutcome::Rejected {
            message: Some("X".to_string()),
        });
        assert_eq!(update.message, "X");
        assert_eq!(update.kind, MessageKind::Error);
        assert!(!update.clear_fields);
        assert_eq!(update.dismiss_after, None);

        // Fallback text when the server sends none.
        form.begin_submit(&values("A", "a@b.com", "hi"));
        let update = form.finish_submit(RelayOutcome::Rejected { message: None });
        assert_eq!(update.message, REJECTED_FALLBACK_TEXT);
    }

    #[test]
    fn transport_failure_shows_generic_message() {
        let mut form = ContactForm::new(contact_fields());
        form.begin_submit(&values("A", "a@b.com", "hi"));
        let update = form.finish_submit(RelayOutcome::TransportFailed);
        assert_eq!(update.message, CONNECTION_ERROR_TEXT);
        assert!(!update.clear_fields);
        assert_eq!(form.phase(), FormPhase::Idle, "form is usable again");
    }

    #[test]
    fn editing_clears_markers_blur_restores_them() {
        let mut form = ContactForm::new(contact_fields());
        form.begin_submit(&values("", "bad", "hi"));
        assert!(form.has_error(0) && form.has_error(1));

        assert!(form.field_edited(1), "keystroke clears the marker");
        assert!(!form.has_error(1));
        assert!(!form.field_edited(1), "already clear");

        assert!(!form.field_blurred(1, "still-bad"));
        assert!(form.has_error(1));
        assert!(form.field_blurred(1, "good@addr.net"));
        assert!(!form.has_error(1));
    }
}
