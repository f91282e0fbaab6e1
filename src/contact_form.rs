//! Contact form: browser constraint validation with inline errors, and
//! submission of the form data to the form's `action` endpoint.

use crate::config::{
    ContactFormIds, FIELD_ERROR_SELECTOR, INVALID_FIELD_CLASS, LOADING_CLASS, MSG_FIX_FIELDS,
    MSG_NETWORK, MSG_REJECTED, MSG_SENT,
};
use crate::dom::{apply_feedback, by_id, js_error_message, listen, set_class, Listener};
use crate::utils::Feedback;
use crate::MountError;
use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use log::{debug, info, warn};
use serde::Deserialize;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlTextAreaElement,
};

/// How a submission attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Sent,
    Rejected { status: u16 },
    NetworkError,
}

impl SubmissionOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            SubmissionOutcome::Sent
        } else {
            SubmissionOutcome::Rejected { status }
        }
    }

    pub fn feedback(&self) -> Feedback {
        match self {
            SubmissionOutcome::Sent => Feedback::success(MSG_SENT),
            SubmissionOutcome::Rejected { .. } => Feedback::error(MSG_REJECTED),
            SubmissionOutcome::NetworkError => Feedback::error(MSG_NETWORK),
        }
    }

    /// Only a successful send clears what the visitor typed.
    pub fn resets_form(&self) -> bool {
        matches!(self, SubmissionOutcome::Sent)
    }
}

/// JSON body returned by the form endpoint. Informational only.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct SubmissionReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn parse_reply(body: &str) -> Option<SubmissionReply> {
    serde_json::from_str(body).ok()
}

/// Form-level message after validation, if any field failed.
pub fn validation_summary(invalid_fields: usize) -> Option<Feedback> {
    (invalid_fields > 0).then(|| Feedback::error(MSG_FIX_FIELDS))
}

/// A form control that takes part in validation.
enum Field {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl Field {
    fn from_element(element: Element) -> Option<Self> {
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(Field::Input(input)),
            Err(element) => element
                .dyn_into::<HtmlTextAreaElement>()
                .ok()
                .map(Field::TextArea),
        }
    }

    fn element(&self) -> &HtmlElement {
        match self {
            Field::Input(input) => input,
            Field::TextArea(area) => area,
        }
    }

    fn check_validity(&self) -> bool {
        match self {
            Field::Input(input) => input.check_validity(),
            Field::TextArea(area) => area.check_validity(),
        }
    }

    fn validation_message(&self) -> String {
        let message = match self {
            Field::Input(input) => input.validation_message(),
            Field::TextArea(area) => area.validation_message(),
        };
        message.unwrap_or_default()
    }

    fn error_slot(&self) -> Option<Element> {
        self.element()
            .parent_element()?
            .query_selector(FIELD_ERROR_SELECTOR)
            .ok()
            .flatten()
    }

    fn show_error(&self) {
        if let Some(slot) = self.error_slot() {
            slot.set_text_content(Some(&self.validation_message()));
        }
        set_class(self.element(), INVALID_FIELD_CLASS, true);
    }

    fn clear_error(&self) {
        if let Some(slot) = self.error_slot() {
            slot.set_text_content(Some(""));
        }
        set_class(self.element(), INVALID_FIELD_CLASS, false);
    }
}

/// Validate every input and textarea, updating their inline errors.
/// Returns how many failed.
fn validate_form(form: &HtmlFormElement) -> usize {
    let controls = form.elements();
    (0..controls.length())
        .filter_map(|i| controls.item(i))
        .filter_map(Field::from_element)
        .filter(|field| {
            let valid = field.check_validity();
            if valid {
                field.clear_error();
            } else {
                field.show_error();
            }
            !valid
        })
        .count()
}

fn set_busy(button: Option<&HtmlButtonElement>, busy: bool) {
    if let Some(button) = button {
        set_class(button, LOADING_CLASS, busy);
        button.set_disabled(busy);
    }
}

async fn submit(form: &HtmlFormElement, timeout_ms: u32) -> SubmissionOutcome {
    let body = match FormData::new_with_form(form) {
        Ok(body) => body,
        Err(e) => {
            warn!("Could not collect form data: {}", js_error_message(e));
            return SubmissionOutcome::NetworkError;
        }
    };
    let action = form.action();
    let request = match Request::post(&action).body(body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Could not build request to {}: {}", action, e);
            return SubmissionOutcome::NetworkError;
        }
    };

    let send = request.send();
    let timeout = TimeoutFuture::new(timeout_ms);
    futures::pin_mut!(send, timeout);
    let response = match select(send, timeout).await {
        Either::Left((Ok(response), _)) => response,
        Either::Left((Err(e), _)) => {
            warn!("Form submission failed: {}", e);
            return SubmissionOutcome::NetworkError;
        }
        Either::Right(_) => {
            warn!("Form submission timed out after {}ms", timeout_ms);
            return SubmissionOutcome::NetworkError;
        }
    };

    let outcome = SubmissionOutcome::from_status(response.status());
    info!("Contact form submission: {:?}", outcome);
    // The body read is untimed, so it runs detached from the outcome.
    wasm_bindgen_futures::spawn_local(log_reply(response));
    outcome
}

async fn log_reply(response: Response) {
    match response.text().await.ok().as_deref().and_then(parse_reply) {
        Some(reply) => debug!(
            "Form endpoint replied success={:?} message={:?}",
            reply.success, reply.message
        ),
        None => debug!("Form endpoint reply was not JSON"),
    }
}

/// Wire the contact form. Returns no listeners when the page has no form
/// and no live-validated fields.
pub fn mount_contact_form(
    document: &Document,
    ids: &ContactFormIds,
    timeout_ms: u32,
) -> Result<Vec<Listener>, MountError> {
    let mut listeners = Vec::new();

    for id in &ids.live_fields {
        let Some(element) = document.get_element_by_id(id) else {
            continue;
        };
        let target = element.clone();
        let Some(field) = Field::from_element(element) else {
            continue;
        };
        listeners.push(listen(&target, "input", move |_| {
            if field.check_validity() {
                field.clear_error();
            }
        })?);
    }

    let (Some(form), Some(feedback)) = (
        by_id::<HtmlFormElement>(document, &ids.form),
        by_id::<HtmlElement>(document, &ids.feedback),
    ) else {
        debug!("Contact form markup missing, submit handler not wired");
        return Ok(listeners);
    };
    let submit_button = by_id::<HtmlButtonElement>(document, &ids.submit);
    let in_flight = Rc::new(Cell::new(false));

    let target = form.clone();
    listeners.push(listen(&target, "submit", move |event| {
        event.prevent_default();

        if let Some(summary) = validation_summary(validate_form(&form)) {
            apply_feedback(&feedback, &summary);
            return;
        }
        if in_flight.replace(true) {
            debug!("Submission already in flight, ignoring");
            return;
        }
        set_busy(submit_button.as_ref(), true);

        let form = form.clone();
        let feedback = feedback.clone();
        let submit_button = submit_button.clone();
        let in_flight = in_flight.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = submit(&form, timeout_ms).await;
            if outcome.resets_form() {
                form.reset();
            }
            apply_feedback(&feedback, &outcome.feedback());
            set_busy(submit_button.as_ref(), false);
            in_flight.set(false);
        });
    })?);

    Ok(listeners)
}
