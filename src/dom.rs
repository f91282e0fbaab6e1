//! Thin helpers over `web-sys`: element lookup, event listener guards and
//! feedback output.

use crate::utils::Feedback;
use crate::MountError;
use gloo_utils::errors::JsError;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

pub fn window() -> Result<Window, MountError> {
    web_sys::window().ok_or(MountError::NoWindow)
}

pub fn document(window: &Window) -> Result<Document, MountError> {
    window.document().ok_or(MountError::NoDocument)
}

/// Readable text for a thrown JS value.
pub fn js_error_message(value: JsValue) -> String {
    match JsError::try_from(value) {
        Ok(err) => err.to_string(),
        Err(not_error) => not_error.to_string(),
    }
}

/// Element with the given id, if present and of type `T`.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// First element matching `selector`, if present and of type `T`.
///
/// An invalid selector is logged and treated as "not found".
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    match document.query_selector(selector) {
        Ok(found) => found.and_then(|el| el.dyn_into::<T>().ok()),
        Err(e) => {
            warn!("Bad selector '{}': {}", selector, js_error_message(e));
            None
        }
    }
}

/// Add or remove a class, logging instead of failing.
pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if let Err(e) = result {
        warn!("Could not update class '{}': {}", class, js_error_message(e));
    }
}

pub fn apply_feedback(element: &HtmlElement, feedback: &Feedback) {
    element.set_text_content(Some(&feedback.text));
    if let Err(e) = element.style().set_property("color", feedback.tone.color()) {
        warn!("Could not color feedback: {}", js_error_message(e));
    }
}

pub fn clear_feedback(element: &HtmlElement) {
    element.set_text_content(Some(""));
}

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Attach `handler` to `event` on `target`.
pub fn listen<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Listener, MountError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(Listener {
        target: target.clone(),
        event,
        closure,
    })
}
