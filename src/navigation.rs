//! Header and footer glue: smooth scrolling to in-page anchors, the mobile
//! menu toggle and the footer year.

use crate::config::{NavigationIds, MENU_OPEN_CLASS};
use crate::dom::{by_id, js_error_message, listen, Listener};
use crate::utils::fragment_target;
use crate::MountError;
use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

const IN_PAGE_LINK_SELECTOR: &str = "a[href^=\"#\"]";

/// Value for `aria-expanded` given the menu state.
pub fn aria_expanded(open: bool) -> &'static str {
    if open {
        "true"
    } else {
        "false"
    }
}

/// One document-level click listener that smooth-scrolls to the target of
/// any `href="#id"` link whose id exists.
pub fn mount_smooth_scroll(document: &Document) -> Result<Listener, MountError> {
    let doc = document.clone();
    listen(document, "click", move |event| {
        if let Err(e) = scroll_to_anchor(&doc, &event) {
            warn!("Smooth scroll failed: {}", js_error_message(e));
        }
    })
}

fn scroll_to_anchor(document: &Document, event: &Event) -> Result<(), JsValue> {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return Ok(());
    };
    let Some(anchor) = target.closest(IN_PAGE_LINK_SELECTOR)? else {
        return Ok(());
    };
    let Some(href) = anchor.get_attribute("href") else {
        return Ok(());
    };
    let Some(destination) = fragment_target(&href).and_then(|id| document.get_element_by_id(id))
    else {
        return Ok(());
    };

    event.prevent_default();
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    destination.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(())
}

/// Wire the hamburger button to open and close the main nav.
///
/// Both elements must exist; otherwise nothing is wired.
pub fn mount_menu_toggle(
    document: &Document,
    ids: &NavigationIds,
) -> Result<Option<Listener>, MountError> {
    let (Some(hamburger), Some(nav)) = (
        by_id::<HtmlElement>(document, &ids.hamburger),
        by_id::<Element>(document, &ids.nav),
    ) else {
        debug!("Menu toggle markup missing, skipping");
        return Ok(None);
    };

    let button = hamburger.clone();
    let listener = listen(&hamburger, "click", move |_| {
        match nav.class_list().toggle(MENU_OPEN_CLASS) {
            Ok(open) => {
                if let Err(e) = button.set_attribute("aria-expanded", aria_expanded(open)) {
                    warn!("Could not set aria-expanded: {}", js_error_message(e));
                }
            }
            Err(e) => warn!("Could not toggle menu: {}", js_error_message(e)),
        }
    })?;
    Ok(Some(listener))
}

/// Write the current year into the footer. Returns whether the element exists.
pub fn stamp_year(document: &Document, ids: &NavigationIds) -> bool {
    match document.get_element_by_id(&ids.year) {
        Some(el) => {
            let year = js_sys::Date::new_0().get_full_year();
            el.set_text_content(Some(&year.to_string()));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aria_values() {
        assert_eq!(aria_expanded(true), "true");
        assert_eq!(aria_expanded(false), "false");
    }
}
