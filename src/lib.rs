//! Page behavior for the marketing site: carousel, smooth scrolling, mobile
//! menu, footer year, contact form and uploader.
//!
//! Every feature binds to markup that is already on the page. A feature whose
//! markup is missing simply stays inactive.

use log::{debug, info};
use serde::Serialize;
use std::fmt;
use wasm_bindgen::prelude::*;

pub mod carousel;
pub mod carousel_dom;
pub mod config;
pub mod contact_form;
pub mod dom;
pub mod navigation;
pub mod registry;
pub mod uploader;
pub mod utils;

use config::PageConfig;
use registry::MountedPage;

/// Hard failures while mounting. Missing optional markup is never one of these.
#[derive(Debug)]
pub enum MountError {
    NoWindow,
    NoDocument,
    /// A DOM call threw; carries the JS error text.
    Dom(String),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::NoWindow => write!(f, "No global window available"),
            MountError::NoDocument => write!(f, "Window has no document"),
            MountError::Dom(msg) => write!(f, "DOM operation failed: {}", msg),
        }
    }
}

impl std::error::Error for MountError {}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        MountError::Dom(dom::js_error_message(value))
    }
}

/// Which features found their markup and were wired.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountReport {
    pub smooth_scroll: bool,
    pub menu_toggle: bool,
    pub year: bool,
    pub carousel: bool,
    pub contact_form: bool,
    pub uploader: bool,
}

/// Wire every feature present on the current page.
///
/// Anything mounted earlier is torn down first, so calling this twice never
/// doubles listeners or autoplay timers.
pub fn mount(config: &PageConfig) -> Result<MountReport, MountError> {
    unmount();

    let window = dom::window()?;
    let document = dom::document(&window)?;
    let mut page = MountedPage::default();
    let mut report = MountReport::default();

    page.listeners.push(navigation::mount_smooth_scroll(&document)?);
    report.smooth_scroll = true;

    if let Some(listener) = navigation::mount_menu_toggle(&document, &config.navigation)? {
        page.listeners.push(listener);
        report.menu_toggle = true;
    }

    report.year = navigation::stamp_year(&document, &config.navigation);

    page.carousel = carousel_dom::mount_carousel(
        &window,
        &document,
        &config.carousel,
        config.autoplay_period_ms(),
    )?;
    report.carousel = page.carousel.is_some();

    let form_listeners =
        contact_form::mount_contact_form(&document, &config.contact_form, config.submit_timeout_ms)?;
    report.contact_form = !form_listeners.is_empty();
    page.listeners.extend(form_listeners);

    let upload_listeners = uploader::mount_uploader(
        &document,
        &config.uploader,
        config.max_upload_bytes,
        config.upload_delay_ms,
    )?;
    report.uploader = !upload_listeners.is_empty();
    page.listeners.extend(upload_listeners);

    debug!("Mounted {} page listeners", page.listeners.len());
    info!("Page behavior mounted: {:?}", report);
    registry::install(page);
    Ok(report)
}

/// Remove every listener, observer and timer installed by [`mount`].
///
/// Returns `false` when nothing was mounted.
pub fn unmount() -> bool {
    match registry::take() {
        Some(page) => {
            drop(page);
            info!("Page behavior unmounted");
            true
        }
        None => false,
    }
}

/// JS entry point: `mountPage(config?)`.
///
/// `config` is an optional object shaped like [`PageConfig`] (camelCase keys);
/// absent keys take their defaults. Resolves to the mount report.
#[wasm_bindgen(js_name = mountPage)]
pub fn mount_page(config: JsValue) -> Result<JsValue, JsValue> {
    let config: PageConfig = if config.is_undefined() || config.is_null() {
        PageConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid page config: {}", e)))?
    };

    let report = mount(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// JS entry point: `unmountPage()`.
#[wasm_bindgen(js_name = unmountPage)]
pub fn unmount_page() -> bool {
    unmount()
}

/// JS entry point: `carouselIndex()`, the slide currently in view, or
/// `undefined` when no carousel is mounted.
#[wasm_bindgen(js_name = carouselIndex)]
pub fn carousel_index() -> Option<usize> {
    registry::with_carousel(|c| c.current_index())
}
