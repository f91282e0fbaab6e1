//! Browser tests for the DOM bindings. Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use page_behavior::config::{PageConfig, MSG_BAD_TYPE, MSG_NETWORK, MSG_UPLOADED};
use page_behavior::registry::with_carousel;
use page_behavior::{carousel_index, mount, unmount};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{
    DataTransfer, DragEvent, DragEventInit, Element, Event, File, FilePropertyBag,
    HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, MouseEvent,
    MouseEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

/// Insert `html` into a fresh container on the page.
fn fixture(html: &str) -> Element {
    let document = gloo_utils::document();
    let container = document.create_element("div").expect("create container");
    container.set_inner_html(html);
    gloo_utils::body()
        .append_child(&container)
        .expect("append container");
    container
}

fn element<T: JsCast>(id_or_selector: &str) -> T {
    gloo_utils::document()
        .query_selector(id_or_selector)
        .expect("valid selector")
        .expect("element present")
        .dyn_into::<T>()
        .expect("element type")
}

fn track_transform() -> String {
    element::<HtmlElement>(".carousel-track")
        .style()
        .get_property_value("transform")
        .expect("read transform")
}

fn text(selector: &str) -> String {
    element::<Element>(selector).text_content().unwrap_or_default()
}

fn file(name: &str, mime: &str) -> File {
    let parts = js_sys::Array::of1(&JsValue::from_str("%PDF-1.4"));
    let options = FilePropertyBag::new();
    options.set_type(mime);
    File::new_with_str_sequence_and_options(&parts, name, &options).expect("create file")
}

fn transfer(file: &File) -> DataTransfer {
    let transfer = DataTransfer::new().expect("create data transfer");
    transfer.items().add_with_file(file).expect("add file");
    transfer
}

/// Dispatch a bubbling, cancelable click and hand the event back.
fn click(target: &Element) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("click", &init).expect("create click");
    target.dispatch_event(&event).expect("dispatch click");
    event
}

fn drag_event(kind: &str, transfer: Option<&DataTransfer>) -> DragEvent {
    let init = DragEventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    init.set_data_transfer(transfer);
    DragEvent::new_with_event_init_dict(kind, &init).expect("create drag event")
}

fn fire(target: &Element, kind: &str) {
    let event = Event::new(kind).expect("create event");
    target.dispatch_event(&event).expect("dispatch");
}

const CAROUSEL: &str = r#"
<div class="carousel-viewport" style="width: 300px; overflow: hidden">
  <div class="carousel-track" style="display: flex; gap: 20px">
    <div class="carousel-slide" style="flex: 0 0 300px; height: 10px"></div>
    <div class="carousel-slide" style="flex: 0 0 300px; height: 10px"></div>
    <div class="carousel-slide" style="flex: 0 0 300px; height: 10px"></div>
    <div class="carousel-slide" style="flex: 0 0 300px; height: 10px"></div>
  </div>
</div>
<button class="carousel-control prev">prev</button>
<button class="carousel-control next">next</button>
"#;

#[wasm_bindgen_test]
fn carousel_moves_by_measured_pitch() {
    let container = fixture(CAROUSEL);
    let report = mount(&PageConfig::default()).expect("mount");
    assert!(report.carousel);
    assert_eq!(carousel_index(), Some(0));
    assert_eq!(track_transform(), "translateX(0px)");

    element::<HtmlElement>(".carousel-control.next").click();
    assert_eq!(carousel_index(), Some(1));
    assert_eq!(track_transform(), "translateX(-320px)");

    element::<HtmlElement>(".carousel-control.prev").click();
    element::<HtmlElement>(".carousel-control.prev").click();
    assert_eq!(carousel_index(), Some(3));
    assert_eq!(track_transform(), "translateX(-960px)");

    assert!(unmount());
    assert_eq!(carousel_index(), None);
    container.remove();
}

#[wasm_bindgen_test]
fn carousel_without_slides_stays_inactive() {
    let container = fixture(r#"<div class="carousel-track"></div>"#);
    let report = mount(&PageConfig::default()).expect("mount");
    assert!(!report.carousel);
    assert_eq!(carousel_index(), None);
    assert_eq!(track_transform(), "");
    unmount();
    container.remove();
}

#[wasm_bindgen_test]
fn carousel_without_controls_still_mounts() {
    let container = fixture(
        r#"<div class="carousel-track" style="display: flex">
             <div class="carousel-slide" style="flex: 0 0 100px"></div>
             <div class="carousel-slide" style="flex: 0 0 100px"></div>
           </div>"#,
    );
    let report = mount(&PageConfig::default()).expect("mount");
    assert!(report.carousel);
    assert_eq!(track_transform(), "translateX(0px)");
    unmount();
    container.remove();
}

#[wasm_bindgen_test]
fn menu_toggle_mirrors_state_into_aria() {
    let container = fixture(
        r#"<button id="hamburger" aria-expanded="false">menu</button>
           <nav id="mainNav"></nav>"#,
    );
    let report = mount(&PageConfig::default()).expect("mount");
    assert!(report.menu_toggle);

    let hamburger = element::<HtmlElement>("#hamburger");
    let nav = element::<Element>("#mainNav");

    hamburger.click();
    assert!(nav.class_list().contains("open"));
    assert_eq!(hamburger.get_attribute("aria-expanded").as_deref(), Some("true"));

    hamburger.click();
    assert!(!nav.class_list().contains("open"));
    assert_eq!(hamburger.get_attribute("aria-expanded").as_deref(), Some("false"));

    unmount();
    hamburger.click();
    assert!(!nav.class_list().contains("open"));
    container.remove();
}

#[wasm_bindgen_test]
fn footer_year_is_stamped() {
    let container = fixture(r#"<footer><span id="year"></span></footer>"#);
    let report = mount(&PageConfig::default()).expect("mount");
    assert!(report.year);
    let expected = js_sys::Date::new_0().get_full_year().to_string();
    assert_eq!(element::<Element>("#year").text_content(), Some(expected));
    unmount();
    container.remove();
}

#[wasm_bindgen_test]
fn invalid_form_is_not_submitted() {
    let container = fixture(
        r#"<form id="contactForm" action="/never-called" novalidate>
             <div><input id="email" name="email" type="email" required><small class="error"></small></div>
             <button id="submitBtn" type="submit">Send</button>
           </form>
           <p id="formFeedback"></p>"#,
    );
    let report = mount(&PageConfig::default()).expect("mount");
    assert!(report.contact_form);

    let form = element::<HtmlFormElement>("#contactForm");
    let submit = Event::new("submit").expect("create event");
    form.dispatch_event(&submit).expect("dispatch");

    assert_eq!(
        element::<Element>("#formFeedback").text_content().as_deref(),
        Some("Please fix the highlighted fields.")
    );
    let input = element::<Element>("#email");
    assert!(input.class_list().contains("invalid"));
    let error = element::<Element>("#contactForm .error");
    assert!(!error.text_content().unwrap_or_default().is_empty());
    assert!(!element::<web_sys::HtmlButtonElement>("#submitBtn").disabled());

    unmount();
    container.remove();
}

#[wasm_bindgen_test]
fn mounting_twice_replaces_previous_listeners() {
    let container = fixture(
        r#"<button id="hamburger">menu</button>
           <nav id="mainNav"></nav>"#,
    );
    mount(&PageConfig::default()).expect("first mount");
    mount(&PageConfig::default()).expect("second mount");

    let hamburger = element::<HtmlElement>("#hamburger");
    hamburger.click();
    // A doubled listener would toggle twice and leave the menu closed.
    assert!(element::<Element>("#mainNav").class_list().contains("open"));

    unmount();
    container.remove();
}

#[wasm_bindgen_test]
fn pointer_over_nested_control_keeps_autoplay_paused() {
    let container = fixture(
        r#"<div class="carousel-viewport">
             <div class="carousel-track" style="display: flex">
               <div class="carousel-slide" style="flex: 0 0 100px"></div>
               <div class="carousel-slide" style="flex: 0 0 100px"></div>
             </div>
             <button class="carousel-control prev">prev</button>
             <button class="carousel-control next">next</button>
           </div>"#,
    );
    mount(&PageConfig::default()).expect("mount");
    let viewport = element::<Element>(".carousel-viewport");
    let control = element::<Element>(".carousel-control.prev");
    assert_eq!(with_carousel(|c| c.is_autoplaying()), Some(true));

    fire(&viewport, "mouseenter");
    fire(&control, "mouseenter");
    fire(&control, "mouseleave");
    assert_eq!(with_carousel(|c| c.is_autoplaying()), Some(false));

    fire(&viewport, "mouseleave");
    assert_eq!(with_carousel(|c| c.is_autoplaying()), Some(true));

    unmount();
    container.remove();
}

const SECTIONS: &str = r##"
<a id="toPricing" href="#pricing"><span id="pricingLabel">Pricing</span></a>
<a id="toNowhere" href="#nowhere">Nowhere</a>
<section id="pricing" style="height: 10px"></section>
"##;

#[wasm_bindgen_test]
fn in_page_link_with_target_scrolls_instead_of_jumping() {
    let container = fixture(SECTIONS);
    let report = mount(&PageConfig::default()).expect("mount");
    assert!(report.smooth_scroll);

    assert!(click(&element::<Element>("#toPricing")).default_prevented());
    // Clicks on children of the link count too.
    assert!(click(&element::<Element>("#pricingLabel")).default_prevented());

    unmount();
    container.remove();
}

#[wasm_bindgen_test]
fn in_page_link_without_target_keeps_default() {
    let container = fixture(SECTIONS);
    mount(&PageConfig::default()).expect("mount");

    assert!(!click(&element::<Element>("#toNowhere")).default_prevented());

    unmount();
    assert!(!click(&element::<Element>("#toPricing")).default_prevented());
    container.remove();
}

const UPLOADER: &str = r#"
<div id="uploader">
  <input id="fileInput" type="file">
  <button id="browseBtn" type="button">Browse</button>
</div>
<p id="filePreview"></p>
<button id="uploadBtn" type="button" disabled>Upload</button>
<p id="uploadFeedback"></p>
"#;

#[wasm_bindgen_test]
fn rejected_pick_clears_file_input() {
    let container = fixture(UPLOADER);
    let report = mount(&PageConfig::default()).expect("mount");
    assert!(report.uploader);

    let input = element::<HtmlInputElement>("#fileInput");
    let picked = transfer(&file("setup.exe", "application/x-msdownload"));
    input.set_files(picked.files().as_ref());
    assert_eq!(input.files().map(|f| f.length()), Some(1));
    fire(&input, "change");

    assert_eq!(input.value(), "");
    assert_eq!(input.files().map(|f| f.length()), Some(0));
    assert_eq!(text("#uploadFeedback"), MSG_BAD_TYPE);
    assert!(element::<HtmlButtonElement>("#uploadBtn").disabled());

    unmount();
    container.remove();
}

#[wasm_bindgen_test]
fn dropped_file_lands_in_input_and_clears_drag_state() {
    let container = fixture(UPLOADER);
    mount(&PageConfig::default()).expect("mount");
    let zone = element::<Element>("#uploader");

    let over = drag_event("dragover", None);
    zone.dispatch_event(&over).expect("dispatch dragover");
    assert!(over.default_prevented());
    assert!(zone.class_list().contains("drag"));

    let dropped = transfer(&file("brochure.pdf", "application/pdf"));
    let drop = drag_event("drop", Some(&dropped));
    zone.dispatch_event(&drop).expect("dispatch drop");
    assert!(drop.default_prevented());
    assert!(!zone.class_list().contains("drag"));

    let input = element::<HtmlInputElement>("#fileInput");
    let names: Vec<String> = input
        .files()
        .and_then(|list| list.get(0))
        .map(|f| f.name())
        .into_iter()
        .collect();
    assert_eq!(names, vec!["brochure.pdf"]);
    assert!(text("#filePreview").starts_with("brochure.pdf — "));
    assert!(!element::<HtmlButtonElement>("#uploadBtn").disabled());

    unmount();
    container.remove();
}

#[wasm_bindgen_test]
async fn simulated_upload_reports_success_after_delay() {
    let container = fixture(UPLOADER);
    let config = PageConfig {
        upload_delay_ms: 50,
        ..PageConfig::default()
    };
    mount(&config).expect("mount");

    let input = element::<HtmlInputElement>("#fileInput");
    let picked = transfer(&file("logo.png", "image/png"));
    input.set_files(picked.files().as_ref());
    fire(&input, "change");
    let upload = element::<HtmlButtonElement>("#uploadBtn");
    assert!(!upload.disabled());

    upload.click();
    assert_eq!(upload.text_content().as_deref(), Some("Uploading..."));
    assert!(upload.disabled());

    TimeoutFuture::new(200).await;
    assert_eq!(upload.text_content().as_deref(), Some("Upload"));
    assert!(upload.disabled());
    assert_eq!(text("#filePreview"), "");
    assert_eq!(input.value(), "");
    assert_eq!(text("#uploadFeedback"), MSG_UPLOADED);

    unmount();
    container.remove();
}

#[wasm_bindgen_test]
async fn failed_submission_re_enables_the_button() {
    // Port 9 is on the fetch blocklist, so the request fails without a server.
    let container = fixture(
        r#"<form id="contactForm" action="http://127.0.0.1:9/contact" novalidate>
             <input id="name" name="name" value="Ada">
             <button id="submitBtn" type="submit">Send</button>
           </form>
           <p id="formFeedback"></p>"#,
    );
    let config = PageConfig {
        submit_timeout_ms: 2_000,
        ..PageConfig::default()
    };
    mount(&config).expect("mount");

    let button = element::<HtmlButtonElement>("#submitBtn");
    fire(&element::<HtmlFormElement>("#contactForm"), "submit");
    assert!(button.disabled());
    assert!(button.class_list().contains("loading"));

    for _ in 0..50 {
        if !button.disabled() {
            break;
        }
        TimeoutFuture::new(100).await;
    }
    assert!(!button.disabled());
    assert!(!button.class_list().contains("loading"));
    assert_eq!(text("#formFeedback"), MSG_NETWORK);
    assert_eq!(element::<HtmlInputElement>("#name").value(), "Ada");

    unmount();
    container.remove();
}
