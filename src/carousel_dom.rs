//! Browser side of the carousel: measures the rendered slides, writes the
//! track transform, owns the autoplay interval and wires DOM events to the
//! controller.

use crate::carousel::{Autoplay, CarouselController, SlideTrack};
use crate::config::CarouselSelectors;
use crate::dom::{js_error_message, listen, query, Listener};
use crate::utils::{resolve_gap, translate_x};
use crate::MountError;
use gloo_timers::callback::Interval;
use log::{debug, warn};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ResizeObserver, Window};

pub type DomCarousel = CarouselController<DomTrack, IntervalAutoplay>;

/// The rendered track and its first slide.
pub struct DomTrack {
    window: Window,
    track: HtmlElement,
    first_slide: Element,
}

impl SlideTrack for DomTrack {
    fn slide_width(&self) -> f64 {
        self.first_slide.get_bounding_client_rect().width()
    }

    fn gap(&self) -> f64 {
        match self.window.get_computed_style(&self.track) {
            Ok(Some(style)) => resolve_gap(
                &style.get_property_value("column-gap").unwrap_or_default(),
                &style.get_property_value("gap").unwrap_or_default(),
            ),
            _ => 0.0,
        }
    }

    fn apply_offset(&self, offset_px: i64) {
        if let Err(e) = self
            .track
            .style()
            .set_property("transform", &translate_x(offset_px))
        {
            warn!("Could not move carousel track: {}", js_error_message(e));
        }
    }
}

/// Autoplay driven by `setInterval`. Only a weak reference to the controller
/// is held, so a torn-down carousel ignores late ticks.
pub struct IntervalAutoplay {
    controller: Weak<RefCell<DomCarousel>>,
}

impl Autoplay for IntervalAutoplay {
    type Handle = Interval;

    fn start(&self, period_ms: u32) -> Interval {
        let controller = self.controller.clone();
        Interval::new(period_ms, move || {
            if let Some(controller) = controller.upgrade() {
                with_controller(&controller, |c| c.on_tick());
            }
        })
    }
}

fn with_controller(controller: &Rc<RefCell<DomCarousel>>, f: impl FnOnce(&mut DomCarousel)) {
    match controller.try_borrow_mut() {
        Ok(mut c) => f(&mut c),
        Err(_) => warn!("Carousel busy, dropping event"),
    }
}

struct ResizeWatch {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, ResizeObserver)>,
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// A live carousel: controller plus everything feeding it events.
pub struct CarouselBinding {
    controller: Rc<RefCell<DomCarousel>>,
    _listeners: Vec<Listener>,
    _resize: ResizeWatch,
}

impl CarouselBinding {
    pub fn current_index(&self) -> usize {
        self.controller.borrow().current_index()
    }

    pub fn slide_count(&self) -> usize {
        self.controller.borrow().slide_count()
    }

    pub fn is_autoplaying(&self) -> bool {
        self.controller.borrow().is_autoplaying()
    }
}

/// Find the carousel markup and bring it to life.
///
/// Returns `Ok(None)` when the track is missing or has no slides. Missing
/// prev/next controls or viewport only skip their own handlers.
pub fn mount_carousel(
    window: &Window,
    document: &Document,
    selectors: &CarouselSelectors,
    period_ms: u32,
) -> Result<Option<CarouselBinding>, MountError> {
    let Some(track) = query::<HtmlElement>(document, &selectors.track) else {
        debug!("No carousel track '{}' on page", selectors.track);
        return Ok(None);
    };
    let slides = document.query_selector_all(&selectors.slide)?;
    let slide_count = slides.length() as usize;
    let Some(first_slide) = slides.get(0).and_then(|n| n.dyn_into::<Element>().ok()) else {
        debug!("Carousel track has no slides");
        return Ok(None);
    };

    let previous = query::<HtmlElement>(document, &selectors.previous);
    let next = query::<HtmlElement>(document, &selectors.next);
    let viewport = query::<HtmlElement>(document, &selectors.viewport);

    let controller: Rc<RefCell<DomCarousel>> = Rc::new_cyclic(|weak| {
        RefCell::new(CarouselController::new(
            DomTrack {
                window: window.clone(),
                track: track.clone(),
                first_slide,
            },
            slide_count,
            IntervalAutoplay {
                controller: weak.clone(),
            },
            period_ms,
        ))
    });

    let resize = {
        let controller = controller.clone();
        let callback = Closure::wrap(Box::new(move |_: js_sys::Array, _: ResizeObserver| {
            with_controller(&controller, |c| c.on_resize());
        }) as Box<dyn FnMut(js_sys::Array, ResizeObserver)>);
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        if let Some(viewport) = &viewport {
            observer.observe(viewport);
        }
        observer.observe(&track);
        ResizeWatch {
            observer,
            _callback: callback,
        }
    };

    let mut listeners = Vec::new();
    if let Some(previous) = &previous {
        let controller = controller.clone();
        listeners.push(listen(previous, "click", move |_| {
            with_controller(&controller, |c| c.on_previous())
        })?);
    }
    if let Some(next) = &next {
        let controller = controller.clone();
        listeners.push(listen(next, "click", move |_| {
            with_controller(&controller, |c| c.on_next())
        })?);
    }
    for region in [&previous, &next, &viewport].into_iter().flatten() {
        let enter = controller.clone();
        listeners.push(listen(region, "mouseenter", move |_| {
            with_controller(&enter, |c| c.on_pointer_enter())
        })?);
        let leave = controller.clone();
        listeners.push(listen(region, "mouseleave", move |_| {
            with_controller(&leave, |c| c.on_pointer_leave())
        })?);
    }

    if !controller.borrow_mut().initialize() {
        return Ok(None);
    }
    debug!(
        "Carousel wired: {} slides, {} listeners",
        slide_count,
        listeners.len()
    );

    Ok(Some(CarouselBinding {
        controller,
        _listeners: listeners,
        _resize: resize,
    }))
}
