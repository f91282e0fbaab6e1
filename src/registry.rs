//! Thread-local home for everything `mount` wires up.
//!
//! Listeners, the resize observer and the autoplay interval are RAII guards.
//! Keeping them here keeps them alive for the page lifetime; taking them out
//! and dropping them detaches the behavior again.

use crate::carousel_dom::CarouselBinding;
use crate::dom::Listener;
use std::cell::RefCell;

#[derive(Default)]
pub struct MountedPage {
    pub listeners: Vec<Listener>,
    pub carousel: Option<CarouselBinding>,
}

thread_local! {
    /// The currently mounted page, if any.
    /// Thread-local because wasm runs single-threaded and JS handles are `!Send`.
    static MOUNTED: RefCell<Option<MountedPage>> = const { RefCell::new(None) };
}

/// Store `page`, dropping whatever was mounted before.
pub fn install(page: MountedPage) {
    let previous = MOUNTED.with(|m| m.borrow_mut().replace(page));
    drop(previous);
}

/// Remove the mounted page without dropping it.
pub fn take() -> Option<MountedPage> {
    MOUNTED.with(|m| m.borrow_mut().take())
}

pub fn is_mounted() -> bool {
    MOUNTED.with(|m| m.borrow().is_some())
}

/// Run `f` against the mounted carousel, if there is one.
pub fn with_carousel<R>(f: impl FnOnce(&CarouselBinding) -> R) -> Option<R> {
    MOUNTED.with(|m| m.borrow().as_ref().and_then(|p| p.carousel.as_ref()).map(f))
}
