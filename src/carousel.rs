//! Carousel controller.
//!
//! Keeps track of which slide is in view and the horizontal offset that
//! shows it. The controller knows nothing about the DOM: measurement and style
//! output go through [`SlideTrack`], the periodic tick through [`Autoplay`].
//! The event-binding layer calls the `on_*` methods.

use log::debug;

/// Measurement and output side of the slide strip.
pub trait SlideTrack {
    /// Current rendered width of the first slide, in pixels.
    fn slide_width(&self) -> f64;
    /// Current gap between adjacent slides, in pixels.
    fn gap(&self) -> f64;
    /// Shift the strip left by `offset_px` pixels.
    fn apply_offset(&self, offset_px: i64);
}

/// Source of the periodic autoplay tick.
///
/// `start` arms a repeating timer and returns a handle that cancels it when
/// dropped.
pub trait Autoplay {
    type Handle;

    fn start(&self, period_ms: u32) -> Self::Handle;
}

/// Map any requested position onto `[0, count)` using true modulo.
///
/// Returns `None` for an empty collection.
pub fn normalize_index(requested: i128, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(requested.rem_euclid(count as i128) as usize)
}

/// Pixel offset of slide `index` for a given pitch.
pub fn offset_for(index: usize, pitch: f64) -> i64 {
    (index as f64 * pitch).round() as i64
}

pub struct CarouselController<T: SlideTrack, A: Autoplay> {
    track: T,
    autoplay: A,
    slide_count: usize,
    index: usize,
    period_ms: u32,
    timer: Option<A::Handle>,
    /// Hover regions the pointer is currently inside. Regions may nest
    /// (controls placed inside the viewport).
    hovered: usize,
    active: bool,
}

impl<T: SlideTrack, A: Autoplay> CarouselController<T, A> {
    pub fn new(track: T, slide_count: usize, autoplay: A, period_ms: u32) -> Self {
        Self {
            track,
            autoplay,
            slide_count,
            index: 0,
            period_ms,
            timer: None,
            hovered: 0,
            active: false,
        }
    }

    /// Show the first slide and start autoplay.
    ///
    /// Returns `false` and touches nothing when there are no slides; the
    /// controller then stays inactive and every handler is a no-op.
    pub fn initialize(&mut self) -> bool {
        if self.slide_count == 0 {
            debug!("Carousel has no slides, staying inactive");
            return false;
        }
        self.active = true;
        self.go_to(0);
        self.rearm();
        debug!(
            "Carousel initialized with {} slides, autoplay every {}ms",
            self.slide_count, self.period_ms
        );
        true
    }

    /// Current slide pitch, measured fresh from the track.
    pub fn slide_pitch(&self) -> f64 {
        self.track.slide_width() + self.track.gap()
    }

    /// Select slide `requested` (any integer) and apply its offset.
    ///
    /// Returns the applied offset, or `None` when inactive.
    pub fn go_to(&mut self, requested: i64) -> Option<i64> {
        self.go_to_wide(requested as i128)
    }

    /// Move `delta` slides from the current one, wrapping at both ends.
    pub fn advance(&mut self, delta: i64) -> Option<i64> {
        self.go_to_wide(self.index as i128 + delta as i128)
    }

    fn go_to_wide(&mut self, requested: i128) -> Option<i64> {
        if !self.active {
            return None;
        }
        let index = normalize_index(requested, self.slide_count)?;
        let offset = offset_for(index, self.slide_pitch());
        self.index = index;
        self.track.apply_offset(offset);
        Some(offset)
    }

    /// Restart autoplay. The previous handle is always dropped before the new
    /// timer is armed, so at most one timer is ever live.
    pub fn rearm(&mut self) {
        self.timer = None;
        self.timer = Some(self.autoplay.start(self.period_ms));
    }

    /// Cancel autoplay until the next `rearm`.
    pub fn pause(&mut self) {
        self.timer = None;
    }

    pub fn on_previous(&mut self) {
        self.advance(-1);
    }

    pub fn on_next(&mut self) {
        self.advance(1);
    }

    /// Reposition the current slide after the strip changed size.
    pub fn on_resize(&mut self) {
        self.go_to(self.index as i64);
    }

    pub fn on_pointer_enter(&mut self) {
        if self.active {
            self.hovered += 1;
            self.pause();
        }
    }

    /// Autoplay resumes once the pointer has left every hovered region.
    pub fn on_pointer_leave(&mut self) {
        if !self.active {
            return;
        }
        self.hovered = self.hovered.saturating_sub(1);
        if self.hovered == 0 {
            self.rearm();
        }
    }

    pub fn on_tick(&mut self) {
        self.advance(1);
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_autoplaying(&self) -> bool {
        self.timer.is_some()
    }
}
