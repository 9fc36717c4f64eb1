//! The platform capability the scroll logic runs against.
//!
//! Everything in `core` talks to a [`Viewport`] and a [`Clock`] instead of a
//! real rendering surface, so the terminal host and the tests can each supply
//! their own.

use std::time::{Duration, Instant};

use super::listener::Subscription;

// ───────────────────────────────────────── geometry ──────────

/// Viewport-relative bounding box of an element (vertical axis only).
///
/// `top` is measured from the top edge of the viewport, so it goes negative
/// once the element has scrolled past.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Length of the overlap between this box and `[0, viewport_height]`.
    pub fn visible_height(&self, viewport_height: f64) -> f64 {
        let lo = self.top.max(0.0);
        let hi = self.bottom().min(viewport_height);
        (hi - lo).max(0.0)
    }
}

// ───────────────────────────────────────── notices ───────────

/// Notification delivered to scroll/resize subscribers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollNotice {
    Scrolled { offset: f64 },
    Resized { height: f64 },
}

// ───────────────────────────────────────── capability ────────

/// Geometry queries and scroll control of one scrollable document.
pub trait Viewport {
    /// Current vertical scroll offset from the document origin.
    fn scroll_offset(&self) -> f64;

    /// Move the document.  Implementations clamp to their scrollable range.
    fn set_scroll_offset(&mut self, offset: f64);

    fn viewport_height(&self) -> f64;

    /// Bounding box of the element anchored at `id`, if it is mounted.
    fn element_bounds(&self, id: &str) -> Option<Bounds>;

    /// Measured height of the fixed header, if one is rendered.
    fn header_height(&self) -> Option<f64>;

    /// Ask the host to deliver another animation frame.
    fn request_frame(&mut self);

    /// Register for scroll and resize notices for as long as the guard lives.
    fn subscribe(&self, listener: Box<dyn FnMut(&ScrollNotice)>) -> Subscription;
}

// ───────────────────────────────────────── clock ─────────────

/// Monotonic time source.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// [`Clock`] backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
