//! Scroll-progress observer: derive discrete UI state from geometry.
//!
//! An observer owns a pure mapping from viewport geometry to some state `S`
//! and remembers the last value.  Sampling reports only changes, so feeding
//! it the same geometry twice is a no-op.

use super::background::BackgroundSelector;
use super::viewport::Viewport;

type Mapping<S> = Box<dyn Fn(&dyn Viewport) -> S>;

pub struct ScrollObserver<S> {
    map: Mapping<S>,
    last: Option<S>,
}

impl<S: Clone + PartialEq + std::fmt::Debug> ScrollObserver<S> {
    pub fn new(map: impl Fn(&dyn Viewport) -> S + 'static) -> Self {
        Self {
            map: Box::new(map),
            last: None,
        }
    }

    /// Evaluate the mapping.  Returns the new state only when it differs
    /// from the previous sample (the first sample always counts).
    pub fn sample(&mut self, viewport: &dyn Viewport) -> Option<S> {
        let next = (self.map)(viewport);
        if self.last.as_ref() == Some(&next) {
            return None;
        }
        self.last = Some(next.clone());
        Some(next)
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&S> {
        self.last.as_ref()
    }
}

// ───────────────────────────────────────── stock mappings ────

/// Active background frame of `selector`'s container.
pub fn background_frame(selector: BackgroundSelector) -> ScrollObserver<Option<usize>> {
    ScrollObserver::new(move |vp| selector.active_frame(vp))
}

/// Whether the navigation bar should float: true once the bottom edge of
/// `anchor` has slid under the fixed header.  An unmounted anchor keeps the
/// nav docked.
pub fn nav_should_float(anchor: impl Into<String>) -> ScrollObserver<bool> {
    let anchor = anchor.into();
    ScrollObserver::new(move |vp| {
        let header = vp.header_height().unwrap_or(0.0);
        vp.element_bounds(&anchor)
            .is_some_and(|b| b.bottom() <= header)
    })
}
