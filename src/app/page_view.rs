//! One mounted page: the single owner of its scroll-derived state.
//!
//! Scroll notices from the viewport only mark the view dirty.  The next
//! frame advances any animation, re-samples every observer once and commits
//! the section tracker, so each derived field has exactly one writer.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::background::BackgroundSelector;
use crate::core::error::TrackerError;
use crate::core::listener::Subscription;
use crate::core::observer::{self, ScrollObserver};
use crate::core::scroller::{ScrollOptions, ScrollOutcome, SmoothScroller};
use crate::core::tracker::{first_in_view_wins, ScrollSection, SectionTracker};
use crate::core::viewport::{Clock, Viewport};

use super::page::Page;

/// Discrete UI state derived from the scroll position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Derived {
    pub active_section: Option<usize>,
    pub active_frame: Option<usize>,
    pub nav_floating: bool,
}

pub struct PageView<V: Viewport, C: Clock> {
    viewport: V,
    scroller: SmoothScroller<C>,
    tracker: SectionTracker,
    backdrop: ScrollObserver<Option<usize>>,
    nav: ScrollObserver<bool>,
    derived: Derived,
    options: ScrollOptions,
    dirty: Rc<Cell<bool>>,
    subscription: Subscription,
}

impl<V: Viewport, C: Clock> PageView<V, C> {
    /// Attach to `viewport` and compute the initial state.
    pub fn mount(viewport: V, clock: C, page: &Page, options: ScrollOptions) -> Result<Self, TrackerError> {
        let tracker = SectionTracker::new(page.scroll_sections()?)?.with_policy(first_in_view_wins);

        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = viewport.subscribe(Box::new(move |_| flag.set(true)));

        let mut view = Self {
            viewport,
            scroller: SmoothScroller::new(clock),
            tracker,
            backdrop: observer::background_frame(BackgroundSelector::new(
                page.backdrop.container,
                page.backdrop.frames.len(),
            )),
            nav: observer::nav_should_float(page.float_after),
            derived: Derived::default(),
            options,
            dirty,
            subscription,
        };
        view.on_frame();
        Ok(view)
    }

    /// Deliver one animation frame.  Returns `true` while an animation is
    /// still running.
    pub fn on_frame(&mut self) -> bool {
        let animating = self.scroller.on_frame(&mut self.viewport);

        if self.dirty.replace(false) {
            self.tracker.observe(&self.viewport);
            if let Some(frame) = self.backdrop.sample(&self.viewport) {
                tracing::debug!("backdrop frame -> {frame:?}");
                self.derived.active_frame = frame;
            }
            if let Some(floating) = self.nav.sample(&self.viewport) {
                tracing::debug!("nav floating -> {floating}");
                self.derived.nav_floating = floating;
            }
        }
        if let Some(change) = self.tracker.commit() {
            self.derived.active_section = change.current;
        }

        animating
    }

    /// Smooth-scroll to a section by id.  Unknown ids do nothing.
    pub fn navigate(&mut self, section_id: &str) -> ScrollOutcome {
        self.tracker
            .navigate(section_id, &mut self.viewport, &mut self.scroller, self.options)
    }

    /// Navigate `step` sections away from the active one.
    pub fn step_section(&mut self, step: isize) -> ScrollOutcome {
        let Some(idx) = self.tracker.neighbor(step) else {
            return ScrollOutcome::Skipped;
        };
        let id = self.tracker.sections()[idx].id.clone();
        self.navigate(&id)
    }

    pub fn scroll_to_top(&mut self) -> ScrollOutcome {
        self.scroller
            .scroll_to_position(&mut self.viewport, 0.0, self.options)
    }

    /// Manual scroll.  Takes over from any running animation.
    pub fn scroll_by(&mut self, delta: f64) {
        self.scroller.cancel();
        let offset = self.viewport.scroll_offset();
        self.viewport.set_scroll_offset(offset + delta);
    }

    /// Detach from the viewport.  Any running animation is cancelled and
    /// the scroll listener released, so the returned viewport is never
    /// written by this view again.
    pub fn unmount(self) -> V {
        let PageView {
            viewport,
            mut scroller,
            subscription,
            ..
        } = self;
        scroller.cancel();
        drop(subscription);
        viewport
    }

    pub fn derived(&self) -> Derived {
        self.derived
    }

    pub fn sections(&self) -> &[ScrollSection] {
        self.tracker.sections()
    }

    pub fn active_section(&self) -> Option<&ScrollSection> {
        self.tracker.active_section()
    }

    pub fn is_animating(&self) -> bool {
        self.scroller.is_animating()
    }

    /// Scroll notices arrived since the last frame.
    pub fn needs_sample(&self) -> bool {
        self.dirty.get()
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Resize and similar host-side changes.  Scroll writes should go
    /// through [`scroll_by`](Self::scroll_by) or navigation instead.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }
}
