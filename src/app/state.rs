//! Central application state.
//!
//! The page view owns everything scroll-related; this struct adds the
//! host-level bits around it (config, quit flag, status line).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::scroller::{AnimationHandle, ScrollOutcome};
use crate::core::viewport::MonotonicClock;

use super::page::Page;
use super::page_view::PageView;
use super::viewport::TerminalViewport;

pub type TerminalPage = PageView<TerminalViewport, MonotonicClock>;

/// Top-level application state.
pub struct AppState {
    /// The mounted page and its scroll-derived state.
    pub page: TerminalPage,
    /// Static content being previewed.
    pub site: &'static Page,
    /// User-configurable keybindings and animation settings.
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Full terminal area from the last draw (for mouse hit-testing).
    pub terminal_area: Rect,
    /// Handle to the scroll animation started by the last navigation.
    pub scroll: Option<AnimationHandle>,
}

impl AppState {
    pub fn new(page: TerminalPage, site: &'static Page, config: AppConfig) -> Self {
        Self {
            page,
            site,
            config,
            should_quit: false,
            status_message: None,
            terminal_area: Rect::default(),
            scroll: None,
        }
    }

    /// Remember the animation a scroll request started.  A skipped request
    /// leaves the running one alone; anything else replaced it.
    pub fn track(&mut self, outcome: ScrollOutcome) -> ScrollOutcome {
        match &outcome {
            ScrollOutcome::Skipped => {}
            ScrollOutcome::Jumped { target } => {
                tracing::debug!("snapped to {target:.1}");
                self.scroll = None;
            }
            ScrollOutcome::Animating(_) => self.scroll = outcome.handle().cloned(),
        }
        outcome
    }

    /// Stop the tracked animation, if it is still running.
    pub fn cancel_scroll(&mut self) {
        if let Some(handle) = self.scroll.take() {
            if !handle.is_cancelled() {
                tracing::debug!("cancelling scroll gen={}", handle.generation());
                handle.cancel();
            }
        }
    }

    /// A frame is due: the scroller asked for one, or scroll notices are
    /// waiting to be sampled.
    pub fn frame_pending(&self) -> bool {
        self.page.viewport().frame_requested() || self.page.needs_sample()
    }

    /// Deliver the pending frame.
    pub fn run_frame(&mut self) {
        self.page.viewport_mut().take_frame_request();
        let before = self.page.derived().active_section;
        if !self.page.on_frame() {
            self.scroll = None;
        }
        if self.page.derived().active_section != before {
            self.status_message = self
                .page
                .active_section()
                .map(|s| format!("→ {}", s.label));
        }
    }
}
