//! [`Viewport`] backed by a laid-out [`Document`] shown in the terminal.
//!
//! The fixed navigation bar overlays the top rows of the page area, the same
//! way a fixed header overlays a web page.

use crate::core::listener::{ListenerSet, Subscription};
use crate::core::viewport::{Bounds, ScrollNotice, Viewport};

use super::document::{Document, ROW_PX};

/// Rows taken by the fixed navigation bar.
pub const NAV_ROWS: u16 = 3;

pub struct TerminalViewport {
    document: Document,
    offset: f64,
    /// Page area height in px.
    height: f64,
    listeners: ListenerSet<ScrollNotice>,
    frame_requested: bool,
}

impl TerminalViewport {
    pub fn new(document: Document, rows: u16) -> Self {
        Self {
            document,
            offset: 0.0,
            height: rows as f64 * ROW_PX,
            listeners: ListenerSet::new(),
            frame_requested: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Page area changed height.  Re-clamps the offset and notifies.
    pub fn resize(&mut self, rows: u16) {
        self.height = rows as f64 * ROW_PX;
        self.offset = self.offset.clamp(0.0, self.max_offset());
        self.listeners.emit(&ScrollNotice::Resized {
            height: self.height,
        });
    }

    /// First document row on screen.
    pub fn first_row(&self) -> u32 {
        (self.offset / ROW_PX).round() as u32
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Consume the pending frame request before delivering the frame.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Fraction of the document scrolled, for the status bar.
    pub fn scrolled_fraction(&self) -> f64 {
        let max = self.max_offset();
        if max <= 0.0 {
            1.0
        } else {
            self.offset / max
        }
    }

    fn max_offset(&self) -> f64 {
        (self.document.height - self.height).max(0.0)
    }
}

impl Viewport for TerminalViewport {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        let clamped = offset.clamp(0.0, self.max_offset());
        if clamped == self.offset {
            return;
        }
        self.offset = clamped;
        self.listeners.emit(&ScrollNotice::Scrolled { offset: clamped });
    }

    fn viewport_height(&self) -> f64 {
        self.height
    }

    fn element_bounds(&self, id: &str) -> Option<Bounds> {
        self.document
            .block(id)
            .map(|b| Bounds::new(b.top - self.offset, b.height))
    }

    fn header_height(&self) -> Option<f64> {
        // The nav is only drawn when there is room below it.
        (self.height > NAV_ROWS as f64 * ROW_PX).then_some(NAV_ROWS as f64 * ROW_PX)
    }

    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn subscribe(&self, listener: Box<dyn FnMut(&ScrollNotice)>) -> Subscription {
        self.listeners.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::SITE;
    use std::cell::Cell;
    use std::rc::Rc;

    fn viewport(rows: u16) -> TerminalViewport {
        TerminalViewport::new(Document::layout(&SITE), rows)
    }

    #[test]
    fn offsets_are_clamped_to_document() {
        let mut vp = viewport(40);
        vp.set_scroll_offset(-100.0);
        assert_eq!(vp.scroll_offset(), 0.0);

        vp.set_scroll_offset(1e9);
        let max = vp.document().height - 40.0 * ROW_PX;
        assert_eq!(vp.scroll_offset(), max);
        assert_eq!(vp.scrolled_fraction(), 1.0);
    }

    #[test]
    fn bounds_are_viewport_relative() {
        let mut vp = viewport(40);
        let top = vp.document().block("about").unwrap().top;
        vp.set_scroll_offset(100.0);
        assert_eq!(vp.element_bounds("about").unwrap().top, top - 100.0);
        assert!(vp.element_bounds("pricing").is_none());
    }

    #[test]
    fn writes_and_resizes_notify_subscribers() {
        let mut vp = viewport(40);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = vp.subscribe(Box::new(move |_| h.set(h.get() + 1)));

        vp.set_scroll_offset(32.0);
        vp.set_scroll_offset(32.0); // unchanged: no notice
        vp.resize(30);
        assert_eq!(hits.get(), 2);

        drop(sub);
        vp.set_scroll_offset(64.0);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn frame_requests_are_consumed_once() {
        let mut vp = viewport(40);
        assert!(!vp.take_frame_request());
        vp.request_frame();
        assert!(vp.frame_requested());
        assert!(vp.take_frame_request());
        assert!(!vp.take_frame_request());
    }

    #[test]
    fn tiny_terminal_has_no_header() {
        assert_eq!(viewport(3).header_height(), None);
        assert_eq!(viewport(40).header_height(), Some(48.0));
    }
}
