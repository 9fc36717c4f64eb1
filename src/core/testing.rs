//! Test doubles for [`Viewport`] and [`Clock`].

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use super::listener::{ListenerSet, Subscription};
use super::viewport::{Bounds, Clock, ScrollNotice, Viewport};

/// Clock whose time only moves when the test says so.  Clones share time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<Duration>>);

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ms(&self, ms: u64) {
        self.0.set(Duration::from_millis(ms));
    }

    pub fn advance_ms(&self, ms: u64) {
        self.0.set(self.0.get() + Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.0.get()
    }
}

/// In-memory document: anchors at absolute positions, clamped scrolling,
/// and a log of every offset write and frame request.
pub struct FakeViewport {
    pub offset: f64,
    pub height: f64,
    pub document_height: f64,
    pub header: Option<f64>,
    /// Absolute (document-relative) anchor boxes.
    pub anchors: HashMap<String, Bounds>,
    pub writes: Vec<f64>,
    pub frames_requested: usize,
    listeners: ListenerSet<ScrollNotice>,
}

impl FakeViewport {
    pub fn new(height: f64, document_height: f64) -> Self {
        Self {
            offset: 0.0,
            height,
            document_height,
            header: None,
            anchors: HashMap::new(),
            writes: Vec::new(),
            frames_requested: 0,
            listeners: ListenerSet::new(),
        }
    }

    pub fn with_anchor(mut self, id: &str, top: f64, height: f64) -> Self {
        self.anchors.insert(id.to_string(), Bounds::new(top, height));
        self
    }

    pub fn with_header(mut self, height: f64) -> Self {
        self.header = Some(height);
        self
    }

    /// Move without recording a write (models the user dragging).
    pub fn jump(&mut self, offset: f64) {
        self.offset = offset;
        self.listeners.emit(&ScrollNotice::Scrolled { offset });
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn max_offset(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }
}

impl Viewport for FakeViewport {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_offset());
        self.writes.push(self.offset);
        self.listeners.emit(&ScrollNotice::Scrolled {
            offset: self.offset,
        });
    }

    fn viewport_height(&self) -> f64 {
        self.height
    }

    fn element_bounds(&self, id: &str) -> Option<Bounds> {
        self.anchors
            .get(id)
            .map(|b| Bounds::new(b.top - self.offset, b.height))
    }

    fn header_height(&self) -> Option<f64> {
        self.header
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }

    fn subscribe(&self, listener: Box<dyn FnMut(&ScrollNotice)>) -> Subscription {
        self.listeners.subscribe(listener)
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
