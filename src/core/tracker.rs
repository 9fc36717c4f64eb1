//! Section scroll-spy: which navigable section is "active".
//!
//! Every section is checked on its own (an intersection test against the
//! viewport), then an [`ActivationPolicy`] picks a single winner from the
//! resulting flags.  Observations are recorded immediately but only
//! committed on the next frame, so a burst of scroll notices within one
//! frame produces at most one change.

use std::collections::HashSet;

use super::error::TrackerError;
use super::scroller::{ScrollOptions, ScrollOutcome, SmoothScroller, DEFAULT_OFFSET};
use super::viewport::{Bounds, Clock, Viewport};

// ───────────────────────────────────────── sections ──────────

/// One navigable section of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSection {
    /// Anchor id in the document; also the lookup key.
    pub id: String,
    pub label: String,
    /// Fraction of the section's own height that must be on screen.
    pub threshold: f64,
}

impl ScrollSection {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        threshold: f64,
    ) -> Result<Self, TrackerError> {
        let id = id.into();
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(TrackerError::InvalidThreshold {
                id,
                value: threshold,
            });
        }
        Ok(Self {
            id,
            label: label.into(),
            threshold,
        })
    }
}

/// Whether `bounds` shows at least `threshold` of its height inside a
/// viewport of `viewport_height`.
pub fn in_view(bounds: Bounds, viewport_height: f64, threshold: f64) -> bool {
    if bounds.height <= 0.0 {
        return false;
    }
    bounds.visible_height(viewport_height) >= threshold * bounds.height
}

// ───────────────────────────────────────── policy ────────────

/// Resolves per-section "in view" flags to at most one active index.
pub type ActivationPolicy = fn(&[bool]) -> Option<usize>;

/// The earliest declared section that is in view wins, regardless of how
/// much of any later section is visible.
pub fn first_in_view_wins(flags: &[bool]) -> Option<usize> {
    flags.iter().position(|&f| f)
}

// ───────────────────────────────────────── tracker ───────────

/// Reported by [`SectionTracker::commit`] when the active section changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveChange {
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

pub struct SectionTracker {
    sections: Vec<ScrollSection>,
    policy: ActivationPolicy,
    in_view: Vec<bool>,
    active: Option<usize>,
    /// Candidate from the latest observation, waiting for the next frame.
    pending: Option<Option<usize>>,
}

impl SectionTracker {
    pub fn new(sections: Vec<ScrollSection>) -> Result<Self, TrackerError> {
        let mut seen = HashSet::new();
        for s in &sections {
            if !seen.insert(s.id.as_str()) {
                return Err(TrackerError::DuplicateSection(s.id.clone()));
            }
        }
        let n = sections.len();
        Ok(Self {
            sections,
            policy: first_in_view_wins,
            in_view: vec![false; n],
            active: None,
            pending: None,
        })
    }

    pub fn with_policy(mut self, policy: ActivationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn sections(&self) -> &[ScrollSection] {
        &self.sections
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_section(&self) -> Option<&ScrollSection> {
        self.active.and_then(|i| self.sections.get(i))
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Flags from the most recent observation.
    #[cfg(test)]
    pub fn in_view_flags(&self) -> &[bool] {
        &self.in_view
    }

    /// Evaluate every section against the viewport and stage the winner.
    pub fn observe(&mut self, viewport: &dyn Viewport) {
        let vh = viewport.viewport_height();
        for (flag, section) in self.in_view.iter_mut().zip(&self.sections) {
            *flag = viewport
                .element_bounds(&section.id)
                .is_some_and(|b| in_view(b, vh, section.threshold));
        }
        self.pending = Some((self.policy)(&self.in_view));
    }

    /// Stage a candidate from externally computed flags.
    #[cfg(test)]
    pub fn stage(&mut self, flags: &[bool]) {
        self.pending = Some((self.policy)(flags));
    }

    /// Apply the staged candidate.  Returns the change, if any.
    pub fn commit(&mut self) -> Option<ActiveChange> {
        let candidate = self.pending.take()?;
        if candidate == self.active {
            return None;
        }
        let change = ActiveChange {
            previous: self.active,
            current: candidate,
        };
        self.active = candidate;
        tracing::debug!(
            "active section: {:?} -> {:?}",
            change.previous.map(|i| &self.sections[i].id),
            change.current.map(|i| &self.sections[i].id),
        );
        Some(change)
    }

    /// Index `step` positions away from the active section, clamped to the
    /// list.  With nothing active, stepping starts from the top.
    pub fn neighbor(&self, step: isize) -> Option<usize> {
        if self.sections.is_empty() {
            return None;
        }
        let last = self.sections.len() - 1;
        let idx = match self.active {
            Some(i) => (i as isize + step).clamp(0, last as isize) as usize,
            None if step < 0 => 0,
            None => (step - 1).clamp(0, last as isize) as usize,
        };
        Some(idx)
    }

    /// Smooth-scroll to `section_id`, leaving room for the fixed header.
    pub fn navigate<C: Clock>(
        &self,
        section_id: &str,
        viewport: &mut dyn Viewport,
        scroller: &mut SmoothScroller<C>,
        options: ScrollOptions,
    ) -> ScrollOutcome {
        let Some(idx) = self.index_of(section_id) else {
            tracing::debug!("navigate: unknown section {section_id:?}");
            return ScrollOutcome::Skipped;
        };
        let offset = nav_offset(viewport);
        scroller.scroll_to(
            viewport,
            Some(self.sections[idx].id.as_str()),
            options.with_offset(offset),
        )
    }
}

/// Height of the rendered header, or [`DEFAULT_OFFSET`] without one.
pub fn nav_offset(viewport: &dyn Viewport) -> f64 {
    viewport.header_height().unwrap_or(DEFAULT_OFFSET)
}
