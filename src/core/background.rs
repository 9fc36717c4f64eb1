//! Scroll-through progress of a container mapped onto a sequence of
//! background frames.
//!
//! Progress is 0 when the container's top edge enters at the bottom of the
//! viewport and 1 when its bottom edge leaves at the top.  Exactly one frame
//! is shown at any progress; frames switch with binary opacity and any
//! visual blending is left to the renderer.

use super::viewport::{Bounds, Viewport};

/// Normalised `0..=1` progress of `bounds` scrolling through a viewport.
pub fn scroll_through_progress(bounds: Bounds, viewport_height: f64) -> f64 {
    let range = bounds.height + viewport_height;
    if range <= 0.0 {
        return 0.0;
    }
    ((viewport_height - bounds.top) / range).clamp(0.0, 1.0)
}

/// `clamp(floor(progress * frames), 0, frames - 1)`, or `None` when there
/// are no frames.
pub fn active_frame_index(progress: f64, frames: usize) -> Option<usize> {
    if frames == 0 {
        return None;
    }
    let raw = (progress * frames as f64).floor();
    // NaN and negatives fall to the first frame.
    let idx = if raw.is_nan() || raw < 0.0 { 0 } else { raw as usize };
    Some(idx.min(frames - 1))
}

/// Opacity of frame `index` when `active` is showing.
pub fn frame_opacity(index: usize, active: Option<usize>) -> f32 {
    if active == Some(index) {
        1.0
    } else {
        0.0
    }
}

/// A container anchor paired with its frame count.
#[derive(Debug, Clone)]
pub struct BackgroundSelector {
    pub container: String,
    pub frames: usize,
}

impl BackgroundSelector {
    pub fn new(container: impl Into<String>, frames: usize) -> Self {
        Self {
            container: container.into(),
            frames,
        }
    }

    /// Progress of the container, or `None` when it is not mounted.
    pub fn progress(&self, viewport: &dyn Viewport) -> Option<f64> {
        viewport
            .element_bounds(&self.container)
            .map(|b| scroll_through_progress(b, viewport.viewport_height()))
    }

    /// Frame to show for the current geometry.  An unmounted container
    /// shows the first frame.
    pub fn active_frame(&self, viewport: &dyn Viewport) -> Option<usize> {
        active_frame_index(self.progress(viewport).unwrap_or(0.0), self.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{approx, FakeViewport};

    #[test]
    fn index_is_floor_of_scaled_progress() {
        assert_eq!(active_frame_index(0.0, 4), Some(0));
        assert_eq!(active_frame_index(0.249, 4), Some(0));
        assert_eq!(active_frame_index(0.25, 4), Some(1));
        assert_eq!(active_frame_index(0.999, 4), Some(3));
    }

    #[test]
    fn full_progress_clamps_to_last_frame() {
        assert_eq!(active_frame_index(1.0, 4), Some(3));
        assert_eq!(active_frame_index(3.0, 4), Some(3));
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(active_frame_index(0.5, 0), None);
        assert_eq!(active_frame_index(-0.2, 3), Some(0));
        assert_eq!(active_frame_index(f64::NAN, 3), Some(0));
        assert_eq!(active_frame_index(0.7, 1), Some(0));
    }

    #[test]
    fn exactly_one_frame_is_opaque() {
        for p in [0.0, 0.1, 0.34, 0.5, 0.9, 1.0] {
            let active = active_frame_index(p, 3);
            let visible: f32 = (0..3).map(|i| frame_opacity(i, active)).sum();
            assert_eq!(visible, 1.0, "p={p}");
        }
    }

    #[test]
    fn progress_spans_enter_to_exit() {
        let vh = 200.0;
        assert_eq!(scroll_through_progress(Bounds::new(200.0, 400.0), vh), 0.0);
        assert_eq!(scroll_through_progress(Bounds::new(500.0, 400.0), vh), 0.0);
        assert!(approx(scroll_through_progress(Bounds::new(-100.0, 400.0), vh), 0.5));
        assert_eq!(scroll_through_progress(Bounds::new(-400.0, 400.0), vh), 1.0);
        assert_eq!(scroll_through_progress(Bounds::new(-900.0, 400.0), vh), 1.0);
    }

    #[test]
    fn even_scroll_steps_walk_through_three_frames() {
        // Container of 400 px in a 200 px viewport: 600 px of scroll-through.
        let mut vp = FakeViewport::new(200.0, 5000.0).with_anchor("energy", 1200.0, 400.0);
        let selector = BackgroundSelector::new("energy", 3);

        let mut seen = Vec::new();
        for step in 0..6 {
            // Container top at the viewport bottom, then 100 px per step.
            vp.offset = 1000.0 + 100.0 * step as f64;
            seen.push(selector.active_frame(&vp).unwrap());
        }
        assert_eq!(seen, vec![0, 0, 1, 1, 2, 2]);

        vp.offset = 1600.0;
        assert!(approx(selector.progress(&vp).unwrap(), 1.0));
        assert_eq!(selector.active_frame(&vp), Some(2));
    }

    #[test]
    fn missing_container_shows_first_frame() {
        let vp = FakeViewport::new(200.0, 5000.0);
        let selector = BackgroundSelector::new("energy", 3);
        assert_eq!(selector.progress(&vp), None);
        assert_eq!(selector.active_frame(&vp), Some(0));
    }
}
