//! Time-based smooth scroll with cubic ease-in-out.
//!
//! A scroll request jumps part of the way on the calling frame (so movement
//! is visible immediately) and then eases the rest of the distance over the
//! configured duration.  Each frame evaluates the curve fresh from the start
//! time, so there is no drift from accumulated steps.
//!
//! Every request supersedes the previous one: the old animation's cancel
//! flag is raised and the generation counter moves on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::easing::ease_in_out_cubic;
use super::viewport::{Clock, Viewport};

/// Default animation length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1500);
/// Default header compensation subtracted from the target's top.
pub const DEFAULT_OFFSET: f64 = 80.0;
/// Below this distance the scroller snaps instead of animating.
pub const SNAP_DISTANCE: f64 = 5.0;
/// Eased progress applied synchronously on the calling frame.
pub const INITIAL_JUMP_PROGRESS: f64 = 0.3;

// ───────────────────────────────────────── options ───────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOptions {
    /// Subtracted from the target's document position.  Negative values
    /// land below the target.
    pub offset: f64,
    pub duration: Duration,
    /// Linear progress (0..=1) whose eased value is applied on the calling
    /// frame.
    pub initial_jump: f64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            duration: DEFAULT_DURATION,
            initial_jump: INITIAL_JUMP_PROGRESS,
        }
    }
}

impl ScrollOptions {
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

// ───────────────────────────────────────── handle ────────────

/// Caller-side handle to an in-flight animation.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    generation: u64,
    cancel: Arc<AtomicBool>,
}

impl AnimationHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the animation.  The next frame drops it without writing.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// What a [`SmoothScroller::scroll_to`] call did.
#[derive(Debug, Clone)]
pub enum ScrollOutcome {
    /// The target was missing; nothing was written.
    Skipped,
    /// The distance was too small to animate; the target was written once.
    Jumped { target: f64 },
    /// An animation is running.
    Animating(AnimationHandle),
}

impl ScrollOutcome {
    pub fn handle(&self) -> Option<&AnimationHandle> {
        match self {
            ScrollOutcome::Animating(h) => Some(h),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── animation ─────────

/// Parameters of one animation.  Read-only after creation.
#[derive(Debug, Clone)]
pub struct ScrollAnimation {
    /// Offset at the moment of the request (before the initial jump).
    pub origin: f64,
    /// Offset the eased curve starts from (after the initial jump).
    pub start_position: f64,
    pub target_position: f64,
    pub distance: f64,
    pub start_time: Duration,
    pub duration: Duration,
    generation: u64,
    cancel: Arc<AtomicBool>,
}

impl ScrollAnimation {
    /// Linear progress at `now`, in `[0, 1]`.  A zero duration is already done.
    pub fn progress_at(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.start_time);
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Offset on the eased curve for linear `progress`.
    pub fn position_at(&self, progress: f64) -> f64 {
        if progress >= 1.0 {
            self.target_position
        } else {
            self.start_position + self.distance * ease_in_out_cubic(progress)
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

// ───────────────────────────────────────── scroller ──────────

/// Drives at most one scroll animation against a [`Viewport`].
pub struct SmoothScroller<C: Clock> {
    clock: C,
    current: Option<ScrollAnimation>,
    /// Bumped on every request; identifies the latest animation.
    generation: u64,
}

impl<C: Clock> SmoothScroller<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            current: None,
            generation: 0,
        }
    }

    /// Scroll so the element anchored at `target` sits `options.offset`
    /// below the viewport top.  A missing target is a silent no-op.
    pub fn scroll_to(
        &mut self,
        viewport: &mut dyn Viewport,
        target: Option<&str>,
        options: ScrollOptions,
    ) -> ScrollOutcome {
        let Some(bounds) = target.and_then(|id| viewport.element_bounds(id)) else {
            tracing::debug!("scroll_to: target {:?} not mounted", target);
            return ScrollOutcome::Skipped;
        };

        let start = viewport.scroll_offset();
        let target_position = bounds.top + start - options.offset;
        self.scroll_to_position(viewport, target_position, options)
    }

    /// Same as [`scroll_to`](Self::scroll_to) with an absolute document
    /// position instead of an anchor.
    pub fn scroll_to_position(
        &mut self,
        viewport: &mut dyn Viewport,
        target_position: f64,
        options: ScrollOptions,
    ) -> ScrollOutcome {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);

        let origin = viewport.scroll_offset();
        let distance = target_position - origin;

        if distance.abs() < SNAP_DISTANCE {
            viewport.set_scroll_offset(target_position);
            return ScrollOutcome::Jumped {
                target: target_position,
            };
        }

        let start_time = self.clock.now();
        // Non-finite jumps fall back to no jump.
        let jump = if options.initial_jump.is_finite() {
            options.initial_jump.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let jumped = origin + distance * ease_in_out_cubic(jump);
        viewport.set_scroll_offset(jumped);

        let cancel = Arc::new(AtomicBool::new(false));
        self.current = Some(ScrollAnimation {
            origin,
            start_position: jumped,
            target_position,
            distance: target_position - jumped,
            start_time,
            duration: options.duration,
            generation: self.generation,
            cancel: Arc::clone(&cancel),
        });
        viewport.request_frame();

        tracing::debug!(
            "scroll_to: gen={} {:.1} -> {:.1} over {:?}",
            self.generation,
            origin,
            target_position,
            options.duration
        );

        ScrollOutcome::Animating(AnimationHandle {
            generation: self.generation,
            cancel,
        })
    }

    /// Advance the in-flight animation by one frame.  Returns `true` while
    /// more frames are needed.
    pub fn on_frame(&mut self, viewport: &mut dyn Viewport) -> bool {
        let Some(anim) = self.current.as_ref() else {
            return false;
        };
        if anim.is_cancelled() {
            tracing::debug!("scroll: gen={} cancelled", anim.generation);
            self.current = None;
            return false;
        }

        let progress = anim.progress_at(self.clock.now());
        viewport.set_scroll_offset(anim.position_at(progress));

        if progress < 1.0 {
            viewport.request_frame();
            true
        } else {
            tracing::debug!(
                "scroll: gen={} finished {:.1} -> {:.1}",
                anim.generation,
                anim.origin,
                anim.target_position
            );
            self.current = None;
            false
        }
    }

    /// Cancel whatever is in flight.
    pub fn cancel(&mut self) {
        if let Some(anim) = self.current.take() {
            anim.cancel.store(true, Ordering::Relaxed);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.current.as_ref().is_some_and(|a| !a.is_cancelled())
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&ScrollAnimation> {
        self.current.as_ref()
    }
}

impl<C: Clock> Drop for SmoothScroller<C> {
    fn drop(&mut self) {
        // Outstanding handles must observe the teardown.
        self.cancel();
    }
}
