//! Eased scroll animation with a retargetable convergence loop.
//!
//! Input samplers only move `target`; a frame tick moves `current` a fixed
//! fraction of the remaining distance and snaps once the gap falls under
//! half a row. Ticks are requested through [`TickScheduler`], so the loop
//! can ride any timer source — the app's frame pump in production, a
//! hand-driven fake in tests.

use std::time::Instant;

/// Gap (in rows) under which the animation snaps to its target and stops.
const SNAP_THRESHOLD: f32 = 0.5;

/// Single-shot animation frame scheduler.
///
/// `schedule` coalesces: requesting a tick while one is pending keeps
/// exactly one pending tick.
pub trait TickScheduler {
    /// Request one future tick. No-op while a tick is already pending.
    fn schedule(&mut self);
    /// Revoke the pending tick, if any.
    fn cancel(&mut self);
}

/// Tuning knobs for the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTuning {
    /// Fraction of the remaining distance covered per tick, in `(0, 1]`.
    pub ease: f32,
    /// Scale applied to wheel deltas.
    pub mouse_multiplier: f32,
    /// Scale applied to drag deltas.
    pub touch_multiplier: f32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            ease: 0.12,
            mouse_multiplier: 1.0,
            touch_multiplier: 2.0,
        }
    }
}

/// Eased scroll animator.
///
/// `target` is where the viewport wants to be, `current` is how far the
/// animation has reached. Samplers ([`wheel`](Self::wheel),
/// [`drag_move`](Self::drag_move), [`scroll_to`](Self::scroll_to)) write
/// only `target`; [`tick`](Self::tick) writes only `current`.
#[derive(Debug)]
pub struct SmoothScroll {
    tuning: ScrollTuning,
    /// Desired offset in rows. Clamped to `[0, max_scroll]` at every write.
    target: f32,
    /// Animated offset in rows, converging toward `target`.
    current: f32,
    /// True from the first sample until the snap (or shutdown).
    animating: bool,
    /// Row of the last drag sample; `None` outside a gesture.
    drag_anchor: Option<f32>,
    /// Convergence steps since the animation started (settle log).
    ticks: u32,
    started: Option<Instant>,
}

impl SmoothScroll {
    /// Create an animator at rest at `origin` rows.
    pub fn new(tuning: ScrollTuning, origin: f32) -> Self {
        let mut tuning = tuning;
        tuning.ease = tuning.ease.clamp(0.01, 1.0);
        Self {
            tuning,
            target: origin,
            current: origin,
            animating: false,
            drag_anchor: None,
            ticks: 0,
            started: None,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Where the animation is headed (rows).
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Sample a wheel notch. `delta_rows` is the raw notch size; the
    /// mouse multiplier is applied here. `max_scroll` must reflect the
    /// content/viewport geometry at the moment of the sample.
    pub fn wheel<S: TickScheduler>(&mut self, delta_rows: f32, max_scroll: f32, sched: &mut S) {
        let delta = delta_rows * self.tuning.mouse_multiplier;
        self.retarget(self.target + delta, max_scroll, sched);
    }

    /// Begin a drag gesture at `row`. Nothing moves until the first
    /// [`drag_move`](Self::drag_move).
    pub fn drag_start(&mut self, row: f32) {
        self.drag_anchor = Some(row);
    }

    /// Sample a drag movement. Content follows the pointer (dragging up
    /// scrolls down); the anchor advances so each move contributes its
    /// increment once. Ignored when no gesture is active.
    pub fn drag_move<S: TickScheduler>(&mut self, row: f32, max_scroll: f32, sched: &mut S) {
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        let delta = (anchor - row) * self.tuning.touch_multiplier;
        self.drag_anchor = Some(row);
        self.retarget(self.target + delta, max_scroll, sched);
    }

    /// End the drag gesture. A running animation finishes on its own.
    pub fn drag_end(&mut self) {
        self.drag_anchor = None;
    }

    /// Programmatic retarget — animated jumps, follow mode.
    pub fn scroll_to<S: TickScheduler>(&mut self, row: f32, max_scroll: f32, sched: &mut S) {
        self.retarget(row, max_scroll, sched);
    }

    fn retarget<S: TickScheduler>(&mut self, target: f32, max_scroll: f32, sched: &mut S) {
        self.target = target.clamp(0.0, max_scroll.max(0.0));
        if !self.animating {
            self.animating = true;
            self.ticks = 0;
            self.started = Some(Instant::now());
            sched.schedule();
        }
    }

    /// Advance one frame. Returns the rounded row to apply to the
    /// viewport, or `None` for a stale tick arriving after cancel.
    ///
    /// Reschedules itself until the gap snaps shut; on snap the pending
    /// tick is cancelled and the animation stops with `current == target`.
    pub fn tick<S: TickScheduler>(&mut self, sched: &mut S) -> Option<f32> {
        if !self.animating {
            return None;
        }
        self.ticks += 1;
        self.current += (self.target - self.current) * self.tuning.ease;
        if (self.current - self.target).abs() < SNAP_THRESHOLD {
            self.current = self.target;
            self.animating = false;
            sched.cancel();
            if let Some(started) = self.started.take() {
                tracing::debug!(
                    "scroll settled: {} ticks {:.2?} row={}",
                    self.ticks,
                    started.elapsed(),
                    self.target
                );
            }
        } else {
            sched.schedule();
        }
        Some(self.current.round())
    }

    /// Adopt a position written natively (keys, scrollbar, clamps) so the
    /// next animation starts from reality. Ignored while animating — the
    /// convergence loop stays the sole authority until it settles.
    pub fn sync_native(&mut self, row: f32) {
        if self.animating {
            return;
        }
        self.target = row;
        self.current = row;
    }

    /// Stop everything: drop the gesture, cancel the pending tick. A
    /// stray tick afterwards returns `None` and schedules nothing.
    pub fn shutdown<S: TickScheduler>(&mut self, sched: &mut S) {
        self.animating = false;
        self.drag_anchor = None;
        self.started = None;
        sched.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-driven scheduler: tracks the pending flag and how many times
    /// a tick was actually armed.
    #[derive(Default)]
    struct ManualScheduler {
        pending: bool,
        armed: usize,
    }

    impl TickScheduler for ManualScheduler {
        fn schedule(&mut self) {
            if !self.pending {
                self.pending = true;
                self.armed += 1;
            }
        }

        fn cancel(&mut self) {
            self.pending = false;
        }
    }

    impl ManualScheduler {
        /// Consume the pending tick and run one engine step.
        fn fire(&mut self, scroll: &mut SmoothScroll) -> Option<f32> {
            assert!(self.pending, "fired without a scheduled tick");
            self.pending = false;
            scroll.tick(self)
        }
    }

    fn rig() -> (SmoothScroll, ManualScheduler) {
        (
            SmoothScroll::new(ScrollTuning::default(), 0.0),
            ManualScheduler::default(),
        )
    }

    #[test]
    fn wheel_clamps_target_to_bounds() {
        let (mut scroll, mut sched) = rig();
        scroll.wheel(-30.0, 100.0, &mut sched);
        assert_eq!(scroll.target(), 0.0);
        scroll.wheel(1_000_000.0, 100.0, &mut sched);
        assert_eq!(scroll.target(), 100.0);
    }

    #[test]
    fn wheel_applies_mouse_multiplier() {
        let tuning = ScrollTuning {
            mouse_multiplier: 2.5,
            ..ScrollTuning::default()
        };
        let mut scroll = SmoothScroll::new(tuning, 0.0);
        let mut sched = ManualScheduler::default();
        scroll.wheel(3.0, 100.0, &mut sched);
        assert_eq!(scroll.target(), 7.5);
    }

    #[test]
    fn drag_scales_deltas_and_advances_anchor() {
        let (mut scroll, mut sched) = rig();
        scroll.drag_start(20.0);
        scroll.drag_move(10.0, 100.0, &mut sched);
        // (20 - 10) * touch_multiplier 2.0
        assert_eq!(scroll.target(), 20.0);
        scroll.drag_move(5.0, 100.0, &mut sched);
        assert_eq!(scroll.target(), 30.0);
        scroll.drag_end();
        scroll.drag_move(0.0, 100.0, &mut sched);
        assert_eq!(scroll.target(), 30.0, "move after release must not retarget");
    }

    #[test]
    fn drag_move_without_gesture_is_ignored() {
        let (mut scroll, mut sched) = rig();
        scroll.drag_move(50.0, 100.0, &mut sched);
        assert_eq!(scroll.target(), 0.0);
        assert!(!scroll.is_animating());
        assert!(!sched.pending);
    }

    #[test]
    fn resampling_keeps_a_single_pending_tick() {
        let (mut scroll, mut sched) = rig();
        scroll.wheel(3.0, 100.0, &mut sched);
        scroll.wheel(3.0, 100.0, &mut sched);
        scroll.scroll_to(90.0, 100.0, &mut sched);
        assert!(sched.pending);
        assert_eq!(sched.armed, 1, "retargets must not stack extra ticks");
    }

    #[test]
    fn first_tick_covers_the_ease_fraction() {
        let (mut scroll, mut sched) = rig();
        scroll.scroll_to(1000.0, 1000.0, &mut sched);
        let applied = sched.fire(&mut scroll);
        assert_eq!(applied, Some(120.0));
        assert!((scroll.current - 120.0).abs() < 1e-3);
    }

    #[test]
    fn converges_monotonically_and_lands_exactly() {
        let (mut scroll, mut sched) = rig();
        scroll.scroll_to(1000.0, 1000.0, &mut sched);

        let mut ticks = 0;
        let mut last = 0.0f32;
        while scroll.is_animating() {
            let row = sched.fire(&mut scroll).unwrap();
            assert!(row >= last, "animation moved backwards");
            assert!(row <= 1000.0, "animation overshot the target");
            last = row;
            ticks += 1;
            assert!(ticks <= 70, "took too many ticks to settle");
        }

        assert_eq!(scroll.current, 1000.0);
        assert_eq!(last, 1000.0);
        assert!(ticks >= 50, "eased animation settled suspiciously fast");
        assert!(!sched.pending, "no tick may remain after the snap");
    }

    #[test]
    fn zero_distance_sample_settles_on_first_tick() {
        let (mut scroll, mut sched) = rig();
        // Wheel-up at the top: target stays clamped where current already is.
        scroll.wheel(-3.0, 100.0, &mut sched);
        assert!(scroll.is_animating());
        assert_eq!(sched.fire(&mut scroll), Some(0.0));
        assert!(!scroll.is_animating());
        assert!(!sched.pending);
    }

    #[test]
    fn shrinking_max_reclamps_at_the_next_sample() {
        let (mut scroll, mut sched) = rig();
        scroll.scroll_to(100.0, 100.0, &mut sched);
        while scroll.is_animating() {
            sched.fire(&mut scroll);
        }
        // Content shrank: the next sample clamps against the new max.
        scroll.wheel(3.0, 40.0, &mut sched);
        assert_eq!(scroll.target(), 40.0);
    }

    #[test]
    fn sync_native_while_idle_adopts_the_position() {
        let (mut scroll, mut sched) = rig();
        scroll.sync_native(42.0);
        scroll.sync_native(42.0);
        assert_eq!(scroll.target(), 42.0);
        assert_eq!(scroll.current, 42.0);
        // The next wheel is relative to the adopted position.
        scroll.wheel(3.0, 100.0, &mut sched);
        assert_eq!(scroll.target(), 45.0);
    }

    #[test]
    fn sync_native_is_ignored_while_animating() {
        let (mut scroll, mut sched) = rig();
        scroll.scroll_to(500.0, 1000.0, &mut sched);
        sched.fire(&mut scroll);
        scroll.sync_native(999.0);
        assert_eq!(scroll.target(), 500.0);
        assert!(scroll.is_animating());
    }

    #[test]
    fn shutdown_cancels_the_pending_tick() {
        let (mut scroll, mut sched) = rig();
        scroll.scroll_to(500.0, 1000.0, &mut sched);
        assert!(sched.pending);
        scroll.shutdown(&mut sched);
        assert!(!sched.pending);
        assert!(!scroll.is_animating());
        // A stray tick after shutdown is inert.
        assert_eq!(scroll.tick(&mut sched), None);
        assert!(!sched.pending);
    }

    #[test]
    fn out_of_range_ease_is_clamped() {
        let tuning = ScrollTuning {
            ease: 5.0,
            ..ScrollTuning::default()
        };
        let mut scroll = SmoothScroll::new(tuning, 0.0);
        let mut sched = ManualScheduler::default();
        scroll.scroll_to(1000.0, 1000.0, &mut sched);
        // ease capped at 1.0: a single tick lands on the target.
        assert_eq!(sched.fire(&mut scroll), Some(1000.0));
        assert!(!scroll.is_animating());
    }
}
