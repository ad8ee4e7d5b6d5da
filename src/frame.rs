//! Frame scheduling and timing.
//!
//! The update loop is driven by winit redraw requests; [`FrameScheduler`]
//! decides whether the next frame gets scheduled at all, so the loop has an
//! explicit stop.

use std::time::{Duration, Instant};

/// Monotonic elapsed-time source, started at construction and never reset.
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Gate for the per-refresh update loop.
///
/// While running, every `about_to_wait` requests the next redraw and every
/// redraw advances one frame. `stop()` halts both without tearing anything
/// down; `start()` resumes.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    running: bool,
    frames: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total frames advanced since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Counts one frame if the loop is running. Returns whether the frame
    /// should be processed.
    pub fn begin_frame(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.frames += 1;
        true
    }
}

/// Interval within which two presses count as a double-click.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(350);

/// Detects double-clicks from discrete press events.
///
/// winit exposes no native double-click event; two left-button presses
/// within [`DOUBLE_CLICK_WINDOW`] count as one.
#[derive(Debug, Default)]
pub struct DoubleClickTracker {
    last_press: Option<Instant>,
}

impl DoubleClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press; returns true when it completes a double-click.
    pub fn register(&mut self, at: Instant) -> bool {
        let is_double = self
            .last_press
            .is_some_and(|last| at.duration_since(last) <= DOUBLE_CLICK_WINDOW);

        // A completed double-click resets the tracker so a triple press
        // doesn't toggle twice.
        self.last_press = if is_double { None } else { Some(at) };
        is_double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_gates_frames() {
        let mut scheduler = FrameScheduler::new();
        assert!(!scheduler.begin_frame());
        assert_eq!(scheduler.frames(), 0);

        scheduler.start();
        assert!(scheduler.begin_frame());
        assert!(scheduler.begin_frame());
        assert_eq!(scheduler.frames(), 2);

        scheduler.stop();
        assert!(!scheduler.begin_frame());
        assert_eq!(scheduler.frames(), 2);
    }

    #[test]
    fn test_scheduler_restart_keeps_counting() {
        let mut scheduler = FrameScheduler::new();
        scheduler.start();
        scheduler.begin_frame();
        scheduler.stop();
        scheduler.start();
        scheduler.begin_frame();
        assert_eq!(scheduler.frames(), 2);
    }

    #[test]
    fn test_double_click_within_window() {
        let mut tracker = DoubleClickTracker::new();
        let t0 = Instant::now();
        assert!(!tracker.register(t0));
        assert!(tracker.register(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_slow_presses_are_single_clicks() {
        let mut tracker = DoubleClickTracker::new();
        let t0 = Instant::now();
        assert!(!tracker.register(t0));
        assert!(!tracker.register(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn test_triple_press_toggles_once() {
        let mut tracker = DoubleClickTracker::new();
        let t0 = Instant::now();
        assert!(!tracker.register(t0));
        assert!(tracker.register(t0 + Duration::from_millis(100)));
        assert!(!tracker.register(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = Clock::new();
        let a = clock.elapsed_seconds();
        let b = clock.elapsed_seconds();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
