//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual natively)
//! - Converting frame timestamps into fixed simulation ticks
//! - Wall-clock timestamps for leaderboard rows

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{MAX_SUBSTEPS, SIM_DT_MS};

/// Longest frame gap fed into the accumulator (a backgrounded tab)
const MAX_FRAME_GAP_MS: f64 = 100.0;

/// Something that can run a callback on the next display frame
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Schedule the frame callback. `None` if the platform refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Cancel a scheduled callback so it never runs
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// What a frame step wants to happen next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Owns the single pending frame of a running session
///
/// At most one frame is ever pending. Stopping cancels it synchronously, so
/// no step runs after [`LoopDriver::stop`] returns.
#[derive(Debug)]
pub struct LoopDriver<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> LoopDriver<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Schedule the next frame unless one is already pending.
    /// Returns true if a frame is pending afterwards.
    pub fn start(&mut self) -> bool {
        if self.pending.is_none() {
            self.pending = self.scheduler.request_frame();
            if self.pending.is_some() {
                log::debug!("Frame loop started");
            } else {
                log::warn!("Frame loop could not schedule a frame");
            }
        }
        self.pending.is_some()
    }

    /// Cancel the pending frame, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
            log::debug!("Frame loop stopped");
        }
    }

    /// Run one frame.
    ///
    /// Called from the scheduled callback. The step runs to completion before
    /// the next frame is requested, and only if it asks to continue. A
    /// callback arriving with nothing pending is stale and does nothing.
    pub fn fire<F>(&mut self, step: F) -> LoopControl
    where
        F: FnOnce() -> LoopControl,
    {
        if self.pending.take().is_none() {
            return LoopControl::Stop;
        }
        let control = step();
        if control == LoopControl::Continue && !self.start() {
            return LoopControl::Stop;
        }
        control
    }
}

/// Scheduler driven by hand: native demo and tests
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u32,
    /// Handles requested and not cancelled, oldest first
    pub requested: Vec<u32>,
    pub cancelled: Vec<u32>,
}

impl FrameScheduler for ManualScheduler {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        self.next_id += 1;
        self.requested.push(self.next_id);
        Some(self.next_id)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.requested.retain(|&h| h != handle);
        self.cancelled.push(handle);
    }
}

/// Fixed-timestep accumulator
///
/// Turns display-frame timestamps into a number of whole simulation ticks so
/// per-tick constants keep their meaning on any refresh rate.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    accumulator: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks to run for a frame stamped `now_ms`.
    ///
    /// The first frame after construction or [`FrameClock::reset`] yields
    /// exactly one tick. Never more than `MAX_SUBSTEPS`.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            self.accumulator = 0.0;
            return 1;
        };

        self.accumulator += (now_ms - last).clamp(0.0, MAX_FRAME_GAP_MS);

        let mut steps = 0;
        while self.accumulator >= SIM_DT_MS && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT_MS;
            steps += 1;
        }

        // Drop the backlog rather than chase it next frame
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT_MS);
        }

        steps
    }

    /// Forget the last timestamp (after a pause)
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator = 0.0;
    }
}

/// Current time as an ISO-8601 string, for leaderboard rows
#[cfg(target_arch = "wasm32")]
pub fn now_iso() -> Option<String> {
    js_sys::Date::new_0().to_iso_string().as_string()
}

/// Native builds leave the date to the store
#[cfg(not(target_arch = "wasm32"))]
pub fn now_iso() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_schedules_once() {
        let mut driver = LoopDriver::new(ManualScheduler::default());
        assert!(driver.start());
        assert!(driver.start());
        assert_eq!(driver.scheduler().requested, vec![1]);
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut driver = LoopDriver::new(ManualScheduler::default());
        driver.start();
        driver.stop();
        assert!(!driver.is_running());
        assert!(driver.scheduler().requested.is_empty());
        assert_eq!(driver.scheduler().cancelled, vec![1]);
        // Nothing left to cancel
        driver.stop();
        assert_eq!(driver.scheduler().cancelled, vec![1]);
    }

    #[test]
    fn test_fire_reschedules_on_continue() {
        let mut driver = LoopDriver::new(ManualScheduler::default());
        driver.start();
        let mut ran = 0;
        let control = driver.fire(|| {
            ran += 1;
            LoopControl::Continue
        });
        assert_eq!(control, LoopControl::Continue);
        assert_eq!(ran, 1);
        assert!(driver.is_running());
        assert_eq!(driver.scheduler().requested, vec![1, 2]);
    }

    #[test]
    fn test_fire_stop_does_not_reschedule() {
        let mut driver = LoopDriver::new(ManualScheduler::default());
        driver.start();
        driver.fire(|| LoopControl::Stop);
        assert!(!driver.is_running());
        assert_eq!(driver.scheduler().requested, vec![1]);
    }

    #[test]
    fn test_stale_fire_is_ignored() {
        let mut driver = LoopDriver::new(ManualScheduler::default());
        driver.start();
        driver.stop();
        let mut ran = false;
        let control = driver.fire(|| {
            ran = true;
            LoopControl::Continue
        });
        assert_eq!(control, LoopControl::Stop);
        assert!(!ran);
        assert!(!driver.is_running());
    }

    #[test]
    fn test_first_frame_is_one_tick() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12_345.0), 1);
    }

    #[test]
    fn test_frames_convert_to_ticks() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(SIM_DT_MS * 2.0), 2);
        // Half a tick later nothing is due yet
        assert_eq!(clock.advance(SIM_DT_MS * 2.5), 0);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(1000.0), MAX_SUBSTEPS);
        assert!(clock.advance(1000.0) <= 1);
    }

    #[test]
    fn test_reset_restarts_clock() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(50.0);
        clock.reset();
        assert_eq!(clock.advance(5000.0), 1);
    }

    #[test]
    fn test_native_has_no_clock_date() {
        assert_eq!(now_iso(), None);
    }
}
