//! Frame Loop
//!
//! Turns wall-clock time into per-frame deltas and drives [`Sandbox::tick`].
//! The time source is injected so tests can step frames deterministically.

use std::time::{Duration, Instant};

use crate::sandbox::Sandbox;

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn advance_secs(&mut self, seconds: f32) {
        self.advance(Duration::from_secs_f32(seconds));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

#[derive(Debug)]
pub struct FrameLoop<C: Clock> {
    clock: C,
    last_frame: Duration,
    max_delta: f32,
    frame_count: u64,
    // FPS tracking
    fps: f32,
    frames_since_fps: u32,
    last_fps_update: Duration,
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(clock: C, max_delta: f32) -> Self {
        let now = clock.now();
        Self {
            clock,
            last_frame: now,
            max_delta,
            frame_count: 0,
            fps: 0.0,
            frames_since_fps: 0,
            last_fps_update: now,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed once a second.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Seconds since the previous call, clamped to `[0, max_delta]`.
    pub fn next_delta(&mut self) -> f32 {
        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        self.frames_since_fps += 1;
        let since_fps = now.saturating_sub(self.last_fps_update).as_secs_f32();
        if since_fps >= 1.0 {
            self.fps = self.frames_since_fps as f32 / since_fps;
            self.frames_since_fps = 0;
            self.last_fps_update = now;
        }

        elapsed.clamp(0.0, self.max_delta)
    }

    /// Runs one frame and returns the delta it used.
    pub fn step(&mut self, sandbox: &mut Sandbox) -> f32 {
        let dt = self.next_delta();
        sandbox.tick(dt);
        dt
    }
}

impl FrameLoop<SystemClock> {
    pub fn system(max_delta: f32) -> Self {
        Self::new(SystemClock::new(), max_delta)
    }
}
