//! Frame scheduler for the locomotion controller.
//!
//! Stands in for an engine's implicit callbacks: the caller hands over the
//! raw frame delta and the scheduler runs the fixed physics steps owed so far
//! followed by one variable-rate update. Pausing closes the gate so neither
//! runs and the simulated clock stands still.

use crate::player::animation::AnimationDriver;
use crate::player::body::PhysicsBody;
use crate::player::controller::{FrameTime, LocomotionController};
use crate::player::input::InputSource;

pub const DEFAULT_FIXED_TIMESTEP: f32 = 0.02;
/// Longest frame the scheduler will simulate; slower frames are truncated.
pub const DEFAULT_MAX_FRAME_DELTA: f32 = 0.333;

/// What happened during one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub fixed_steps: u32,
    pub updated: bool,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    fixed_timestep: f32,
    max_frame_delta: f32,
    accumulator: f32,
    elapsed: f32,
    enabled: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_TIMESTEP)
    }
}

impl Scheduler {
    #[must_use]
    pub fn new(fixed_timestep: f32) -> Self {
        Self {
            fixed_timestep,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            accumulator: 0.0,
            elapsed: 0.0,
            enabled: true,
        }
    }

    /// Longest frame to simulate. Negative or NaN values simulate nothing.
    #[must_use]
    pub fn with_max_frame_delta(mut self, max_frame_delta: f32) -> Self {
        self.max_frame_delta = max_frame_delta.max(0.0);
        self
    }

    pub fn fixed_timestep(&self) -> f32 { self.fixed_timestep }

    /// Simulated seconds since start, frozen while paused.
    pub fn elapsed(&self) -> f32 { self.elapsed }

    pub fn is_enabled(&self) -> bool { self.enabled }

    /// Open (`true`) or close (`false`) the pause gate.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Run everything owed for a frame that took `frame_delta` seconds.
    pub fn advance<B, A, I>(&mut self, controller: &mut LocomotionController<B, A, I>, frame_delta: f32) -> TickReport
    where
        B: PhysicsBody,
        A: AnimationDriver,
        I: InputSource,
    {
        self.advance_all(std::iter::once(controller), frame_delta)
    }

    /// Advance the clock once and give every controller the same fixed steps
    /// and update.
    pub fn advance_all<'c, B, A, I>(
        &mut self,
        controllers: impl IntoIterator<Item = &'c mut LocomotionController<B, A, I>>,
        frame_delta: f32,
    ) -> TickReport
    where
        B: PhysicsBody + 'c,
        A: AnimationDriver + 'c,
        I: InputSource + 'c,
    {
        if !self.enabled {
            return TickReport::default();
        }

        // NaN and negative deltas count as zero
        let delta = frame_delta.max(0.0).min(self.max_frame_delta);
        self.elapsed += delta;
        self.accumulator += delta;

        let mut fixed_steps = 0;
        if self.fixed_timestep > 0.0 {
            while self.accumulator >= self.fixed_timestep {
                self.accumulator -= self.fixed_timestep;
                fixed_steps += 1;
            }
        }

        let time = FrameTime { now: self.elapsed, delta };
        for controller in controllers {
            for _ in 0..fixed_steps {
                controller.fixed_update();
                let contacts = controller.body_mut().integrate(self.fixed_timestep);
                for contact in contacts {
                    controller.handle_contact(contact);
                }
            }
            controller.update(time);
        }
        TickReport { fixed_steps, updated: true }
    }
}
