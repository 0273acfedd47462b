//! Animation parameter sink.
//!
//! The controller only ever writes parameters; nothing flows back. The
//! `AnimatorParams` implementation keeps the latest values so a renderer (or
//! a test) can read them.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimBool {
    IsGrounded,
    IsJumping,
    IsGliding,
    IsFalling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimFloat {
    /// Horizontal speed in world units per second.
    Speed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimTrigger {
    Idle,
    Dive,
}

pub trait AnimationDriver {
    fn set_bool(&mut self, param: AnimBool, value: bool);
    fn set_float(&mut self, param: AnimFloat, value: f32);
    fn set_trigger(&mut self, param: AnimTrigger);
}

/// In-memory animation parameters.
#[derive(Debug, Clone, Default)]
pub struct AnimatorParams {
    bools: HashMap<AnimBool, bool>,
    floats: HashMap<AnimFloat, f32>,
    fired: HashMap<AnimTrigger, u32>, // lifetime trigger counts
    pending: Vec<AnimTrigger>, // triggers not yet consumed by the renderer
}

impl AnimatorParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written for `param`, `false` if never written.
    #[must_use]
    pub fn bool(&self, param: AnimBool) -> bool {
        self.bools.get(&param).copied().unwrap_or(false)
    }

    /// Last value written for `param`, `0.0` if never written.
    #[must_use]
    pub fn float(&self, param: AnimFloat) -> f32 {
        self.floats.get(&param).copied().unwrap_or(0.0)
    }

    /// How many times `param` has fired since creation.
    #[must_use]
    pub fn trigger_count(&self, param: AnimTrigger) -> u32 {
        self.fired.get(&param).copied().unwrap_or(0)
    }

    /// Drain triggers fired since the last call.
    pub fn take_triggers(&mut self) -> Vec<AnimTrigger> {
        std::mem::take(&mut self.pending)
    }
}

impl AnimationDriver for AnimatorParams {
    fn set_bool(&mut self, param: AnimBool, value: bool) {
        self.bools.insert(param, value);
    }

    fn set_float(&mut self, param: AnimFloat, value: f32) {
        self.floats.insert(param, value);
    }

    fn set_trigger(&mut self, param: AnimTrigger) {
        *self.fired.entry(param).or_insert(0) += 1;
        self.pending.push(param);
    }
}
