//! Physics body abstraction.
//!
//! The controller mutates the character through this trait so any physics
//! engine can sit behind it. Pose and velocity live on the body because the
//! host integrator moves them between controller ticks.

use bevy::math::{Quat, Vec3};

use crate::player::contact::ContactEvent;

/// How a value passed to [`PhysicsBody::add_force`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force, divided by mass, applied over the next step.
    Force,
    /// Continuous acceleration, mass ignored, applied over the next step.
    Acceleration,
    /// Instant change of momentum, divided by mass.
    Impulse,
    /// Instant change of velocity, mass ignored.
    VelocityChange,
}

/// Rotation axes the physics solver must not rotate the body around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationLock {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl RotationLock {
    /// Keep the body upright: no pitch, no roll.
    pub const UPRIGHT: RotationLock = RotationLock { x: true, y: false, z: true };
}

/// Result of a successful ray cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

pub trait PhysicsBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);

    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);

    /// Queue a force for the next integration step (or apply it now for the
    /// instantaneous modes).
    fn add_force(&mut self, force: Vec3, mode: ForceMode);

    /// World gravity the integrator already applies every step.
    fn gravity(&self) -> Vec3;

    fn set_rotation_lock(&mut self, lock: RotationLock);

    /// Cast a ray from the body origin along `direction`.
    fn cast_ray(&self, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Advance the body by one fixed step and report contact changes.
    ///
    /// Hosts whose engine integrates on its own keep the default, which does
    /// nothing and reports no contacts.
    fn integrate(&mut self, _dt: f32) -> Vec<ContactEvent> {
        Vec::new()
    }
}
