//! Minimal kinematic physics body.
//!
//! Box-shaped character against static axis-aligned boxes: gravity, queued
//! forces, per-axis overlap resolution and contact enter/exit tracking. It is
//! enough to run the demo level and to exercise the controller in tests.

use bevy::math::{Quat, Vec3};

use crate::player::body::{ForceMode, PhysicsBody, RayHit, RotationLock};
use crate::player::contact::{ContactEvent, SurfaceKind};

pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);

// Boxes closer than this count as touching.
const CONTACT_SKIN: f32 = 0.02;
// Resting exactly on a face must not block sliding along it.
const RESOLVE_SLOP: f32 = 1e-4;
const MIN_SUBSTEP_LEN: f32 = 0.05;
const MAX_SUBSTEPS: u32 = 64;

/// Immovable axis-aligned box in the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub surface: SurfaceKind,
}

impl StaticCollider {
    #[must_use]
    pub fn new(center: Vec3, half_extents: Vec3, surface: SurfaceKind) -> Self {
        Self { center, half_extents, surface }
    }

    #[must_use]
    pub fn min(&self) -> Vec3 { self.center - self.half_extents }

    #[must_use]
    pub fn max(&self) -> Vec3 { self.center + self.half_extents }
}

#[derive(Debug, Clone)]
pub struct KinematicBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub half_extents: Vec3,
    pub mass: f32,
    gravity: Vec3,
    rotation_lock: RotationLock,
    colliders: Vec<StaticCollider>,
    touching: Vec<bool>,
    pending_acceleration: Vec3,
}

impl KinematicBody {
    #[must_use]
    pub fn new(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            half_extents,
            mass: 1.0,
            gravity: DEFAULT_GRAVITY,
            rotation_lock: RotationLock::default(),
            colliders: Vec::new(),
            touching: Vec::new(),
            pending_acceleration: Vec3::ZERO,
        }
    }

    #[must_use]
    pub fn with_colliders(mut self, colliders: Vec<StaticCollider>) -> Self {
        self.touching = vec![false; colliders.len()];
        self.colliders = colliders;
        self
    }

    #[must_use]
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn add_collider(&mut self, collider: StaticCollider) {
        self.colliders.push(collider);
        self.touching.push(false);
    }

    #[must_use]
    pub fn colliders(&self) -> &[StaticCollider] { &self.colliders }

    #[must_use]
    pub fn rotation_lock(&self) -> RotationLock { self.rotation_lock }

    /// Whether the body touched collider `index` after the last step.
    #[must_use]
    pub fn is_touching(&self, index: usize) -> bool {
        self.touching.get(index).copied().unwrap_or(false)
    }

    /// Move along one axis and push back out of anything entered.
    fn sweep_axis(&mut self, axis: usize, delta: f32) {
        if delta == 0.0 {
            return;
        }
        let mut pos = self.position;
        pos[axis] += delta;
        for c in &self.colliders {
            if boxes_overlap(pos, self.half_extents, c, -RESOLVE_SLOP) {
                pos[axis] = if delta > 0.0 {
                    c.min()[axis] - self.half_extents[axis]
                } else {
                    c.max()[axis] + self.half_extents[axis]
                };
                self.velocity[axis] = 0.0;
            }
        }
        self.position = pos;
    }
}

fn boxes_overlap(pos: Vec3, half_extents: Vec3, c: &StaticCollider, skin: f32) -> bool {
    let min = pos - half_extents - Vec3::splat(skin);
    let max = pos + half_extents + Vec3::splat(skin);
    let (cmin, cmax) = (c.min(), c.max());
    min.x < cmax.x && max.x > cmin.x && min.y < cmax.y && max.y > cmin.y && min.z < cmax.z && max.z > cmin.z
}

/// Slab test. Returns entry distance and the normal of the entered face, or
/// `None` on a miss or when the origin is already inside the box.
fn ray_box(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<(f32, Vec3)> {
    let mut t_enter = 0.0f32;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        if d.abs() < 1e-8 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = Vec3::ZERO;
            normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    if normal == Vec3::ZERO { None } else { Some((t_enter, normal)) }
}

impl PhysicsBody for KinematicBody {
    fn position(&self) -> Vec3 { self.position }
    fn set_position(&mut self, position: Vec3) { self.position = position; }

    fn rotation(&self) -> Quat { self.rotation }
    fn set_rotation(&mut self, rotation: Quat) { self.rotation = rotation; }

    fn velocity(&self) -> Vec3 { self.velocity }
    fn set_velocity(&mut self, velocity: Vec3) { self.velocity = velocity; }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.pending_acceleration += force / self.mass,
            ForceMode::Acceleration => self.pending_acceleration += force,
            ForceMode::Impulse => self.velocity += force / self.mass,
            ForceMode::VelocityChange => self.velocity += force,
        }
    }

    fn gravity(&self) -> Vec3 { self.gravity }

    fn set_rotation_lock(&mut self, lock: RotationLock) {
        self.rotation_lock = lock;
    }

    fn cast_ray(&self, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let dir = direction.try_normalize()?;
        self.colliders
            .iter()
            .filter_map(|c| ray_box(self.position, dir, c.min(), c.max()))
            .filter(|(t, _)| *t <= max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(distance, normal)| RayHit {
                point: self.position + dir * distance,
                normal,
                distance,
            })
    }

    fn integrate(&mut self, dt: f32) -> Vec<ContactEvent> {
        self.velocity += (self.gravity + self.pending_acceleration) * dt;
        self.pending_acceleration = Vec3::ZERO;

        // no sub-step may be longer than the body's thinnest half extent
        let max_len = self.half_extents.min_element().max(MIN_SUBSTEP_LEN);
        let travel = (self.velocity * dt).abs().max_element();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let substeps = ((travel / max_len).ceil() as u32).clamp(1, MAX_SUBSTEPS);
        #[allow(clippy::cast_precision_loss)]
        let sub_dt = dt / substeps as f32;
        for _ in 0..substeps {
            let step = self.velocity * sub_dt;
            self.sweep_axis(1, step.y);
            self.sweep_axis(0, step.x);
            self.sweep_axis(2, step.z);
        }

        let mut events = Vec::new();
        for (i, c) in self.colliders.iter().enumerate() {
            let touching = boxes_overlap(self.position, self.half_extents, c, CONTACT_SKIN);
            if touching != self.touching[i] {
                self.touching[i] = touching;
                events.push(if touching {
                    ContactEvent::Enter(c.surface)
                } else {
                    ContactEvent::Exit(c.surface)
                });
            }
        }
        events
    }
}
