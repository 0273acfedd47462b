//! Player locomotion controller.
//!
//! Owns the character's motion flags and timers and drives an injected
//! physics body and animation driver. Two entry points are called by the
//! scheduler: `update` once per rendered frame and `fixed_update` once per
//! physics step. Contact events from the physics layer go through
//! `handle_contact`.
//!
//! Per-frame order: idle roll, respawn check, tilt correction, movement,
//! jump/glide, landing, dive. The respawn check runs before movement so a
//! respawn still gets a fresh movement pass from the new position.

use bevy::log::{debug, info};
use bevy::math::{EulerRot, Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::player::animation::{AnimBool, AnimFloat, AnimTrigger, AnimationDriver};
use crate::player::body::{ForceMode, PhysicsBody, RotationLock};
use crate::player::config::LocomotionConfig;
use crate::player::contact::{ContactEvent, SurfaceKind};
use crate::player::input::{Control, InputAxis, InputSource};

// Idle roll: a value in [0, IDLE_ROLL_RANGE) below IDLE_ROLL_HIT fires the trigger (12.5%).
const IDLE_ROLL_RANGE: f32 = 200.0;
const IDLE_ROLL_HIT: f32 = 25.0;
// Below this horizontal speed a grounded character reports zero speed.
const IDLE_SPEED_THRESHOLD: f32 = 0.1;
const MOUSE_DEADZONE: f32 = 0.01;

/// Clock values for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the simulation started.
    pub now: f32,
    /// Seconds since the previous update.
    pub delta: f32,
}

/// High-level locomotion state. Jumping and diving are transient flags, not
/// states of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Grounded,
    Airborne,
    Gliding,
}

/// Flags and timers owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionState {
    pub is_grounded: bool,
    pub is_jumping: bool,
    pub is_gliding: bool,
    pub last_jump_press_time: f32,
    pub idle_timer: f32,
    pub last_grounded_time: f32,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            is_jumping: false,
            is_gliding: false,
            last_jump_press_time: f32::NEG_INFINITY,
            idle_timer: 0.0,
            last_grounded_time: 0.0,
        }
    }
}

pub struct LocomotionController<B, A, I> {
    config: LocomotionConfig,
    state: LocomotionState,
    body: B,
    animator: A,
    input: I,
    rng: ChaCha8Rng,
}

impl<B: PhysicsBody, A: AnimationDriver, I: InputSource> LocomotionController<B, A, I> {
    /// Build a controller around its services. The body is locked against
    /// pitch and roll so the solver cannot tip the character over.
    pub fn new(config: LocomotionConfig, mut body: B, animator: A, input: I) -> Self {
        body.set_rotation_lock(RotationLock::UPRIGHT);
        Self {
            config,
            state: LocomotionState::default(),
            body,
            animator,
            input,
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Replace the idle RNG with a seeded one for reproducible runs.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &LocomotionConfig { &self.config }
    pub fn config_mut(&mut self) -> &mut LocomotionConfig { &mut self.config }
    pub fn state(&self) -> &LocomotionState { &self.state }
    pub fn body(&self) -> &B { &self.body }
    pub fn body_mut(&mut self) -> &mut B { &mut self.body }
    pub fn animator(&self) -> &A { &self.animator }
    pub fn animator_mut(&mut self) -> &mut A { &mut self.animator }
    pub fn input(&self) -> &I { &self.input }
    pub fn input_mut(&mut self) -> &mut I { &mut self.input }

    #[must_use]
    pub fn motion_state(&self) -> MotionState {
        if self.state.is_grounded {
            MotionState::Grounded
        } else if self.state.is_gliding {
            MotionState::Gliding
        } else {
            MotionState::Airborne
        }
    }

    /// Variable-rate update, once per frame.
    pub fn update(&mut self, time: FrameTime) {
        self.handle_idle(time.delta);
        self.handle_respawn();
        self.handle_tilt();
        self.handle_movement(time.delta);
        self.handle_jump(time.now);
        self.handle_landing(time.now);
        self.handle_dive();
    }

    /// Fixed-rate physics step: extra gravity while falling without a glide,
    /// on top of whatever gravity the integrator applies itself.
    pub fn fixed_update(&mut self) {
        if !self.state.is_grounded && !self.state.is_gliding {
            let extra = self.body.gravity() * self.config.gravity_multiplier;
            self.body.add_force(extra, ForceMode::Acceleration);
        }
    }

    /// React to a contact reported by the physics layer. Only ground
    /// contacts matter.
    pub fn handle_contact(&mut self, event: ContactEvent) {
        match event {
            ContactEvent::Enter(SurfaceKind::Ground) => {
                self.state.is_grounded = true;
                self.state.is_jumping = false;
                self.state.is_gliding = false;
                self.animator.set_bool(AnimBool::IsGrounded, true);
                self.animator.set_bool(AnimBool::IsJumping, false);
                self.animator.set_bool(AnimBool::IsGliding, false);
                self.animator.set_bool(AnimBool::IsFalling, false);
            }
            ContactEvent::Exit(SurfaceKind::Ground) => {
                // jumping/gliding survive until the next jump or landing
                self.state.is_grounded = false;
                self.animator.set_bool(AnimBool::IsGrounded, false);
            }
            ContactEvent::Enter(SurfaceKind::Other) | ContactEvent::Exit(SurfaceKind::Other) => {}
        }
    }

    /// Put the character back on the respawn point, upright and at rest.
    pub fn respawn(&mut self) {
        let upright = upright(self.body.rotation());
        let point = self.config.respawn_position();
        info!("respawning player at {point} (fell to y={:.2})", self.body.position().y);

        self.body.set_position(point);
        self.body.set_rotation(upright);
        self.body.set_velocity(Vec3::ZERO);

        self.state.is_grounded = true;
        self.state.is_jumping = false;
        self.state.is_gliding = false;

        self.animator.set_bool(AnimBool::IsGrounded, true);
        self.animator.set_bool(AnimBool::IsJumping, false);
        self.animator.set_bool(AnimBool::IsGliding, false);
        self.animator.set_bool(AnimBool::IsFalling, false);
        self.animator.set_float(AnimFloat::Speed, 0.0);
    }

    fn handle_idle(&mut self, dt: f32) {
        self.state.idle_timer += dt;
        if self.state.idle_timer >= self.config.idle_delay {
            let roll: f32 = self.rng.random_range(0.0..IDLE_ROLL_RANGE);
            if roll < IDLE_ROLL_HIT {
                self.animator.set_trigger(AnimTrigger::Idle);
            }
            self.state.idle_timer = 0.0;
        }
    }

    fn handle_respawn(&mut self) {
        if self.body.position().y < self.config.fall_threshold {
            self.respawn();
        }
    }

    fn handle_tilt(&mut self) {
        if self.is_fallen_over() {
            let upright = upright(self.body.rotation());
            self.body.set_rotation(upright);
        }
    }

    fn is_fallen_over(&self) -> bool {
        let (_, pitch, roll) = self.body.rotation().to_euler(EulerRot::YXZ);
        let limit = self.config.fall_angle_threshold;
        pitch.to_degrees().abs() > limit || roll.to_degrees().abs() > limit
    }

    fn handle_movement(&mut self, dt: f32) {
        let horizontal = self.input.axis(InputAxis::Horizontal);
        let vertical = self.input.axis(InputAxis::Vertical);

        let rotation = self.body.rotation();
        let forward = rotation * Vec3::NEG_Z;
        let right = rotation * Vec3::X;
        let movement = (forward * vertical + right * horizontal).normalize_or_zero();

        let speed = self.config.move_speed;
        let velocity = self.body.velocity();
        let wall = if vertical > 0.0 {
            self.body.cast_ray(forward, self.config.wall_ray_length)
        } else {
            None
        };

        let new_velocity = match wall {
            // slide along the wall and sink a little every tick
            Some(hit) => {
                let slide = hit.normal.cross(Vec3::Y).normalize_or_zero();
                Vec3::new(slide.x * speed, velocity.y - self.config.slide_speed, slide.z * speed)
            }
            None => Vec3::new(movement.x * speed, velocity.y, movement.z * speed),
        };
        self.body.set_velocity(new_velocity);

        let horizontal_speed = Vec3::new(new_velocity.x, 0.0, new_velocity.z).length();
        self.animator.set_float(AnimFloat::Speed, horizontal_speed);

        self.rotate(movement, dt);

        if horizontal_speed < IDLE_SPEED_THRESHOLD && self.state.is_grounded {
            self.animator.set_float(AnimFloat::Speed, 0.0);
        }

        // Edge-driven on purpose: a lost key-up leaves the bonus applied.
        if self.input.pressed(Control::Sprint) {
            self.config.move_speed += self.config.sprint_modifier;
        }
        if self.input.released(Control::Sprint) {
            self.config.move_speed -= self.config.sprint_modifier;
        }
    }

    fn rotate(&mut self, movement: Vec3, dt: f32) {
        let mouse_x = self.input.mouse_axis_x();
        let rotation = self.body.rotation();

        if mouse_x.abs() > MOUSE_DEADZONE {
            // positive mouse x turns right, which is negative yaw around +Y
            let yaw = -(mouse_x * self.config.mouse_sensitivity).to_radians();
            self.body.set_rotation(rotation * Quat::from_rotation_y(yaw));
        } else if let Some(target) = heading(movement) {
            let t = (dt * self.config.rotation_speed).clamp(0.0, 1.0);
            self.body.set_rotation(rotation.slerp(target, t));
        }
    }

    fn handle_jump(&mut self, now: f32) {
        if !self.input.pressed(Control::Jump) {
            return;
        }

        let double_press = now - self.state.last_jump_press_time <= self.config.double_tap_window;
        if double_press && !self.state.is_grounded && !self.state.is_gliding {
            self.start_gliding();
        } else if self.state.is_grounded {
            let v = self.body.velocity();
            self.body.set_velocity(Vec3::new(v.x, self.config.jump_force, v.z));
            self.state.is_jumping = true;
            self.state.is_grounded = false;
            self.animator.set_bool(AnimBool::IsJumping, true);
        }
        self.state.last_jump_press_time = now;
    }

    fn start_gliding(&mut self) {
        debug!("player started gliding");
        self.state.is_gliding = true;
        self.animator.set_bool(AnimBool::IsGliding, true);
    }

    fn handle_landing(&mut self, now: f32) {
        if self.state.is_grounded {
            self.animator.set_bool(AnimBool::IsJumping, false);
            self.animator.set_bool(AnimBool::IsGliding, false);
            self.animator.set_bool(AnimBool::IsFalling, false);
            self.state.last_grounded_time = now;
        } else if now > self.state.last_grounded_time + self.config.ground_check_cooldown
            && self.body.velocity().y < 0.0
            && !self.state.is_gliding
        {
            self.animator.set_bool(AnimBool::IsFalling, true);
        }
    }

    fn handle_dive(&mut self) {
        if self.input.pressed(Control::Dive) && !self.state.is_grounded {
            let v = self.body.velocity();
            self.body.set_velocity(Vec3::new(v.x, -self.config.dive_force, v.z));
            self.animator.set_trigger(AnimTrigger::Dive);
        }
    }
}

/// Drop pitch and roll, keep yaw.
fn upright(rotation: Quat) -> Quat {
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_rotation_y(yaw)
}

/// Yaw-only rotation facing along the horizontal part of `direction`.
fn heading(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::animation::AnimatorParams;
    use crate::player::input::InputSnapshot;
    use crate::player::kinematic::{KinematicBody, StaticCollider};

    type TestController = LocomotionController<KinematicBody, AnimatorParams, InputSnapshot>;

    const EPS: f32 = 1e-4;

    fn controller() -> TestController {
        controller_with(LocomotionConfig::default(), KinematicBody::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.4, 0.9, 0.4)))
    }

    fn controller_with(config: LocomotionConfig, body: KinematicBody) -> TestController {
        LocomotionController::new(config, body, AnimatorParams::new(), InputSnapshot::new()).with_seed(7)
    }

    fn tick(c: &mut TestController, now: f32) {
        c.update(FrameTime { now, delta: 0.02 });
        c.input_mut().clear_edges();
    }

    fn press(c: &mut TestController, control: Control, now: f32) {
        c.input_mut().press(control);
        tick(c, now);
    }

    fn airborne() -> TestController {
        let mut c = controller();
        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));
        c
    }

    #[test]
    fn construction_locks_pitch_and_roll() {
        let c = controller();
        assert_eq!(c.body().rotation_lock(), RotationLock::UPRIGHT);
        assert_eq!(c.motion_state(), MotionState::Grounded);
    }

    #[test]
    fn grounded_jump_sets_jump_force_and_keeps_horizontal_velocity() {
        let mut c = controller();
        c.input_mut().set_axes(0.0, 1.0);
        press(&mut c, Control::Jump, 1.0);

        let v = c.body().velocity();
        assert!((v.y - 30.0).abs() < EPS);
        assert!(v.x.abs() < EPS);
        assert!((v.z + 10.0).abs() < EPS);
        assert_eq!(c.motion_state(), MotionState::Airborne);
        assert!(c.state().is_jumping);
        assert!(c.animator().bool(AnimBool::IsJumping));
    }

    #[test]
    fn second_press_within_window_glides_without_touching_velocity() {
        let mut c = controller();
        press(&mut c, Control::Jump, 1.0);
        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));
        c.body_mut().set_velocity(Vec3::new(0.0, 12.0, 0.0));

        press(&mut c, Control::Jump, 2.0);

        assert_eq!(c.motion_state(), MotionState::Gliding);
        assert!(c.animator().bool(AnimBool::IsGliding));
        assert_eq!(c.body().velocity(), Vec3::new(0.0, 12.0, 0.0));
        assert_eq!(c.state().last_jump_press_time, 2.0);
    }

    #[test]
    fn gliding_stops_extra_gravity() {
        let mut c = controller();
        press(&mut c, Control::Jump, 1.0);
        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));

        // airborne: integrator gravity plus 1.5x extra
        c.body_mut().set_velocity(Vec3::ZERO);
        c.fixed_update();
        c.body_mut().integrate(0.1);
        assert!((c.body().velocity().y - (-9.81 * 2.5 * 0.1)).abs() < EPS);

        press(&mut c, Control::Jump, 2.0);
        assert_eq!(c.motion_state(), MotionState::Gliding);

        c.body_mut().set_velocity(Vec3::ZERO);
        c.fixed_update();
        c.body_mut().integrate(0.1);
        assert!((c.body().velocity().y - (-9.81 * 0.1)).abs() < EPS);
    }

    #[test]
    fn press_outside_window_does_not_glide() {
        let mut c = controller();
        press(&mut c, Control::Jump, 1.0);
        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));

        press(&mut c, Control::Jump, 6.5);

        assert_eq!(c.motion_state(), MotionState::Airborne);
        assert_eq!(c.state().last_jump_press_time, 6.5);
    }

    #[test]
    fn double_press_while_grounded_jumps_again() {
        let mut c = controller();
        press(&mut c, Control::Jump, 1.0);
        c.handle_contact(ContactEvent::Enter(SurfaceKind::Ground));
        c.body_mut().set_velocity(Vec3::ZERO);

        press(&mut c, Control::Jump, 1.5);

        assert_eq!(c.motion_state(), MotionState::Airborne);
        assert!(!c.state().is_gliding);
        assert!(c.state().is_jumping);
        assert!((c.body().velocity().y - 30.0).abs() < EPS);
    }

    #[test]
    fn first_airborne_press_never_glides() {
        let mut c = airborne();
        press(&mut c, Control::Jump, 0.5);
        assert_eq!(c.motion_state(), MotionState::Airborne);
    }

    #[test]
    fn ground_enter_resets_flags_from_any_state() {
        let mut c = controller();
        press(&mut c, Control::Jump, 1.0);
        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));
        press(&mut c, Control::Jump, 1.5);
        assert!(c.state().is_gliding && c.state().is_jumping);

        c.handle_contact(ContactEvent::Enter(SurfaceKind::Ground));

        let s = c.state();
        assert!(s.is_grounded && !s.is_jumping && !s.is_gliding);
        assert!(c.animator().bool(AnimBool::IsGrounded));
        assert!(!c.animator().bool(AnimBool::IsFalling));
    }

    #[test]
    fn ground_exit_keeps_jump_flags() {
        let mut c = controller();
        press(&mut c, Control::Jump, 1.0);
        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));

        assert!(c.state().is_jumping);
        assert!(!c.animator().bool(AnimBool::IsGrounded));
    }

    #[test]
    fn non_ground_contacts_are_ignored() {
        let mut c = airborne();
        c.handle_contact(ContactEvent::Enter(SurfaceKind::Other));
        assert_eq!(c.motion_state(), MotionState::Airborne);
    }

    #[test]
    fn respawn_restores_pose_and_rest() {
        let mut c = airborne();
        c.body_mut().set_position(Vec3::new(14.0, -20.0, 3.0));
        c.body_mut().set_rotation(Quat::from_euler(EulerRot::YXZ, 0.7, 0.5, -0.3));
        c.body_mut().set_velocity(Vec3::new(4.0, -40.0, 1.0));

        c.respawn();

        assert_eq!(c.body().position(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(c.body().velocity(), Vec3::ZERO);
        let (yaw, pitch, roll) = c.body().rotation().to_euler(EulerRot::YXZ);
        assert!((yaw - 0.7).abs() < EPS);
        assert!(pitch.abs() < EPS && roll.abs() < EPS);
        assert_eq!(c.motion_state(), MotionState::Grounded);
        assert_eq!(c.animator().float(AnimFloat::Speed), 0.0);
    }

    #[test]
    fn respawn_from_mid_glide_resets_animator() {
        let mut c = controller();
        press(&mut c, Control::Jump, 1.0);
        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));
        press(&mut c, Control::Jump, 1.5);
        assert!(!c.animator().bool(AnimBool::IsGrounded));

        c.respawn();

        assert!(c.animator().bool(AnimBool::IsGrounded));
        assert!(!c.animator().bool(AnimBool::IsJumping));
        assert!(!c.animator().bool(AnimBool::IsGliding));
    }

    #[test]
    fn falling_below_threshold_respawns_on_next_update() {
        let mut c = controller();
        c.body_mut().set_position(Vec3::new(3.0, -51.0, 8.0));

        tick(&mut c, 1.0);

        assert_eq!(c.body().position(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn respawn_still_runs_movement_the_same_tick() {
        let mut c = controller();
        c.body_mut().set_position(Vec3::new(0.0, -80.0, 0.0));
        c.input_mut().set_axes(1.0, 0.0);

        tick(&mut c, 1.0);

        let v = c.body().velocity();
        assert!((Vec3::new(v.x, 0.0, v.z).length() - 10.0).abs() < EPS);
    }

    #[test]
    fn tilt_beyond_threshold_is_corrected_preserving_yaw() {
        let mut c = controller();
        let yaw = 30f32.to_radians();
        c.body_mut().set_rotation(Quat::from_euler(EulerRot::YXZ, yaw, 60f32.to_radians(), 0.0));

        tick(&mut c, 0.1);

        let (y, pitch, roll) = c.body().rotation().to_euler(EulerRot::YXZ);
        assert!((y - yaw).abs() < EPS);
        assert!(pitch.abs() < EPS && roll.abs() < EPS);
    }

    #[test]
    fn roll_alone_beyond_threshold_is_corrected() {
        let mut c = controller();
        c.body_mut().set_rotation(Quat::from_euler(EulerRot::YXZ, 0.5, 0.0, 70f32.to_radians()));

        tick(&mut c, 0.1);

        let (y, pitch, roll) = c.body().rotation().to_euler(EulerRot::YXZ);
        assert!((y - 0.5).abs() < EPS);
        assert!(pitch.abs() < EPS && roll.abs() < EPS);
    }

    #[test]
    fn tilt_within_threshold_is_left_alone() {
        let mut c = controller();
        let rotation = Quat::from_euler(EulerRot::YXZ, 0.2, 0.0, 20f32.to_radians());
        c.body_mut().set_rotation(rotation);

        tick(&mut c, 0.1);

        assert!(c.body().rotation().abs_diff_eq(rotation, EPS));
    }

    #[test]
    fn falling_flag_waits_for_cooldown() {
        let mut c = controller();
        tick(&mut c, 0.0);
        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));
        c.body_mut().set_velocity(Vec3::new(0.0, -5.0, 0.0));

        tick(&mut c, 0.5);
        assert!(!c.animator().bool(AnimBool::IsFalling));

        tick(&mut c, 1.01);
        assert!(c.animator().bool(AnimBool::IsFalling));
    }

    #[test]
    fn gliding_never_reports_falling() {
        let mut c = controller();
        press(&mut c, Control::Jump, 0.0);
        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));
        press(&mut c, Control::Jump, 0.2);
        c.body_mut().set_velocity(Vec3::new(0.0, -5.0, 0.0));

        tick(&mut c, 3.0);

        assert!(!c.animator().bool(AnimBool::IsFalling));
    }

    #[test]
    fn dive_only_works_in_the_air() {
        let mut c = controller();
        press(&mut c, Control::Dive, 0.1);
        assert_eq!(c.animator().trigger_count(AnimTrigger::Dive), 0);

        c.handle_contact(ContactEvent::Exit(SurfaceKind::Ground));
        c.body_mut().set_velocity(Vec3::new(0.0, 8.0, 0.0));
        press(&mut c, Control::Dive, 0.2);

        assert_eq!(c.body().velocity().y, -50.0);
        assert_eq!(c.animator().trigger_count(AnimTrigger::Dive), 1);
    }

    #[test]
    fn movement_follows_local_axes_and_preserves_vertical() {
        let mut c = controller();
        c.body_mut().set_velocity(Vec3::new(0.0, -3.0, 0.0));
        c.input_mut().set_axes(1.0, 1.0);

        tick(&mut c, 0.1);

        let v = c.body().velocity();
        let expected = Vec3::new(1.0, 0.0, -1.0).normalize() * 10.0;
        assert!((v.x - expected.x).abs() < EPS);
        assert!((v.z - expected.z).abs() < EPS);
        assert_eq!(v.y, -3.0);
        assert!((c.animator().float(AnimFloat::Speed) - 10.0).abs() < EPS);
    }

    #[test]
    fn standing_still_reports_zero_speed() {
        let mut c = controller();
        c.body_mut().set_velocity(Vec3::new(0.05, 0.0, 0.0));
        tick(&mut c, 0.1);
        assert_eq!(c.animator().float(AnimFloat::Speed), 0.0);
    }

    #[test]
    fn walking_into_a_wall_slides_along_it() {
        let wall = StaticCollider::new(Vec3::new(0.0, 1.0, -0.65), Vec3::new(3.0, 2.0, 0.2), SurfaceKind::Ground);
        let body = KinematicBody::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.4, 0.9, 0.4)).with_colliders(vec![wall]);
        let mut c = controller_with(LocomotionConfig::default(), body);
        c.input_mut().set_axes(0.0, 1.0);

        tick(&mut c, 0.1);

        let v = c.body().velocity();
        assert!((v.x + 10.0).abs() < EPS);
        assert!(v.z.abs() < EPS);
        assert!((v.y + 2.0).abs() < EPS);
    }

    #[test]
    fn backing_away_from_a_wall_moves_normally() {
        let wall = StaticCollider::new(Vec3::new(0.0, 1.0, -0.65), Vec3::new(3.0, 2.0, 0.2), SurfaceKind::Ground);
        let body = KinematicBody::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.4, 0.9, 0.4)).with_colliders(vec![wall]);
        let mut c = controller_with(LocomotionConfig::default(), body);
        c.input_mut().set_axes(0.0, -1.0);

        tick(&mut c, 0.1);

        let v = c.body().velocity();
        assert!(v.x.abs() < EPS);
        assert!(v.y.abs() < EPS);
        assert!((v.z - 10.0).abs() < EPS);
    }

    #[test]
    fn mouse_turns_right_for_positive_delta() {
        let mut c = controller();
        c.input_mut().mouse_x = 5.0;

        tick(&mut c, 0.1);

        let forward = c.body().rotation() * Vec3::NEG_Z;
        assert!(forward.x > 0.0);
        let (yaw, _, _) = c.body().rotation().to_euler(EulerRot::YXZ);
        assert!((yaw + 10f32.to_radians()).abs() < EPS);
    }

    #[test]
    fn moving_turns_toward_heading() {
        let mut c = controller();
        c.input_mut().set_axes(1.0, 0.0);

        tick(&mut c, 0.1);

        let (yaw, _, _) = c.body().rotation().to_euler(EulerRot::YXZ);
        assert!(yaw < 0.0, "strafing right should start a right turn, yaw={yaw}");
    }

    #[test]
    fn sprint_adds_and_removes_modifier_on_edges() {
        let mut c = controller();
        press(&mut c, Control::Sprint, 0.1);
        assert_eq!(c.config().move_speed, 30.0);

        c.input_mut().release(Control::Sprint);
        tick(&mut c, 0.2);
        assert_eq!(c.config().move_speed, 10.0);
    }

    #[test]
    fn missed_sprint_release_leaves_speed_boosted() {
        let mut c = controller();
        press(&mut c, Control::Sprint, 0.1);
        press(&mut c, Control::Sprint, 0.2);
        assert_eq!(c.config().move_speed, 50.0);
    }

    #[test]
    fn live_config_writes_apply_next_tick() {
        let mut c = controller();
        c.config_mut().jump_force = 12.0;
        press(&mut c, Control::Jump, 0.1);
        assert_eq!(c.body().velocity().y, 12.0);
    }

    #[test]
    fn idle_trigger_fires_about_one_window_in_eight() {
        let mut c = controller();
        let windows = 20_000;
        for i in 0..windows {
            c.update(FrameTime { now: i as f32, delta: 1.0 });
        }
        let rate = c.animator().trigger_count(AnimTrigger::Idle) as f32 / windows as f32;
        assert!((0.11..0.14).contains(&rate), "idle rate {rate}");
        assert_eq!(c.state().idle_timer, 0.0);
    }

    #[test]
    fn idle_timer_accumulates_below_delay() {
        let mut c = controller();
        c.update(FrameTime { now: 0.0, delta: 0.4 });
        c.update(FrameTime { now: 0.4, delta: 0.4 });
        assert!((c.state().idle_timer - 0.8).abs() < EPS);
        c.update(FrameTime { now: 0.8, delta: 0.4 });
        assert_eq!(c.state().idle_timer, 0.0);
    }
}
