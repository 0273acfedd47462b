//! Locomotion tuning values.
//!
//! Stored in the `player` section of the settings RON file and copied into the
//! controller at spawn. The pause menu and the settings hot-reload both write
//! into the live copy; nothing here is validated, so zero or negative values
//! simply produce odd motion.
use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocomotionConfig {
    #[serde(default = "LocomotionConfig::default_move_speed")]
    pub move_speed: f32, // Walking speed in units per second
    #[serde(default = "LocomotionConfig::default_sprint_modifier")]
    pub sprint_modifier: f32, // Added to move_speed while sprint is held
    #[serde(default = "LocomotionConfig::default_jump_force")]
    pub jump_force: f32, // Vertical velocity set by a jump
    #[serde(default = "LocomotionConfig::default_dive_force")]
    pub dive_force: f32, // Downward velocity set by a dive
    #[serde(default = "LocomotionConfig::default_gravity_multiplier")]
    pub gravity_multiplier: f32, // Extra gravity applied while airborne and not gliding
    #[serde(default = "LocomotionConfig::default_rotation_speed")]
    pub rotation_speed: f32, // Turn rate toward the movement heading
    #[serde(default = "LocomotionConfig::default_double_tap_window")]
    pub double_tap_window: f32, // Seconds between jump presses that still count as a double press
    #[serde(default = "LocomotionConfig::default_fall_threshold")]
    pub fall_threshold: f32, // Height below which the character respawns
    #[serde(default = "LocomotionConfig::default_fall_angle_threshold")]
    pub fall_angle_threshold: f32, // Pitch/roll in degrees beyond which the character is stood upright
    #[serde(default = "LocomotionConfig::default_respawn_point")]
    pub respawn_point: (f32, f32, f32), // Where the character reappears after falling out of the level
    #[serde(default = "LocomotionConfig::default_ground_check_cooldown")]
    pub ground_check_cooldown: f32, // Seconds after leaving ground before the falling flag may be set
    #[serde(default = "LocomotionConfig::default_mouse_sensitivity")]
    pub mouse_sensitivity: f32, // Degrees of yaw per unit of mouse axis
    #[serde(default = "LocomotionConfig::default_wall_ray_length")]
    pub wall_ray_length: f32, // Reach of the forward wall probe
    #[serde(default = "LocomotionConfig::default_slide_speed")]
    pub slide_speed: f32, // Vertical speed lost per tick while sliding along a wall
    #[serde(default = "LocomotionConfig::default_idle_delay")]
    pub idle_delay: f32, // Length of one idle window in seconds
}

impl LocomotionConfig {
    fn default_move_speed() -> f32 { 10.0 }
    fn default_sprint_modifier() -> f32 { 20.0 }
    fn default_jump_force() -> f32 { 30.0 }
    fn default_dive_force() -> f32 { 50.0 }
    fn default_gravity_multiplier() -> f32 { 1.5 }
    fn default_rotation_speed() -> f32 { 3.0 }
    fn default_double_tap_window() -> f32 { 5.0 }
    fn default_fall_threshold() -> f32 { -50.0 }
    fn default_fall_angle_threshold() -> f32 { 45.0 }
    fn default_respawn_point() -> (f32, f32, f32) { (0.0, 2.0, 0.0) }
    fn default_ground_check_cooldown() -> f32 { 1.0 }
    fn default_mouse_sensitivity() -> f32 { 2.0 }
    fn default_wall_ray_length() -> f32 { 0.5 }
    fn default_slide_speed() -> f32 { 2.0 }
    fn default_idle_delay() -> f32 { 1.0 }

    #[must_use]
    pub fn respawn_position(&self) -> Vec3 {
        let (x, y, z) = self.respawn_point;
        Vec3::new(x, y, z)
    }
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: Self::default_move_speed(),
            sprint_modifier: Self::default_sprint_modifier(),
            jump_force: Self::default_jump_force(),
            dive_force: Self::default_dive_force(),
            gravity_multiplier: Self::default_gravity_multiplier(),
            rotation_speed: Self::default_rotation_speed(),
            double_tap_window: Self::default_double_tap_window(),
            fall_threshold: Self::default_fall_threshold(),
            fall_angle_threshold: Self::default_fall_angle_threshold(),
            respawn_point: Self::default_respawn_point(),
            ground_check_cooldown: Self::default_ground_check_cooldown(),
            mouse_sensitivity: Self::default_mouse_sensitivity(),
            wall_ray_length: Self::default_wall_ray_length(),
            slide_speed: Self::default_slide_speed(),
            idle_delay: Self::default_idle_delay(),
        }
    }
}
