//! Player systems: input capture, stepping the controller, and everything that
//! mirrors the controller's state back into the scene.
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use skyhop::collectible::{in_pickup_range, CollectibleTracker, Gem, PICKUP_RADIUS};
use skyhop::menu::PauseMenu;
use skyhop::player::{
    AnimBool, AnimatorParams, Control, InputSnapshot, KinematicBody, LocomotionController, PhysicsBody, Scheduler,
};
use skyhop::settings::Settings;

pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(0.4, 0.9, 0.4);

pub type PlayerController = LocomotionController<KinematicBody, AnimatorParams, InputSnapshot>;

#[derive(Component)]
pub struct Player {
    pub controller: PlayerController,
}

/// Drives every player controller. Closed while the game is paused.
#[derive(Resource, Default)]
pub struct LocomotionClock(pub Scheduler);

#[derive(Component)]
pub struct FollowCamera {
    pub offset: Vec3, // Offset from the player in the player's yaw frame
    pub stiffness: f32, // Higher values catch up faster
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 4.0, 10.0),
            stiffness: 8.0,
        }
    }
}

fn key_axis(keys: &ButtonInput<KeyCode>, positive: Option<KeyCode>, negative: Option<KeyCode>) -> f32 {
    let held = |k: Option<KeyCode>| k.is_some_and(|k| keys.pressed(k));
    f32::from(u8::from(held(positive))) - f32::from(u8::from(held(negative)))
}

/// Copy this frame's keyboard and mouse state into each player's input snapshot.
///
/// Nothing is captured while paused, so presses made in the menu never reach
/// the controller.
///
/// # Arguments
/// * `keys` - keyboard state
/// * `motion` - mouse motion events for this frame
/// * `windows` - primary window, mouse turning only applies with a locked cursor
/// * `settings` - key bindings and mouse scaling
/// * `menu` - pause state
/// * `players` - players whose snapshot is rewritten
#[allow(clippy::needless_pass_by_value)]
pub fn gather_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut motion: EventReader<MouseMotion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<Settings>,
    menu: Res<PauseMenu>,
    mut players: Query<&mut Player>,
) {
    let mouse_dx: f32 = motion.read().map(|ev| ev.delta.x).sum();

    let controls = &settings.controls;
    let cursor_locked = windows
        .get_single()
        .is_ok_and(|w| w.cursor.grab_mode != CursorGrabMode::None);

    for mut player in &mut players {
        let input = player.controller.input_mut();
        input.clear_edges();
        input.set_axes(0.0, 0.0);
        input.mouse_x = 0.0;
        if menu.is_paused() {
            continue;
        }

        input.set_axes(
            key_axis(&keys, controls.key_for("right"), controls.key_for("left")),
            key_axis(&keys, controls.key_for("forward"), controls.key_for("back")),
        );

        if cursor_locked {
            let sign = if controls.invert_x { -1.0 } else { 1.0 };
            input.mouse_x = mouse_dx * controls.mouse_sensitivity * sign;
        }

        for (action, control) in [("jump", Control::Jump), ("dive", Control::Dive), ("sprint", Control::Sprint)] {
            let Some(key) = controls.key_for(action) else { continue };
            if keys.just_pressed(key) {
                input.press(control);
            }
            if keys.just_released(key) {
                input.release(control);
            }
        }
    }
}

/// Run the fixed steps and the update owed for this frame. The clock
/// advances once no matter how many players there are.
#[allow(clippy::needless_pass_by_value)]
pub fn step_players(time: Res<Time>, mut clock: ResMut<LocomotionClock>, mut players: Query<&mut Player>) {
    let controllers = players.iter_mut().map(|p| &mut p.into_inner().controller);
    clock.0.advance_all(controllers, time.delta_seconds());
}

/// Copy the body pose onto the rendered transform.
pub fn sync_player_transform(mut players: Query<(&Player, &mut Transform)>) {
    for (player, mut transform) in &mut players {
        let body = player.controller.body();
        transform.translation = body.position();
        transform.rotation = body.rotation();
    }
}

/// Tint the player by animation state and log one-shot triggers.
#[allow(clippy::needless_pass_by_value)]
pub fn show_player_state(
    mut players: Query<(&mut Player, &Handle<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (mut player, handle) in &mut players {
        let animator = player.controller.animator_mut();
        for trigger in animator.take_triggers() {
            debug!("animation trigger {trigger:?}");
        }

        let color = if animator.bool(AnimBool::IsGliding) {
            Color::srgb(0.3, 0.9, 0.9)
        } else if animator.bool(AnimBool::IsFalling) {
            Color::srgb(0.9, 0.3, 0.3)
        } else if animator.bool(AnimBool::IsJumping) {
            Color::srgb(0.95, 0.85, 0.3)
        } else {
            Color::srgb(0.2, 0.5, 0.9)
        };
        if let Some(material) = materials.get_mut(handle)
            && material.base_color != color
        {
            material.base_color = color;
        }
    }
}

/// Keep the camera behind the player, following its yaw.
#[allow(clippy::needless_pass_by_value)]
pub fn follow_camera(
    time: Res<Time>,
    players: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut cameras: Query<(&mut Transform, &FollowCamera)>,
) {
    let Ok(target) = players.get_single() else { return };
    let focus = target.translation + Vec3::Y;

    for (mut transform, follow) in &mut cameras {
        let desired = target.translation + target.rotation * follow.offset;
        let t = (follow.stiffness * time.delta_seconds()).clamp(0.0, 1.0);
        transform.translation = transform.translation.lerp(desired, t);
        transform.look_at(focus, Vec3::Y);
    }
}

/// Pick up gems the player touches.
#[allow(clippy::needless_pass_by_value)]
pub fn collect_gems(
    mut commands: Commands,
    players: Query<&Player>,
    gems: Query<(Entity, &Transform, &Gem)>,
    mut tracker: ResMut<CollectibleTracker>,
) {
    let Ok(player) = players.get_single() else { return };
    let position = player.controller.body().position();

    for (entity, transform, gem) in &gems {
        if in_pickup_range(position, transform.translation, PICKUP_RADIUS) {
            let progress = tracker.add_gem(gem.value);
            info!(
                "Collected {} gem (+{}): value {}, {:.0}%",
                gem.kind, gem.value, progress.gem_value, progress.percentage
            );
            if progress.complete {
                info!("All gems collected");
            }
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Spin gems in place.
#[allow(clippy::needless_pass_by_value)]
pub fn spin_gems(time: Res<Time>, mut gems: Query<&mut Transform, With<Gem>>) {
    for mut transform in &mut gems {
        transform.rotate_y(1.5 * time.delta_seconds());
    }
}

/// Lock the cursor on click during play; release it while the menu is open.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut wq: Query<&mut Window, With<PrimaryWindow>>,
    mb: Res<ButtonInput<MouseButton>>,
    menu: Res<PauseMenu>,
) {
    let Ok(mut w) = wq.get_single_mut() else { return };
    if menu.is_paused() {
        if w.cursor.grab_mode != CursorGrabMode::None {
            w.cursor.grab_mode = CursorGrabMode::None;
            w.cursor.visible = true;
        }
    } else if mb.just_pressed(MouseButton::Left) {
        w.cursor.grab_mode = CursorGrabMode::Locked;
        w.cursor.visible = false;
    }
}

/// Push reloaded `player` settings into the live controllers.
#[allow(clippy::needless_pass_by_value)]
pub fn apply_player_settings(settings: Res<Settings>, mut players: Query<&mut Player>) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    for mut player in &mut players {
        *player.controller.config_mut() = settings.player.clone();
    }
    info!("Applied player settings");
}
