//! Startup system building the demo level.
//!
//! Spawns the lights, the follow camera, the platforms (render meshes plus
//! the matching static colliders handed to the player's body), the player
//! itself and the gems, then sizes the `CollectibleTracker` to the number of
//! gems actually placed.
use bevy::prelude::*;
use skyhop::collectible::{CollectibleTracker, Gem, GemRegistry};
use skyhop::player::{
    AnimatorParams, InputSnapshot, KinematicBody, LocomotionController, StaticCollider, SurfaceKind,
};
use skyhop::settings::Settings;

use crate::app::player::{FollowCamera, Player, PLAYER_HALF_EXTENTS};

/// Platform boxes as `(center, half_extents, surface)`.
const PLATFORMS: [(Vec3, Vec3, SurfaceKind); 7] = [
    (Vec3::new(0.0, -1.0, 0.0), Vec3::new(15.0, 1.0, 15.0), SurfaceKind::Ground),
    (Vec3::new(0.0, 2.0, -24.0), Vec3::new(4.0, 0.5, 4.0), SurfaceKind::Ground),
    (Vec3::new(10.0, 5.0, -34.0), Vec3::new(3.0, 0.5, 3.0), SurfaceKind::Ground),
    (Vec3::new(-6.0, 9.0, -46.0), Vec3::new(3.0, 0.5, 3.0), SurfaceKind::Ground),
    (Vec3::new(0.0, 4.0, -70.0), Vec3::new(8.0, 0.5, 8.0), SurfaceKind::Ground),
    // tall wall to slide down
    (Vec3::new(-12.0, 6.0, 0.0), Vec3::new(0.5, 6.0, 8.0), SurfaceKind::Other),
    (Vec3::new(12.0, 1.5, 8.0), Vec3::new(2.0, 1.5, 2.0), SurfaceKind::Other),
];

/// Gem placements as `(kind, position)`.
const GEMS: [(&str, Vec3); 7] = [
    ("Red", Vec3::new(4.0, 1.0, -4.0)),
    ("Red", Vec3::new(-4.0, 1.0, -8.0)),
    ("Green", Vec3::new(0.0, 3.5, -24.0)),
    ("Green", Vec3::new(10.0, 6.5, -34.0)),
    ("Blue", Vec3::new(-6.0, 10.5, -46.0)),
    ("Blue", Vec3::new(0.0, 5.5, -70.0)),
    ("Red", Vec3::new(12.0, 3.8, 8.0)),
];

fn gem_color(kind: &str) -> Color {
    match kind {
        "Red" => Color::srgb(0.9, 0.15, 0.15),
        "Green" => Color::srgb(0.15, 0.85, 0.3),
        "Blue" => Color::srgb(0.2, 0.4, 0.95),
        _ => Color::WHITE,
    }
}

/// Build the level, the player and the camera.
///
/// # Arguments
/// - `commands`: Commands used to spawn entities and insert resources.
/// - `meshes`: Asset storage for platform, player and gem meshes.
/// - `materials`: Asset storage for standard materials.
/// - `settings`: Tuning values for the player and the shadow toggle.
/// - `gems`: Gem kinds, used to price each placed gem.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
    gems: Res<GemRegistry>,
) {
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            shadows_enabled: settings.graphics.shadows,
            illuminance: 8000.0,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 30.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.6, 0.4),
        perceptual_roughness: 0.9,
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.5, 0.45),
        perceptual_roughness: 0.9,
        ..default()
    });

    let mut colliders = Vec::with_capacity(PLATFORMS.len());
    for (center, half_extents, surface) in PLATFORMS {
        let size = half_extents * 2.0;
        commands.spawn(PbrBundle {
            mesh: meshes.add(Cuboid::new(size.x, size.y, size.z)),
            material: if surface == SurfaceKind::Ground { ground_material.clone() } else { wall_material.clone() },
            transform: Transform::from_translation(center),
            ..default()
        });
        colliders.push(StaticCollider::new(center, half_extents, surface));
    }

    let config = settings.player.clone();
    let spawn = config.respawn_position();
    let body = KinematicBody::new(spawn, PLAYER_HALF_EXTENTS).with_colliders(colliders);
    let controller = LocomotionController::new(config, body, AnimatorParams::new(), InputSnapshot::new());

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Capsule3d::new(PLAYER_HALF_EXTENTS.x, PLAYER_HALF_EXTENTS.y * 2.0 - PLAYER_HALF_EXTENTS.x * 2.0)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(0.2, 0.5, 0.9),
                ..default()
            }),
            transform: Transform::from_translation(spawn),
            ..default()
        },
        Player { controller },
    ));

    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(spawn + FollowCamera::default().offset).looking_at(spawn, Vec3::Y),
            ..default()
        },
        FollowCamera::default(),
    ));

    let gem_mesh = meshes.add(Sphere::new(0.35).mesh().ico(2).unwrap_or_else(|_| Sphere::new(0.35).mesh().uv(12, 8)));
    let mut placed = 0u32;
    for (kind, position) in GEMS {
        let color = gem_color(kind);
        commands.spawn((
            PbrBundle {
                mesh: gem_mesh.clone(),
                material: materials.add(StandardMaterial {
                    base_color: color,
                    emissive: color.to_linear() * 0.6,
                    ..default()
                }),
                transform: Transform::from_translation(position),
                ..default()
            },
            Gem { kind: kind.to_string(), value: gems.value_of(kind) },
        ));
        placed += 1;
    }
    info!("Level built: {} platforms, {placed} gems", PLATFORMS.len());
    commands.insert_resource(CollectibleTracker::new(placed));
}
