//! Display-related systems, such as syncing vsync
//! settings from the main `Settings` resource to the primary window's present mode.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use skyhop::settings::GraphicsSettings;
use skyhop::settings::Settings;

/// Present mode named by `graphics.present_mode`, used when vsync is off.
#[must_use]
pub fn present_mode(graphics: &GraphicsSettings) -> PresentMode {
    if graphics.vsync {
        return PresentMode::AutoVsync;
    }
    match graphics.present_mode.as_str() {
        "Immediate" => PresentMode::Immediate,
        "Mailbox" => PresentMode::Mailbox,
        "Fifo" => PresentMode::Fifo,
        "FifoRelaxed" => PresentMode::FifoRelaxed,
        "AutoVsync" => PresentMode::AutoVsync,
        _ => PresentMode::AutoNoVsync,
    }
}

/// Sync the graphics settings into the present mode of the primary window.
/// Allows the user to toggle vsync at runtime without restarting.
///
/// # Arguments
/// - `settings`: The current settings resource.
/// - `windows`: Query for the primary window to update its present mode.
/// - `last`: A local cache of the last applied mode to avoid redundant updates.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_vsync_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut last: Local<Option<PresentMode>>,
) {
    let desired = present_mode(&settings.graphics);
    if *last == Some(desired) {
        return;
    }

    for mut w in &mut windows {
        w.present_mode = desired;
    }
    *last = Some(desired);
}
