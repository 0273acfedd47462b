//! Settings loading and hot-reloading.
//!
//! Settings are loaded from RON files in the `data/settings` directory. If multiple
//! RON files are present, the first successfully parsed `Settings` (by file name) is
//! used. If no RON files are found or none parse, default settings are used.
use crate::ron_loader::{load_ron_files, setup_ron_watcher, RonWatcher};
use crate::settings::Settings;
use bevy::log::{info, warn};
use bevy::prelude::{Res, ResMut, Resource};

pub const SETTINGS_DIR: &str = "data/settings";

#[derive(Resource)]
pub struct SettingsWatcher(pub RonWatcher);

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher(RonWatcher::stub())
    }
}

/// Load settings from `path` (directory).
///
/// # Arguments
/// * `path` - The directory path where settings RON files are located (e.g., "data/settings").
///
/// # Returns
/// The first successfully parsed `Settings`, or the defaults.
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    let items: Vec<Settings> = load_ron_files(path);
    if let Some(first) = items.into_iter().next() {
        first
    } else {
        warn!("No settings found in {path}, using defaults");
        Settings::defaults()
    }
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Propagates the `notify::Error` from `setup_ron_watcher`.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(SettingsWatcher)
}

/// Watcher or stub, logging why the stub was chosen.
#[must_use]
pub fn settings_watcher_or_stub(path: &str) -> SettingsWatcher {
    setup_settings_watcher(path).unwrap_or_else(|e| {
        warn!("Settings hot-reload disabled: {e}");
        SettingsWatcher::stub()
    })
}

/// Reload the `Settings` resource when the watcher saw a modification.
///
/// Other systems pick the change up through `Res<Settings>::is_changed`.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    if watcher.0.take_changed() {
        info!("Settings changed, reloading...");
        *settings = load_settings_from_dir(SETTINGS_DIR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_gives_defaults() {
        assert_eq!(load_settings_from_dir("no/such/settings/dir"), Settings::defaults());
    }

    #[test]
    fn shipped_settings_parse() {
        let settings = load_settings_from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data/settings"));
        assert!(settings.player.move_speed > 0.0);
        assert!(settings.controls.key_for("jump").is_some());
        assert_eq!(settings.controls.key_for("dive"), Some(bevy::prelude::KeyCode::KeyQ));
    }
}
