use bevy::prelude::*;
use bevy::window::{Window, WindowPlugin};
use skyhop::collectible::{CollectibleTracker, GemRegistry, GEMS_DIR};
use skyhop::menu::PauseMenu;
use skyhop::settings::loader::{self as settings_loader, SETTINGS_DIR};
use skyhop::ui::{spawn_hud, spawn_menu_overlay, update_hud};

mod app;
use app::{
    apply_player_settings, collect_gems, cursor_grab, follow_camera, gather_input, menu_input, present_mode,
    setup, show_player_state, spin_gems, step_players, sync_player_transform, sync_vsync_settings,
    update_menu_overlay, LocomotionClock,
};

fn main() {
    let settings = settings_loader::load_settings_from_dir(SETTINGS_DIR);
    let settings_watcher = settings_loader::settings_watcher_or_stub(SETTINGS_DIR);
    let gems = GemRegistry::load_from_dir(GEMS_DIR);

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "skyhop".to_string(),
            position: WindowPosition::Centered(MonitorSelection::Primary),
            present_mode: present_mode(&settings.graphics),
            ..default()
        }),
        ..default()
    }));

    app.insert_resource(settings);
    app.insert_resource(settings_watcher);
    app.insert_resource(gems);
    app.insert_resource(CollectibleTracker::default());
    app.insert_resource(PauseMenu::default());
    app.insert_resource(LocomotionClock::default());

    app.add_systems(Startup, (setup, spawn_hud, spawn_menu_overlay));
    app.add_systems(
        Update,
        (
            settings_loader::check_settings_changes,
            apply_player_settings,
            menu_input,
            cursor_grab,
            gather_input,
            step_players,
            sync_player_transform,
            follow_camera,
            collect_gems,
            show_player_state,
            spin_gems,
            update_hud,
            update_menu_overlay,
        )
            .chain(),
    );
    app.add_systems(Update, sync_vsync_settings);

    app.run();
}
