pub mod display;
pub mod menu;
pub mod player;
pub mod setup;

pub use display::{present_mode, sync_vsync_settings};
pub use menu::{menu_input, update_menu_overlay};
pub use player::{
    apply_player_settings, collect_gems, cursor_grab, follow_camera, gather_input, show_player_state,
    spin_gems, step_players, sync_player_transform, LocomotionClock,
};
pub use setup::setup;
