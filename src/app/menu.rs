//! Pause menu input and overlay systems.
use bevy::app::AppExit;
use bevy::prelude::*;
use skyhop::menu::{MenuOutcome, MenuScreen, PauseItem, PauseMenu};
use skyhop::settings::Settings;
use skyhop::ui::{menu_text, MenuOverlay, MenuOverlayText};

use crate::app::player::{LocomotionClock, Player};

const ITEM_KEYS: [KeyCode; 5] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4, KeyCode::Digit5];

/// Translate key presses into menu actions and apply the outcome.
///
/// # Arguments
/// * `keys` - keyboard state
/// * `settings` - provides the pause key binding
/// * `menu` - pause menu state
/// * `clock` - scheduler gate, closed whenever the menu is open
/// * `players` - sliders write into the live controller config
/// * `exit` - receives the quit request
#[allow(clippy::needless_pass_by_value)]
pub fn menu_input(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut menu: ResMut<PauseMenu>,
    mut clock: ResMut<LocomotionClock>,
    mut players: Query<&mut Player>,
    mut exit: EventWriter<AppExit>,
) {
    let pause_key = settings.controls.key_for("pause").unwrap_or(KeyCode::Escape);

    let mut outcomes = Vec::new();
    if keys.just_pressed(pause_key) {
        outcomes.push(menu.handle_escape());
    }

    match menu.screen() {
        MenuScreen::Pause => {
            if let Some(i) = ITEM_KEYS.iter().position(|k| keys.just_pressed(*k)) {
                outcomes.push(menu.activate(PauseItem::ALL[i]));
            }
        }
        MenuScreen::Options => {
            if keys.just_pressed(KeyCode::ArrowUp) {
                menu.move_selection(-1);
            }
            if keys.just_pressed(KeyCode::ArrowDown) {
                menu.move_selection(1);
            }
            let steps = f32::from(u8::from(keys.just_pressed(KeyCode::ArrowRight)))
                - f32::from(u8::from(keys.just_pressed(KeyCode::ArrowLeft)));
            if steps != 0.0 {
                for mut player in &mut players {
                    menu.adjust_selected(player.controller.config_mut(), steps);
                }
            }
            if keys.just_pressed(KeyCode::Backspace) {
                outcomes.push(menu.back());
            }
        }
        MenuScreen::Controls => {
            if keys.just_pressed(KeyCode::Backspace) {
                outcomes.push(menu.back());
            }
        }
        MenuScreen::Hidden => {}
    }

    for outcome in outcomes {
        match outcome {
            MenuOutcome::Paused => info!("Game paused"),
            MenuOutcome::Resumed => info!("Game resumed"),
            MenuOutcome::Quit => {
                exit.send(AppExit::Success);
            }
            MenuOutcome::Opened(_) | MenuOutcome::LevelSelect | MenuOutcome::None => {}
        }
    }

    let running = !menu.is_paused();
    if clock.0.is_enabled() != running {
        clock.0.set_enabled(running);
    }
}

/// Show or hide the overlay and refresh its text.
#[allow(clippy::needless_pass_by_value)]
pub fn update_menu_overlay(
    menu: Res<PauseMenu>,
    settings: Res<Settings>,
    players: Query<&Player>,
    mut overlay: Query<&mut Visibility, With<MenuOverlay>>,
    mut text: Query<&mut Text, With<MenuOverlayText>>,
) {
    let visible = menu.is_paused();
    for mut v in &mut overlay {
        let wanted = if visible { Visibility::Visible } else { Visibility::Hidden };
        if *v != wanted {
            *v = wanted;
        }
    }
    if !visible {
        return;
    }

    let config = players
        .get_single()
        .map(|p| p.controller.config().clone())
        .unwrap_or_else(|_| settings.player.clone());
    let content = menu_text(&menu, &config, &settings.controls);
    for mut t in &mut text {
        if t.sections[0].value != content {
            t.sections[0].value.clone_from(&content);
        }
    }
}
