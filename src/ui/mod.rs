//! User interface: gem HUD and the pause menu overlay.
//!
//! The HUD shows the collected gem value, the completion percentage and a
//! horizontal progress bar fed by `CollectibleTracker`. The pause overlay is a
//! single text block whose content is rebuilt from `PauseMenu` whenever the
//! menu or the tuning values change.

use bevy::prelude::*;

use crate::collectible::CollectibleTracker;
use crate::menu::{MenuScreen, OptionSlider, PauseItem, PauseMenu};
use crate::player::LocomotionConfig;
use crate::settings::ControlsSettings;

const HUD_FONT_SIZE: f32 = 22.0;
const PROGRESS_BAR_WIDTH: f32 = 240.0;

#[derive(Component)]
pub struct GemValueText;

#[derive(Component)]
pub struct GemPercentText;

#[derive(Component)]
pub struct GemProgressFill;

#[derive(Component)]
pub struct MenuOverlay;

#[derive(Component)]
pub struct MenuOverlayText;

/// Spawn the gem HUD in the top-left corner.
///
/// # Arguments
/// * `commands` - `Commands` used to spawn the UI nodes
pub fn spawn_hud(mut commands: Commands) {
    let style = TextStyle {
        font_size: HUD_FONT_SIZE,
        color: Color::WHITE,
        ..default()
    };

    commands
        .spawn(NodeBundle {
            style: Style {
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                top: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            ..default()
        })
        .with_children(|p| {
            p.spawn((TextBundle::from_section("Gems Value: 0", style.clone()), GemValueText));
            p.spawn((TextBundle::from_section("0%", style), GemPercentText));
            p.spawn(NodeBundle {
                style: Style {
                    width: Val::Px(PROGRESS_BAR_WIDTH),
                    height: Val::Px(10.0),
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.5).into(),
                ..default()
            })
            .with_children(|bar| {
                bar.spawn((
                    NodeBundle {
                        style: Style {
                            width: Val::Percent(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        background_color: Color::srgb(0.95, 0.8, 0.2).into(),
                        ..default()
                    },
                    GemProgressFill,
                ));
            });
        });
}

/// Refresh the HUD after the tally changed.
#[allow(clippy::needless_pass_by_value, clippy::type_complexity)]
pub fn update_hud(
    tracker: Res<CollectibleTracker>,
    mut value_text: Query<&mut Text, (With<GemValueText>, Without<GemPercentText>)>,
    mut percent_text: Query<&mut Text, (With<GemPercentText>, Without<GemValueText>)>,
    mut fill: Query<&mut Style, With<GemProgressFill>>,
) {
    if !tracker.is_changed() {
        return;
    }
    for mut text in &mut value_text {
        text.sections[0].value = tracker.value_text();
    }
    for mut text in &mut percent_text {
        text.sections[0].value = tracker.percentage_text();
    }
    for mut style in &mut fill {
        style.width = Val::Percent(tracker.fill_amount() * 100.0);
    }
}

/// Spawn the (initially hidden) full-screen pause overlay.
pub fn spawn_menu_overlay(mut commands: Commands) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                background_color: Color::srgba(0.0, 0.0, 0.0, 0.6).into(),
                visibility: Visibility::Hidden,
                ..default()
            },
            MenuOverlay,
        ))
        .with_children(|p| {
            p.spawn((
                TextBundle::from_section(
                    "",
                    TextStyle {
                        font_size: 28.0,
                        color: Color::WHITE,
                        ..default()
                    },
                ),
                MenuOverlayText,
            ));
        });
}

/// Text shown for the current menu screen.
///
/// # Arguments
/// * `menu` - the pause menu state
/// * `config` - live tuning values, shown on the options screen
/// * `controls` - key bindings, shown on the controls screen
#[must_use]
pub fn menu_text(menu: &PauseMenu, config: &LocomotionConfig, controls: &ControlsSettings) -> String {
    match menu.screen() {
        MenuScreen::Hidden => String::new(),
        MenuScreen::Pause => {
            let mut out = String::from("PAUSED\n\n");
            for (i, item) in PauseItem::ALL.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", i + 1, item.label()));
            }
            out.push_str("\nEsc: resume");
            out
        }
        MenuScreen::Options => {
            let mut out = String::from("OPTIONS\n\n");
            for slider in OptionSlider::ALL {
                let marker = if slider == menu.selected_slider() { ">" } else { " " };
                let (min, max) = slider.range();
                out.push_str(&format!(
                    "{marker} {}: {:.1}  [{min:.0}-{max:.0}]\n",
                    slider.label(),
                    slider.read(config)
                ));
            }
            out.push_str("\nUp/Down: select   Left/Right: adjust   Esc: back");
            out
        }
        MenuScreen::Controls => {
            let mut out = String::from("CONTROLS\n\n");
            for (label, action) in [
                ("Forward", "forward"),
                ("Back", "back"),
                ("Left", "left"),
                ("Right", "right"),
                ("Jump (twice in the air to glide)", "jump"),
                ("Dive", "dive"),
                ("Sprint", "sprint"),
            ] {
                let key = controls.keybinds.get(action).map_or("-", String::as_str);
                out.push_str(&format!("{label}: {key}\n"));
            }
            out.push_str("Turn: mouse\n\nEsc: back");
            out
        }
    }
}
