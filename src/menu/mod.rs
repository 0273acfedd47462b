//! Pause menu state machine and the locomotion option sliders.
//!
//! `PauseMenu` only tracks which screen is open and what an input means; the
//! front-end draws the screens and acts on the returned `MenuOutcome`. Any
//! screen other than `Hidden` keeps the game paused.
use bevy::log::info;
use bevy::prelude::Resource;

use crate::player::LocomotionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuScreen {
    #[default]
    Hidden,
    Pause,
    Options,
    Controls,
}

/// Entries on the pause screen, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseItem {
    Resume,
    LevelSelect,
    Options,
    Controls,
    Quit,
}

impl PauseItem {
    pub const ALL: [PauseItem; 5] = [
        PauseItem::Resume,
        PauseItem::LevelSelect,
        PauseItem::Options,
        PauseItem::Controls,
        PauseItem::Quit,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PauseItem::Resume => "Resume",
            PauseItem::LevelSelect => "Level Select",
            PauseItem::Options => "Options",
            PauseItem::Controls => "Controls",
            PauseItem::Quit => "Quit",
        }
    }
}

/// What the caller has to do after a menu input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    None,
    Paused,
    Resumed,
    Opened(MenuScreen),
    LevelSelect,
    Quit,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PauseMenu {
    screen: MenuScreen,
    selected_slider: usize,
}

impl PauseMenu {
    #[must_use]
    pub fn screen(&self) -> MenuScreen { self.screen }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.screen != MenuScreen::Hidden
    }

    /// Escape toggles pause from gameplay and steps back from sub-screens.
    pub fn handle_escape(&mut self) -> MenuOutcome {
        match self.screen {
            MenuScreen::Hidden => {
                self.screen = MenuScreen::Pause;
                MenuOutcome::Paused
            }
            MenuScreen::Pause => {
                self.screen = MenuScreen::Hidden;
                MenuOutcome::Resumed
            }
            MenuScreen::Options | MenuScreen::Controls => {
                self.screen = MenuScreen::Pause;
                MenuOutcome::Opened(MenuScreen::Pause)
            }
        }
    }

    /// Leave a sub-screen through its back button.
    pub fn back(&mut self) -> MenuOutcome {
        match self.screen {
            MenuScreen::Options | MenuScreen::Controls => {
                self.screen = MenuScreen::Pause;
                MenuOutcome::Opened(MenuScreen::Pause)
            }
            _ => MenuOutcome::None,
        }
    }

    /// Choose an entry of the pause screen. Ignored on any other screen.
    pub fn activate(&mut self, item: PauseItem) -> MenuOutcome {
        if self.screen != MenuScreen::Pause {
            return MenuOutcome::None;
        }
        match item {
            PauseItem::Resume => {
                self.screen = MenuScreen::Hidden;
                MenuOutcome::Resumed
            }
            PauseItem::LevelSelect => {
                info!("Level Select pressed");
                MenuOutcome::LevelSelect
            }
            PauseItem::Options => {
                self.screen = MenuScreen::Options;
                self.selected_slider = 0;
                MenuOutcome::Opened(MenuScreen::Options)
            }
            PauseItem::Controls => {
                self.screen = MenuScreen::Controls;
                MenuOutcome::Opened(MenuScreen::Controls)
            }
            PauseItem::Quit => {
                info!("Quitting game...");
                MenuOutcome::Quit
            }
        }
    }

    #[must_use]
    pub fn selected_slider(&self) -> OptionSlider {
        OptionSlider::ALL[self.selected_slider % OptionSlider::ALL.len()]
    }

    /// Move the options cursor by `offset` entries, wrapping around.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn move_selection(&mut self, offset: isize) {
        let len = OptionSlider::ALL.len() as isize;
        let next = (self.selected_slider as isize + offset).rem_euclid(len);
        self.selected_slider = next as usize;
    }

    /// Nudge the selected slider by `steps` increments, writing into `config`.
    /// Ignored unless the options screen is open.
    pub fn adjust_selected(&self, config: &mut LocomotionConfig, steps: f32) -> Option<f32> {
        if self.screen != MenuScreen::Options {
            return None;
        }
        Some(self.selected_slider().adjust(config, steps))
    }
}

/// Tuning values exposed on the options screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionSlider {
    MoveSpeed,
    SprintModifier,
    JumpForce,
    DiveForce,
}

impl OptionSlider {
    pub const ALL: [OptionSlider; 4] = [
        OptionSlider::MoveSpeed,
        OptionSlider::SprintModifier,
        OptionSlider::JumpForce,
        OptionSlider::DiveForce,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OptionSlider::MoveSpeed => "Move Speed",
            OptionSlider::SprintModifier => "Sprint Modifier",
            OptionSlider::JumpForce => "Jump Force",
            OptionSlider::DiveForce => "Dive Force",
        }
    }

    /// Slider limits as `(min, max)`.
    #[must_use]
    pub fn range(self) -> (f32, f32) {
        match self {
            OptionSlider::MoveSpeed | OptionSlider::SprintModifier => (0.0, 50.0),
            OptionSlider::JumpForce => (0.0, 100.0),
            OptionSlider::DiveForce => (0.0, 150.0),
        }
    }

    /// Size of one adjustment step.
    #[must_use]
    pub fn step(self) -> f32 {
        let (min, max) = self.range();
        (max - min) / 50.0
    }

    #[must_use]
    pub fn read(self, config: &LocomotionConfig) -> f32 {
        match self {
            OptionSlider::MoveSpeed => config.move_speed,
            OptionSlider::SprintModifier => config.sprint_modifier,
            OptionSlider::JumpForce => config.jump_force,
            OptionSlider::DiveForce => config.dive_force,
        }
    }

    /// Store `value`, clamped to the slider range, and return what was stored.
    pub fn write(self, config: &mut LocomotionConfig, value: f32) -> f32 {
        let (min, max) = self.range();
        let value = value.clamp(min, max);
        let field = match self {
            OptionSlider::MoveSpeed => &mut config.move_speed,
            OptionSlider::SprintModifier => &mut config.sprint_modifier,
            OptionSlider::JumpForce => &mut config.jump_force,
            OptionSlider::DiveForce => &mut config.dive_force,
        };
        *field = value;
        value
    }

    pub fn adjust(self, config: &mut LocomotionConfig, steps: f32) -> f32 {
        self.write(config, self.read(config) + steps * self.step())
    }
}
