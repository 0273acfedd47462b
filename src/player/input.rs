//! Player input abstraction.
//!
//! The locomotion controller never touches a keyboard directly. It asks an
//! `InputSource` for axis values and for control edges (pressed or released
//! during the current tick). `InputSnapshot` is the plain implementation the
//! front-end fills once per frame and tests fill by hand.

use std::collections::HashSet;

/// Analog movement axes, each in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    /// Strafe: -1 left, +1 right.
    Horizontal,
    /// Walk: -1 back, +1 forward.
    Vertical,
}

/// Digital controls the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Jump,
    Dive,
    Sprint,
}

/// Source of per-tick input for the locomotion controller.
pub trait InputSource {
    /// Current value of `axis`, clamped to `[-1, 1]`.
    fn axis(&self, axis: InputAxis) -> f32;
    /// `true` only on the tick the control went down.
    fn pressed(&self, control: Control) -> bool;
    /// `true` only on the tick the control went up.
    fn released(&self, control: Control) -> bool;
    /// Horizontal mouse delta for this tick, already scaled to axis units.
    fn mouse_axis_x(&self) -> f32;
}

/// Input captured for a single frame.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub horizontal: f32,
    pub vertical: f32,
    pub mouse_x: f32,
    pressed: HashSet<Control>,
    released: HashSet<Control>,
}

impl InputSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both movement axes (values are clamped on read).
    pub fn set_axes(&mut self, horizontal: f32, vertical: f32) {
        self.horizontal = horizontal;
        self.vertical = vertical;
    }

    /// Record a down edge for `control` this frame.
    pub fn press(&mut self, control: Control) {
        self.pressed.insert(control);
    }

    /// Record an up edge for `control` this frame.
    pub fn release(&mut self, control: Control) {
        self.released.insert(control);
    }

    /// Forget edges and mouse motion; axes are level-triggered and kept.
    pub fn clear_edges(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.mouse_x = 0.0;
    }
}

impl InputSource for InputSnapshot {
    fn axis(&self, axis: InputAxis) -> f32 {
        let v = match axis {
            InputAxis::Horizontal => self.horizontal,
            InputAxis::Vertical => self.vertical,
        };
        v.clamp(-1.0, 1.0)
    }

    fn pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }

    fn released(&self, control: Control) -> bool {
        self.released.contains(&control)
    }

    fn mouse_axis_x(&self) -> f32 {
        self.mouse_x
    }
}
