//! Input mapping
//!
//! Raw key names and touch controls are translated once into [`Action`]s; the
//! simulation only ever sees the resulting [`TickInput`] snapshot.

use crate::sim::TickInput;

/// Logical input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Pause,
}

/// Map a `KeyboardEvent.key` or `.code` value onto an action
///
/// Unknown keys map to `None` and are ignored.
pub fn action_for_key(key: &str) -> Option<Action> {
    match key.to_ascii_lowercase().as_str() {
        "arrowup" | "w" | "keyw" => Some(Action::Up),
        "arrowdown" | "s" | "keys" => Some(Action::Down),
        "arrowleft" | "a" | "keya" => Some(Action::Left),
        "arrowright" | "d" | "keyd" => Some(Action::Right),
        " " | "space" | "spacebar" => Some(Action::Fire),
        "escape" | "esc" | "p" | "keyp" => Some(Action::Pause),
        _ => None,
    }
}

/// Device family chosen at start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Pc,
    Mobile,
}

impl Platform {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "pc" | "desktop" => Some(Platform::Pc),
            "mobile" | "touch" => Some(Platform::Mobile),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Pc => "pc",
            Platform::Mobile => "mobile",
        }
    }

    /// Touch d-pad and fire button are shown
    pub fn has_touch_controls(&self) -> bool {
        matches!(self, Platform::Mobile)
    }
}

/// Touch d-pad buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl TouchButton {
    pub const ALL: [TouchButton; 5] = [
        TouchButton::Up,
        TouchButton::Down,
        TouchButton::Left,
        TouchButton::Right,
        TouchButton::Fire,
    ];

    /// DOM id of the on-screen button
    pub fn element_id(&self) -> &'static str {
        match self {
            TouchButton::Up => "touch-up",
            TouchButton::Down => "touch-down",
            TouchButton::Left => "touch-left",
            TouchButton::Right => "touch-right",
            TouchButton::Fire => "touch-fire",
        }
    }
}

impl From<TouchButton> for Action {
    fn from(button: TouchButton) -> Self {
        match button {
            TouchButton::Up => Action::Up,
            TouchButton::Down => Action::Down,
            TouchButton::Left => Action::Left,
            TouchButton::Right => Action::Right,
            TouchButton::Fire => Action::Fire,
        }
    }
}

/// Currently held actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    /// Record a press or release; returns false for actions that are not held
    pub fn set(&mut self, action: Action, pressed: bool) -> bool {
        let slot = match action {
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Fire => &mut self.fire,
            Action::Pause => return false,
        };
        *slot = pressed;
        true
    }

    /// Drop everything (focus loss, restart)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the simulation
    pub fn to_tick_input(&self) -> TickInput {
        TickInput {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
        }
    }
}
