//! The fixed logical action vocabulary and the per-frame action set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Console/display prefix for the active-action line.
pub const ACTIVE_LABEL: &str = "Actions actives :";

/// A named logical input signal, decoupled from physical control layout.
///
/// The vocabulary is fixed: four directions plus eight buttons. The names
/// keep the French labels the tester has always used (`haut` = up, `bas` =
/// down, `gauche` = left, `droite` = right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Haut,
    Bas,
    Gauche,
    Droite,
    ActionA,
    ActionB,
    ActionX,
    ActionY,
    ActionL,
    ActionR,
    Select,
    Start,
}

impl Action {
    /// Number of logical actions.
    pub const COUNT: usize = 12;

    /// Every action, in display order.
    pub const ALL: [Action; Self::COUNT] = [
        Action::Haut,
        Action::Bas,
        Action::Gauche,
        Action::Droite,
        Action::ActionA,
        Action::ActionB,
        Action::ActionX,
        Action::ActionY,
        Action::ActionL,
        Action::ActionR,
        Action::Select,
        Action::Start,
    ];

    /// Serialized name, as written in config files and console output.
    pub fn label(self) -> &'static str {
        match self {
            Action::Haut => "haut",
            Action::Bas => "bas",
            Action::Gauche => "gauche",
            Action::Droite => "droite",
            Action::ActionA => "action_a",
            Action::ActionB => "action_b",
            Action::ActionX => "action_x",
            Action::ActionY => "action_y",
            Action::ActionL => "action_l",
            Action::ActionR => "action_r",
            Action::Select => "select",
            Action::Start => "start",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One frame's worth of action flags.
///
/// Always holds exactly one flag per [`Action`] - a frame can never gain or
/// lose keys, whatever the controller reports. Recreated fresh every frame
/// and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet {
    flags: [bool; Action::COUNT],
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the flag for `action` on.
    ///
    /// Activation never turns a flag off, so several physical buttons mapped
    /// to the same action OR-combine instead of overwriting each other.
    pub fn activate(&mut self, action: Action) {
        self.flags[action.index()] = true;
    }

    pub fn is_active(self, action: Action) -> bool {
        self.flags[action.index()]
    }

    /// Actions currently active, in display order.
    pub fn active(self) -> impl Iterator<Item = Action> {
        Action::ALL.into_iter().filter(move |a| self.flags[a.index()])
    }

    fn joined(self, separator: &str) -> String {
        self.active()
            .map(Action::label)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Comma-separated transition line for the console,
    /// e.g. `Actions actives : haut, action_a`.
    pub fn console_line(self) -> String {
        format!("{} {}", ACTIVE_LABEL, self.joined(", "))
    }

    /// Space-joined line rendered to the display surface every frame.
    pub fn display_line(self) -> String {
        format!("{} {}", ACTIVE_LABEL, self.joined(" "))
    }
}
