//! The action translator: one controller snapshot in, one action set out.

use crate::actions::{Action, ActionSet};
use crate::config::MappingConfig;
use crate::input::ControllerState;

/// Dead-zone threshold for axis-mode directional input.
///
/// Axis magnitudes at or below this read as "no directional input" - a dead
/// zone, not a fallback to hat mode.
pub const DPAD_AXIS_THRESHOLD: f32 = 0.5;

/// Translates raw controller state into the fixed action vocabulary.
///
/// Holds its configuration explicitly so tests can instantiate it with any
/// map; nothing is read from ambient scope.
#[derive(Debug, Clone)]
pub struct Translator {
    config: MappingConfig,
}

impl Translator {
    pub fn new(config: MappingConfig) -> Self {
        Self { config }
    }

    /// Produce the action set for the controller's current state.
    ///
    /// Pure with respect to the snapshot: same inputs, same set, no side
    /// effects.
    pub fn translate(&self, pad: &impl ControllerState) -> ActionSet {
        let mut actions = ActionSet::new();

        // Buttons. Activation OR-combines, so two physical buttons mapped to
        // the same action cannot mask each other.
        for index in 0..pad.button_count() {
            if !pad.is_button_pressed(index) {
                continue;
            }
            let Ok(index) = u8::try_from(index) else {
                continue;
            };
            if let Some(&action) = self.config.button_map.get(&index) {
                actions.activate(action);
            }
        }

        // Directional input: hat or axes, never both.
        if self.config.dpad.use_hat {
            if pad.hat_count() > 0 {
                let (x, y) = pad.hat_value(0);
                if x == -1 {
                    actions.activate(Action::Gauche);
                }
                if x == 1 {
                    actions.activate(Action::Droite);
                }
                if y == 1 {
                    actions.activate(Action::Haut);
                }
                if y == -1 {
                    actions.activate(Action::Bas);
                }
            }
        } else if pad.axis_count() >= 2 {
            let horizontal = pad.axis_value(self.config.dpad.horizontal_axis);
            let vertical = pad.axis_value(self.config.dpad.vertical_axis);
            if horizontal < -DPAD_AXIS_THRESHOLD {
                actions.activate(Action::Gauche);
            }
            if horizontal > DPAD_AXIS_THRESHOLD {
                actions.activate(Action::Droite);
            }
            if vertical < -DPAD_AXIS_THRESHOLD {
                actions.activate(Action::Haut);
            }
            if vertical > DPAD_AXIS_THRESHOLD {
                actions.activate(Action::Bas);
            }
        }

        actions
    }
}
