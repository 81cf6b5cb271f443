//! GilRs-backed controller state.
//!
//! gilrs exposes buttons and axes by name rather than by raw index, so this
//! backend pins a canonical ordering and serves the indexed capability
//! interface from it. The ordering follows the DirectInput-style numbering
//! of Nintendo-layout pads, which is what the default button map was written
//! against.

use gilrs::{Axis, Button, Event, EventType, Gilrs};
use tracing::{debug, info, warn};

use super::{ControllerState, PadError, PollablePad};

/// Canonical button numbering.
///
/// Index 0 is the top face button (X on Nintendo-layout pads), continuing
/// clockwise through the face buttons, then shoulders, menu buttons and
/// stick clicks. Run `--diagnostics` to verify against a real pad.
pub const BUTTON_ORDER: [Button; 12] = [
    Button::North,         // 0: X (top)
    Button::East,          // 1: A (right)
    Button::South,         // 2: B (bottom)
    Button::West,          // 3: Y (left)
    Button::LeftTrigger,   // 4: L1
    Button::RightTrigger,  // 5: R1
    Button::LeftTrigger2,  // 6: L2
    Button::RightTrigger2, // 7: R2
    Button::Select,        // 8
    Button::Start,         // 9
    Button::LeftThumb,     // 10: L3
    Button::RightThumb,    // 11: R3
];

/// Canonical axis numbering.
///
/// The bool marks axes gilrs reports up-positive; those are negated so the
/// translator sees the HID convention (up and left negative).
pub const AXIS_ORDER: [(Axis, bool); 6] = [
    (Axis::LeftStickX, false),  // 0
    (Axis::LeftStickY, true),   // 1
    (Axis::RightStickX, false), // 2
    (Axis::RightStickY, true),  // 3
    (Axis::LeftZ, false),       // 4
    (Axis::RightZ, false),      // 5
];

/// A live controller handle; the production [`ControllerState`].
pub struct GilrsPad {
    gilrs: Gilrs,
    id: gilrs::GamepadId,
}

impl GilrsPad {
    /// Acquire the first connected gamepad.
    ///
    /// Drains pending gilrs events first so pads that announce themselves at
    /// startup are enumerated. Fails with [`PadError::NoGamepad`] when
    /// nothing is connected; this is the tool's only fatal error.
    pub fn acquire() -> Result<Self, PadError> {
        let mut gilrs = Gilrs::new().map_err(|e| PadError::Backend(e.to_string()))?;

        // Let gilrs see connection events queued before we got here.
        while gilrs.next_event().is_some() {}

        let id = gilrs
            .gamepads()
            .map(|(id, _)| id)
            .next()
            .ok_or(PadError::NoGamepad)?;

        let pad = gilrs.gamepad(id);
        info!("Manette prête : \"{}\" ({:?})", pad.name(), pad.uuid());
        Ok(Self { gilrs, id })
    }

    fn gamepad(&self) -> gilrs::Gamepad<'_> {
        self.gilrs.gamepad(self.id)
    }
}

impl PollablePad for GilrsPad {
    /// Drain pending gilrs events so the cached gamepad state is current.
    fn poll(&mut self) {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            if id != self.id {
                continue;
            }
            match event {
                EventType::Disconnected => {
                    warn!("Gamepad disconnected; inputs will read released");
                }
                EventType::Connected => info!("Gamepad reconnected"),
                _ => debug!("gilrs event: {:?}", event),
            }
        }
    }
}

impl ControllerState for GilrsPad {
    fn button_count(&self) -> usize {
        BUTTON_ORDER.len()
    }

    fn is_button_pressed(&self, index: usize) -> bool {
        BUTTON_ORDER
            .get(index)
            .map(|b| self.gamepad().is_pressed(*b))
            .unwrap_or(false)
    }

    fn axis_count(&self) -> usize {
        AXIS_ORDER.len()
    }

    fn axis_value(&self, index: usize) -> f32 {
        match AXIS_ORDER.get(index) {
            Some((axis, inverted)) => {
                let value = self.gamepad().value(*axis);
                if *inverted {
                    -value
                } else {
                    value
                }
            }
            None => 0.0,
        }
    }

    fn hat_count(&self) -> usize {
        // The D-Pad is surfaced as a single hat. Pads without one simply
        // report it centered.
        1
    }

    fn hat_value(&self, index: usize) -> (i8, i8) {
        if index != 0 {
            return (0, 0);
        }
        let pad = self.gamepad();
        let x = pad.is_pressed(Button::DPadRight) as i8 - pad.is_pressed(Button::DPadLeft) as i8;
        let y = pad.is_pressed(Button::DPadUp) as i8 - pad.is_pressed(Button::DPadDown) as i8;
        (x, y)
    }
}
