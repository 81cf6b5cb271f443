//! Controller input: the narrow capability interface and the gilrs backend.

pub mod gilrs_pad;

pub use gilrs_pad::GilrsPad;

use thiserror::Error;

/// Errors raised while acquiring the controller at startup.
///
/// Acquisition is the only fallible step; once a pad is held, every later
/// read degrades to a silent no-op on missing capabilities.
#[derive(Debug, Error)]
pub enum PadError {
    /// No controller present at startup - fatal, there is nothing to map.
    #[error("aucune manette détectée (no gamepad detected)")]
    NoGamepad,

    /// The input backend itself failed to come up.
    #[error("failed to initialize input backend: {0}")]
    Backend(String),
}

/// Narrow capability view of one controller's current state.
///
/// Exposes exactly what the action translator needs: counts and indexed
/// accessors for buttons, axes and hats. Out-of-range indices read as
/// unpressed/centered, so a misconfigured index degrades to "no input"
/// rather than an error.
pub trait ControllerState {
    fn button_count(&self) -> usize;

    /// Whether physical button `index` is currently pressed.
    fn is_button_pressed(&self, index: usize) -> bool;

    fn axis_count(&self) -> usize;

    /// Current value of axis `index`, in [-1.0, 1.0]. Up and left read
    /// negative.
    fn axis_value(&self, index: usize) -> f32;

    fn hat_count(&self) -> usize;

    /// Current (x, y) of hat `index`, each in {-1, 0, 1}. Right and up
    /// read +1.
    fn hat_value(&self, index: usize) -> (i8, i8);
}

/// A pad the poll loop can refresh before each snapshot.
pub trait PollablePad: ControllerState {
    /// Bring cached state up to date with the device.
    fn poll(&mut self);
}
