//! Mouse Input Module
//!
//! Mouse button identifiers, decoupled from winit.

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// State of the three standard mouse buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press or release. Returns `true` only on a fresh press
    /// (the button was up before), so auto-repeat does not fire twice.
    pub fn set(&mut self, button: MouseButton, pressed: bool) -> bool {
        let slot = match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Middle => &mut self.middle,
            MouseButton::Right => &mut self.right,
            MouseButton::Other(_) => return false,
        };
        let fresh = pressed && !*slot;
        *slot = pressed;
        fresh
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
