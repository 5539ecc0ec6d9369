//! Keyboard Input Module
//!
//! Key codes and held-key tracking for fly movement.
//! Decoupled from winit to use generic key codes.

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,

    // Stairs rotation
    R,

    // Hotbar
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,

    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Zero-based hotbar slot for digit keys 1-9.
    pub fn hotbar_slot(self) -> Option<usize> {
        let slot = match self {
            KeyCode::Digit1 => 0,
            KeyCode::Digit2 => 1,
            KeyCode::Digit3 => 2,
            KeyCode::Digit4 => 3,
            KeyCode::Digit5 => 4,
            KeyCode::Digit6 => 5,
            KeyCode::Digit7 => 6,
            KeyCode::Digit8 => 7,
            KeyCode::Digit9 => 8,
            _ => return None,
        };
        Some(slot)
    }
}

/// Tracks which movement keys are held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    /// W key - move forward
    pub forward: bool,
    /// S key - move backward
    pub backward: bool,
    /// A key - strafe left
    pub left: bool,
    /// D key - strafe right
    pub right: bool,
    /// Space - fly up
    pub up: bool,
    /// Shift - fly down
    pub down: bool,
}

impl MovementKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update movement state based on key press/release.
    ///
    /// Returns `true` if the key was a movement key and was handled,
    /// `false` otherwise.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match key {
            KeyCode::W => self.forward = pressed,
            KeyCode::S => self.backward = pressed,
            KeyCode::A => self.left = pressed,
            KeyCode::D => self.right = pressed,
            KeyCode::Space => self.up = pressed,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.down = pressed,
            _ => return false,
        }
        true
    }

    pub fn any_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    /// Release every key, e.g. when the pointer lock is lost.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Forward/backward direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Left/right direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }

    /// Up/down direction (-1, 0, or 1).
    pub fn up_axis(&self) -> i32 {
        (self.up as i32) - (self.down as i32)
    }
}
