//! Input Bindings Module
//!
//! Maps physical keys and mouse buttons to sandbox actions. Movement keys are
//! not actions; they are held-state tracked by [`super::MovementKeys`].

use std::collections::HashMap;

use super::{KeyCode, MouseButton};

/// Discrete sandbox actions triggered by a key or button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Select hotbar slot (zero-based)
    SelectSlot(usize),
    /// Quarter-turn the stairs rotation (default: R)
    RotateStairs,
    /// Release the pointer lock (default: Escape)
    ReleasePointer,
    /// Place the selected block (default: left mouse)
    Place,
    /// Remove the targeted block (default: right mouse)
    Remove,
}

/// Maps physical keys to logical actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, InputAction>,
    action_to_key: HashMap<InputAction, KeyCode>,
    button_to_action: HashMap<MouseButton, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Default bindings:
    /// - 1-9 = SelectSlot(0..9)
    /// - R = RotateStairs
    /// - Escape = ReleasePointer
    /// - Left mouse = Place, right mouse = Remove
    pub fn new() -> Self {
        let mut bindings = Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
            button_to_action: HashMap::new(),
        };

        for key in [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
            KeyCode::Digit9,
        ] {
            if let Some(slot) = key.hotbar_slot() {
                bindings.bind(key, InputAction::SelectSlot(slot));
            }
        }
        bindings.bind(KeyCode::R, InputAction::RotateStairs);
        bindings.bind(KeyCode::Escape, InputAction::ReleasePointer);

        bindings.button_to_action.insert(MouseButton::Left, InputAction::Place);
        bindings.button_to_action.insert(MouseButton::Right, InputAction::Remove);

        bindings
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// If the action was previously bound to another key, that binding is also removed.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }
        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }

        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }

    /// Action for a mouse button. Middle and extra buttons have none.
    pub fn button_action(&self, button: MouseButton) -> Option<InputAction> {
        self.button_to_action.get(&button).copied()
    }
}
