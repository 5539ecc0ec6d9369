//! Input Module
//!
//! Platform-agnostic keyboard, mouse and pointer-lock state. The binary maps
//! winit events onto these types.

pub mod bindings;
pub mod keyboard;
pub mod mouse;
pub mod pointer;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, MovementKeys};
pub use mouse::{ButtonState, MouseButton};
pub use pointer::{CursorAction, PointerLock};
