//! Camera Module
//!
//! First-person camera state and math. Window-system agnostic.

pub mod fps_controller;

pub use fps_controller::{CameraRay, FirstPersonCamera, Projection};
