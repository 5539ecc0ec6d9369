//! Player Module
//!
//! Fly locomotion for the first-person player.

pub mod movement_controller;

pub use movement_controller::{FLY_SPEED, FlyController};
