//! Player Movement Controller
//!
//! Fly locomotion relative to the camera's facing. There is no gravity and no
//! collision against blocks; the eye is only held above a minimum height and
//! inside the walkable square of the ground plane.
//!
//! # Movement model
//!
//! - WASD moves on the horizontal plane at `speed` m/s. Diagonals are
//!   normalized so they are not faster.
//! - Space and Shift fly straight up and down at the same speed.
//! - After integration `y >= min_height` and x/z stay within `bounds`.

use glam::Vec3;

use crate::config::SandboxConfig;
use crate::input::MovementKeys;

/// Default fly speed in meters per second
pub const FLY_SPEED: f32 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FlyController {
    speed: f32,
    min_height: f32,
    /// Inclusive (min, max) for both x and z
    bounds: (f32, f32),
}

impl Default for FlyController {
    fn default() -> Self {
        Self::from_config(&SandboxConfig::default())
    }
}

impl FlyController {
    pub fn new(speed: f32, min_height: f32, bounds: (f32, f32)) -> Self {
        Self {
            speed,
            min_height,
            bounds,
        }
    }

    pub fn from_config(config: &SandboxConfig) -> Self {
        Self::new(config.move_speed, config.min_eye_height, config.walk_bounds())
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn bounds(&self) -> (f32, f32) {
        self.bounds
    }

    /// Horizontal direction for the held keys, unit length or zero.
    ///
    /// `forward` and `right` are the camera's ground-plane basis.
    pub fn horizontal_direction(input: &MovementKeys, forward: Vec3, right: Vec3) -> Vec3 {
        let local = Vec3::new(input.right_axis() as f32, 0.0, input.forward_axis() as f32);
        let local = local.normalize_or_zero();
        right * local.x + forward * local.z
    }

    /// Integrates one frame of movement and returns the new position.
    pub fn step(
        &self,
        position: Vec3,
        dt: f32,
        input: &MovementKeys,
        forward: Vec3,
        right: Vec3,
    ) -> Vec3 {
        let distance = self.speed * dt.max(0.0);
        let mut next = position + Self::horizontal_direction(input, forward, right) * distance;
        next.y += input.up_axis() as f32 * distance;
        self.clamp(next)
    }

    /// Applies the height floor and plane bounds.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        let (min, max) = self.bounds;
        Vec3::new(
            position.x.clamp(min, max),
            position.y.max(self.min_height),
            position.z.clamp(min, max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    const FORWARD: Vec3 = Vec3::NEG_Z;
    const RIGHT: Vec3 = Vec3::X;

    fn keys(pressed: &[KeyCode]) -> MovementKeys {
        let mut keys = MovementKeys::new();
        for &key in pressed {
            keys.handle_key(key, true);
        }
        keys
    }

    #[test]
    fn test_defaults_from_config() {
        let controller = FlyController::default();
        assert_eq!(controller.speed(), FLY_SPEED);
        assert_eq!(controller.bounds(), (-29.5, 29.5));
    }

    #[test]
    fn test_forward_movement() {
        let controller = FlyController::default();
        let next = controller.step(Vec3::new(0.0, 3.0, 0.0), 0.5, &keys(&[KeyCode::W]), FORWARD, RIGHT);
        assert!((next - Vec3::new(0.0, 3.0, -3.0)).length() < 1e-6);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let controller = FlyController::default();
        let start = Vec3::new(0.0, 3.0, 0.0);
        let next = controller.step(start, 1.0, &keys(&[KeyCode::W, KeyCode::D]), FORWARD, RIGHT);
        let horizontal = Vec3::new(next.x, 0.0, next.z);
        assert!((horizontal.length() - FLY_SPEED).abs() < 1e-5);
        assert!(next.x > 0.0 && next.z < 0.0);
    }

    #[test]
    fn test_vertical_independent_of_horizontal() {
        let controller = FlyController::default();
        let next = controller.step(
            Vec3::new(0.0, 5.0, 0.0),
            0.5,
            &keys(&[KeyCode::W, KeyCode::Space]),
            FORWARD,
            RIGHT,
        );
        assert!((next.y - 8.0).abs() < 1e-6);
        assert!((next.z + 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_min_height_clamp() {
        let controller = FlyController::default();
        let next = controller.step(Vec3::new(0.0, 2.5, 0.0), 1.0, &keys(&[KeyCode::ShiftLeft]), FORWARD, RIGHT);
        assert_eq!(next.y, 2.0);
    }

    #[test]
    fn test_plane_clamp() {
        let controller = FlyController::default();
        let next = controller.step(Vec3::new(29.0, 3.0, -29.0), 1.0, &keys(&[KeyCode::W, KeyCode::D]), FORWARD, RIGHT);
        assert_eq!(next.x, 29.5);
        assert_eq!(next.z, -29.5);
    }

    #[test]
    fn test_no_input_still_clamps() {
        let controller = FlyController::default();
        let next = controller.step(Vec3::new(100.0, 0.0, 0.0), 0.016, &MovementKeys::new(), FORWARD, RIGHT);
        assert_eq!(next, Vec3::new(29.5, 2.0, 0.0));
    }
}
