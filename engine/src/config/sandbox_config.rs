//! Sandbox Configuration
//!
//! World bounds, player tuning and preview parameters in one struct.
//! `Default` returns the values of the stock pyramid scene; a JSON file can
//! override any subset of them.

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Central configuration for the sandbox.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Edge length of one voxel (world units)
    pub block_size: f32,
    /// Lowest X/Z lattice coordinate of the floor plane (inclusive)
    pub plane_min: i32,
    /// Highest X/Z lattice coordinate of the floor plane (exclusive)
    pub plane_max: i32,
    /// Player eye position at startup
    pub spawn_position: Vec3,
    /// Fly speed in units per second
    pub move_speed: f32,
    /// The eye never sinks below this height
    pub min_eye_height: f32,
    /// Half extents of the box around the eye where placement is refused
    pub exclusion_half_extents: Vec3,
    /// Rays further than this never target anything
    pub max_reach: f32,
    /// Opacity of the hover preview for block types without their own opacity
    pub preview_opacity: f32,
    /// Scale of the block held in the player's hand
    pub hand_block_scale: f32,
    /// Mouse look sensitivity in radians per pixel
    pub mouse_sensitivity: f32,
    /// Upper bound on a single frame's delta time (seconds)
    pub max_frame_delta: f32,
    /// Whether the temple, houses and pyramids are generated
    pub build_decorations: bool,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            block_size: 1.0,
            plane_min: -30,
            plane_max: 30,
            spawn_position: Vec3::new(5.0, 3.0, 10.0),
            move_speed: 6.0,
            min_eye_height: 2.0,
            exclusion_half_extents: Vec3::new(0.8, 1.7, 0.8),
            max_reach: 1000.0,
            preview_opacity: 0.4,
            hand_block_scale: 0.18,
            mouse_sensitivity: 0.002,
            max_frame_delta: 0.1,
            build_decorations: true,
        }
    }
}

impl SandboxConfig {
    /// Load a config from a JSON file. Missing fields take their default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.block_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "block_size must be positive, got {}",
                self.block_size
            )));
        }
        if self.plane_min >= self.plane_max {
            return Err(ConfigError::Invalid(format!(
                "floor plane is empty: plane_min {} >= plane_max {}",
                self.plane_min, self.plane_max
            )));
        }
        if !(self.move_speed > 0.0) {
            return Err(ConfigError::Invalid("move_speed must be positive".into()));
        }
        if !(self.max_reach > 0.0) {
            return Err(ConfigError::Invalid("max_reach must be positive".into()));
        }
        if !(self.max_frame_delta > 0.0) {
            return Err(ConfigError::Invalid("max_frame_delta must be positive".into()));
        }
        if self.exclusion_half_extents.min_element() < 0.0 {
            return Err(ConfigError::Invalid(
                "exclusion_half_extents cannot be negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.preview_opacity) {
            return Err(ConfigError::Invalid(format!(
                "preview_opacity must be within 0..=1, got {}",
                self.preview_opacity
            )));
        }
        if !(self.hand_block_scale > 0.0) {
            return Err(ConfigError::Invalid("hand_block_scale must be positive".into()));
        }
        Ok(())
    }

    /// Lowest and highest X/Z the player eye may reach.
    pub fn walk_bounds(&self) -> (f32, f32) {
        (self.plane_min as f32 + 0.5, self.plane_max as f32 - 0.5)
    }
}

impl fmt::Display for SandboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "plane {}..{}, block_size={}, move_speed={}",
            self.plane_min, self.plane_max, self.block_size, self.move_speed
        )
    }
}
