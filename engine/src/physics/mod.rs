//! Physics module
//!
//! Geometric queries for the voxel sandbox. There is no rigid-body simulation:
//! the player flies freely and blocks never move once placed.
//!
//! # Unit System
//!
//! **1 unit = 1 block edge** at the default block size.
//!
//! # Submodules
//!
//! - [`collision`] - Ray-AABB entry point and face normal

pub mod collision;

pub use collision::{Aabb, AabbHit, ray_aabb_entry};
