//! World Module
//!
//! The voxel store raycasts run against and the builder that fills it.
//!
//! ## Default World
//! A 60x60 floor plane centered on the origin, surrounded by render-only
//! decorations: a temple and houses to the west, pyramids to the east.

pub mod scene;
pub mod store;

pub use scene::{DecorBlock, DecorShape, FLOOR_COLOR, SceneLayout, build_floor};
pub use store::{FloorTile, PlacedVoxel, Voxel, VoxelKey, VoxelRef, VoxelWorld};
