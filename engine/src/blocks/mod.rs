//! Blocks Module
//!
//! The block type catalog and the shapes voxels are drawn with.
//!
//! # Components
//!
//! - [`BlockRegistry`] - ordered, immutable list of [`BlockType`]s indexed by hotbar slot
//! - [`Material`] - renderer-facing surface description derived from a block type
//! - [`StairGeometry`] - the four-slab stair shape, built once and shared
//! - [`StairRotation`] - quarter-turn orientation of a stair voxel about +Y

pub mod material;
pub mod registry;
pub mod stairs;

pub use material::{Material, hex_to_rgb};
pub use registry::{BlockKind, BlockRegistry, BlockType, BlockTypeId, MAX_HOTBAR_SLOTS};
pub use stairs::{SlabBox, StairGeometry, StairRotation};
