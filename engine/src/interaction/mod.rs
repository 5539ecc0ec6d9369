//! Interaction Module
//!
//! Crosshair targeting, the hotbar selection, world edits and the visual
//! feedback that goes with them.
//!
//! # Components
//!
//! - [`target_from_ray`] - nearest voxel face along a ray and the cell beside it
//! - [`SelectionState`] - selected block type and stairs rotation
//! - [`PlacementController`] - validated placement and removal
//! - [`HoverPreview`] - translucent ghost in the target cell
//! - [`HandBlock`] - miniature of the selected block in the player's hand

pub mod placement;
pub mod preview;
pub mod selection;
pub mod targeting;

pub use placement::{PlacementController, PlacementRequest};
pub use preview::{HAND_BLOCK_OFFSET, HandBlock, HoverPreview, RIGHT_HAND_OFFSET};
pub use selection::SelectionState;
pub use targeting::{TargetFilter, TargetingResult, target_from_ray};
