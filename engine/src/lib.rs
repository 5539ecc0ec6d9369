//! Voxel Sandbox Engine
//!
//! A first-person block-building sandbox: a floor plane surrounded by
//! pyramids, a temple and houses, where the player flies around and adds or
//! removes blocks under the crosshair. The library holds all state and rules;
//! drawing is left to the host, which reads [`Sandbox::draw_list`] and the
//! [`render::RenderResources`] registry.
//!
//! # Modules
//!
//! - [`blocks`] - block type registry, materials and the stair shape
//! - [`world`] - voxel store and scene construction
//! - [`interaction`] - targeting, selection, placement and the hover preview
//! - [`physics`] - ray/box intersection
//! - [`camera`] / [`player`] - first-person view and fly movement
//! - [`input`] - platform-agnostic keys, buttons and pointer lock
//! - [`frame`] - clocked frame loop
//! - [`sandbox`] - the context that ties everything together
//!
//! # Example
//!
//! ```ignore
//! use voxel_sandbox_engine::{FrameLoop, KeyCode, MouseButton, Sandbox, SandboxConfig};
//!
//! let mut sandbox = Sandbox::new(SandboxConfig::default())?;
//! let mut frames = FrameLoop::system(sandbox.config().max_frame_delta);
//!
//! sandbox.handle_mouse_button(MouseButton::Left, true); // captures the pointer
//! sandbox.handle_key(KeyCode::Digit6, true); // stairs
//! sandbox.handle_key(KeyCode::R, true); // quarter turn
//! frames.step(&mut sandbox);
//! ```

pub mod blocks;
pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod input;
pub mod interaction;
pub mod mesh;
pub mod physics;
pub mod player;
pub mod render;
pub mod sandbox;
pub mod world;

pub use blocks::{BlockKind, BlockRegistry, BlockType, StairGeometry, StairRotation};
pub use config::SandboxConfig;
pub use error::{ConfigError, PlacementError, RegistryError, RemovalError};
pub use frame::{Clock, FrameLoop, ManualClock, SystemClock};
pub use input::{KeyCode, MouseButton};
pub use interaction::{TargetFilter, TargetingResult, target_from_ray};
pub use sandbox::{ClickOutcome, Drawable, HotbarSlot, Sandbox};
pub use world::{VoxelRef, VoxelWorld};
