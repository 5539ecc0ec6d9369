//! Render Module
//!
//! Renderer-facing bookkeeping. Drawing itself belongs to the host
//! application; this module tracks which geometry and material entries are
//! alive and how drawables are transformed.

pub mod resources;

pub use resources::{
    GeometryId, GeometrySource, MaterialId, RenderHandle, RenderResources, model_matrix,
};
