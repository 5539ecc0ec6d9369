//! Render Resources
//!
//! Explicit-lifetime registry for GPU-side geometry and material entries.
//! Every drawable (placed voxel, hover preview, hand block) holds a
//! [`RenderHandle`] allocated here and must release it when it goes away;
//! the live counts let callers check that nothing leaks.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use slotmap::{SlotMap, new_key_type};

use crate::blocks::{BlockKind, Material, StairGeometry};
use crate::mesh::{Mesh, generate_cube};

new_key_type! {
    /// Handle to a geometry entry
    pub struct GeometryId;
    /// Handle to a material entry
    pub struct MaterialId;
}

/// What a geometry entry draws
#[derive(Debug, Clone)]
pub enum GeometrySource {
    /// Axis-aligned cube with the given edge length
    Cube { size: f32 },
    /// The shared stair mesh
    Stairs(Arc<StairGeometry>),
}

impl GeometrySource {
    /// Shape drawn for a block of the given kind.
    pub fn for_kind(kind: BlockKind, block_size: f32, stairs: &Arc<StairGeometry>) -> Self {
        match kind {
            BlockKind::Ordinary => GeometrySource::Cube { size: block_size },
            BlockKind::Stairs => GeometrySource::Stairs(Arc::clone(stairs)),
        }
    }

    /// Builds the mesh for upload. Stairs are cloned from the shared copy.
    pub fn to_mesh(&self) -> Mesh {
        match self {
            GeometrySource::Cube { size } => generate_cube(*size),
            GeometrySource::Stairs(stairs) => stairs.mesh().clone(),
        }
    }

    pub fn is_stairs(&self) -> bool {
        matches!(self, GeometrySource::Stairs(_))
    }
}

/// Geometry + material pair owned by one drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHandle {
    pub geometry: GeometryId,
    pub material: MaterialId,
}

/// Model transform for a drawable.
pub fn model_matrix(position: Vec3, rotation: Quat, scale: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(Vec3::splat(scale), rotation, position)
}

/// Registry of live geometry and material entries
#[derive(Debug, Default)]
pub struct RenderResources {
    geometries: SlotMap<GeometryId, GeometrySource>,
    materials: SlotMap<MaterialId, Material>,
}

impl RenderResources {
    pub fn new() -> Self {
        Self {
            geometries: SlotMap::with_key(),
            materials: SlotMap::with_key(),
        }
    }

    pub fn create_geometry(&mut self, source: GeometrySource) -> GeometryId {
        self.geometries.insert(source)
    }

    pub fn create_material(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    /// Allocates a geometry and a material together.
    pub fn allocate(&mut self, geometry: GeometrySource, material: Material) -> RenderHandle {
        RenderHandle {
            geometry: self.create_geometry(geometry),
            material: self.create_material(material),
        }
    }

    /// Releases a geometry entry. Returns `false` if it was already gone.
    pub fn release_geometry(&mut self, id: GeometryId) -> bool {
        self.geometries.remove(id).is_some()
    }

    /// Releases a material entry. Returns `false` if it was already gone.
    pub fn release_material(&mut self, id: MaterialId) -> bool {
        self.materials.remove(id).is_some()
    }

    /// Releases both halves of a handle.
    pub fn release(&mut self, handle: RenderHandle) -> bool {
        let geometry = self.release_geometry(handle.geometry);
        let material = self.release_material(handle.material);
        geometry && material
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&GeometrySource> {
        self.geometries.get(id)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    /// Replaces a material in place, keeping its id.
    pub fn update_material(&mut self, id: MaterialId, material: Material) -> bool {
        match self.materials.get_mut(id) {
            Some(slot) => {
                *slot = material;
                true
            }
            None => false,
        }
    }

    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }
}
