//! Placement and Removal
//!
//! Validates and applies world edits. A placement is refused when the target
//! cell center lies inside the exclusion box around the player's eye; a removal
//! is refused for floor tiles. Either way the world is left untouched.
//!
//! Render resources follow the voxel: allocated on placement, released on
//! removal.

use std::sync::Arc;

use glam::{IVec3, Vec3};

use crate::blocks::{BlockRegistry, BlockTypeId, Material, StairGeometry, StairRotation};
use crate::error::{PlacementError, RemovalError};
use crate::render::{GeometrySource, RenderResources};
use crate::world::{Voxel, VoxelKey, VoxelRef, VoxelWorld};

/// A request to add one voxel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub cell: IVec3,
    pub block_type: BlockTypeId,
    pub rotation: StairRotation,
    pub player_position: Vec3,
}

#[derive(Debug, Clone)]
pub struct PlacementController {
    exclusion_half_extents: Vec3,
    block_size: f32,
    stairs: Arc<StairGeometry>,
}

impl PlacementController {
    pub fn new(exclusion_half_extents: Vec3, block_size: f32, stairs: Arc<StairGeometry>) -> Self {
        Self {
            exclusion_half_extents,
            block_size,
            stairs,
        }
    }

    /// True when the cell center is strictly inside the exclusion box.
    pub fn overlaps_player(&self, cell: IVec3, player_position: Vec3) -> bool {
        let delta = (cell.as_vec3() * self.block_size - player_position).abs();
        delta.cmplt(self.exclusion_half_extents).all()
    }

    pub fn place(
        &self,
        world: &mut VoxelWorld,
        resources: &mut RenderResources,
        registry: &BlockRegistry,
        request: PlacementRequest,
    ) -> Result<VoxelKey, PlacementError> {
        let block = registry.get(request.block_type)?;

        if self.overlaps_player(request.cell, request.player_position) {
            return Err(PlacementError::Blocked { cell: request.cell });
        }

        let rotation = if block.is_stairs() {
            request.rotation
        } else {
            StairRotation::IDENTITY
        };

        let render = resources.allocate(
            GeometrySource::for_kind(block.kind, self.block_size, &self.stairs),
            Material::for_block(block),
        );
        let key = world.insert(
            Voxel {
                position: request.cell,
                block_type: block.id,
                rotation,
            },
            render,
        );

        log::debug!(
            "[Placement] {} at {} (rotation {})",
            block.name,
            request.cell,
            rotation.step()
        );
        Ok(key)
    }

    pub fn remove(
        &self,
        world: &mut VoxelWorld,
        resources: &mut RenderResources,
        target: VoxelRef,
    ) -> Result<Voxel, RemovalError> {
        let key = match target {
            VoxelRef::Floor(_) => return Err(RemovalError::NotRemovable),
            VoxelRef::Placed(key) => key,
        };

        let placed = world.remove(key).ok_or(RemovalError::NotFound)?;
        resources.release(placed.render);

        log::debug!("[Placement] Removed voxel at {}", placed.voxel.position);
        Ok(placed.voxel)
    }
}
