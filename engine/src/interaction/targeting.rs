//! Raycast Targeting
//!
//! Finds the voxel under the crosshair and the empty cell next to the face
//! that was hit. Floor tiles and ordinary voxels are unit boxes; stair voxels
//! are tested slab by slab so the ray can pass over the open part of a step.
//!
//! The scan is linear in the number of voxels. Closest hit wins; on equal
//! distance the first one scanned (placed voxels, then floor) is kept.

use glam::{IVec3, Vec3};

use crate::blocks::{BlockRegistry, StairGeometry};
use crate::physics::collision::{Aabb, AabbHit, ray_aabb_entry};
use crate::world::{Voxel, VoxelRef, VoxelWorld};

/// Which voxels a query may hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFilter {
    /// Placed voxels and floor tiles (hover, placement)
    All,
    /// Placed voxels only (removal)
    PlacedOnly,
}

/// Outcome of a targeting query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetingResult {
    /// Voxel that was hit
    pub hit: VoxelRef,
    /// Lattice position of the hit voxel
    pub hit_cell: IVec3,
    /// Outward world-space normal of the face that was hit
    pub face_normal: IVec3,
    /// World-space hit point
    pub point: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    /// Cell a new block would occupy: `hit_cell + face_normal`
    pub placement_cell: IVec3,
}

/// Casts a ray against the world and returns the nearest hit within `max_distance`.
pub fn target_from_ray(
    origin: Vec3,
    direction: Vec3,
    world: &VoxelWorld,
    registry: &BlockRegistry,
    stairs: &StairGeometry,
    filter: TargetFilter,
    max_distance: f32,
) -> Option<TargetingResult> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    let half = Vec3::splat(world.block_size() * 0.5);
    let mut best: Option<(VoxelRef, IVec3, AabbHit)> = None;

    let mut consider = |target: VoxelRef, cell: IVec3, hit: Option<AabbHit>| {
        if let Some(hit) = hit {
            let closer = best.as_ref().is_none_or(|(_, _, b)| hit.distance < b.distance);
            if hit.distance <= max_distance && closer {
                best = Some((target, cell, hit));
            }
        }
    };

    for (key, placed) in world.placed() {
        let hit = ray_voxel(origin, direction, world, registry, stairs, &placed.voxel, half);
        consider(VoxelRef::Placed(key), placed.voxel.position, hit);
    }

    if filter == TargetFilter::All {
        for (index, tile) in world.floor_tiles().iter().enumerate() {
            let aabb = Aabb::from_center(world.cell_center(tile.position), half);
            consider(VoxelRef::Floor(index), tile.position, ray_aabb_entry(origin, direction, &aabb));
        }
    }

    best.map(|(hit, hit_cell, aabb_hit)| TargetingResult {
        hit,
        hit_cell,
        face_normal: aabb_hit.normal,
        point: origin + direction * aabb_hit.distance,
        distance: aabb_hit.distance,
        placement_cell: hit_cell + aabb_hit.normal,
    })
}

/// Nearest entry into one placed voxel, honoring the stair silhouette.
fn ray_voxel(
    origin: Vec3,
    direction: Vec3,
    world: &VoxelWorld,
    registry: &BlockRegistry,
    stairs: &StairGeometry,
    voxel: &Voxel,
    half: Vec3,
) -> Option<AabbHit> {
    let center = world.cell_center(voxel.position);
    let is_stairs = registry
        .get(voxel.block_type)
        .map(|t| t.is_stairs())
        .unwrap_or(false);

    if !is_stairs {
        return ray_aabb_entry(origin, direction, &Aabb::from_center(center, half));
    }

    // Slabs are built for `stairs.unit()`; rescale to this world's block size
    let scale = world.block_size() / stairs.unit();
    stairs
        .world_slabs(Vec3::ZERO, voxel.rotation)
        .filter_map(|slab| {
            let aabb = Aabb::from_center(center + slab.center * scale, slab.half_extents * scale);
            ray_aabb_entry(origin, direction, &aabb)
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}
