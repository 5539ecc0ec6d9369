//! Voxel World Store
//!
//! Holds the two collections raycasts run against: the fixed floor tiles
//! generated at startup and the voxels the player placed. Placed voxels live in
//! a slot map so removal by handle is O(1) and stale handles are detected.
//!
//! Several voxels may share a lattice position; nothing here prevents it.

use glam::{IVec3, Vec3};
use slotmap::{SlotMap, new_key_type};

use crate::blocks::{BlockTypeId, StairRotation};
use crate::render::RenderHandle;

new_key_type! {
    /// Stable handle to a placed voxel
    pub struct VoxelKey;
}

/// A fixed, non-removable floor cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorTile {
    pub position: IVec3,
}

/// A voxel as committed at placement time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voxel {
    /// Lattice position (cell center = position * block_size)
    pub position: IVec3,
    /// Registry index of its block type
    pub block_type: BlockTypeId,
    /// Quarter-turn orientation, always identity for non-stairs types
    pub rotation: StairRotation,
}

/// A placed voxel and the render resources it owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedVoxel {
    pub voxel: Voxel,
    pub render: RenderHandle,
}

/// What a raycast hit refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoxelRef {
    /// Index into the floor tile list
    Floor(usize),
    /// Handle of a placed voxel
    Placed(VoxelKey),
}

impl VoxelRef {
    pub fn is_floor(self) -> bool {
        matches!(self, VoxelRef::Floor(_))
    }
}

#[derive(Debug)]
pub struct VoxelWorld {
    block_size: f32,
    floor: Vec<FloorTile>,
    placed: SlotMap<VoxelKey, PlacedVoxel>,
}

impl VoxelWorld {
    pub fn new(block_size: f32) -> Self {
        Self {
            block_size,
            floor: Vec::new(),
            placed: SlotMap::with_key(),
        }
    }

    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    /// World-space center of a lattice cell.
    pub fn cell_center(&self, position: IVec3) -> Vec3 {
        position.as_vec3() * self.block_size
    }

    /// Lattice cell containing a world-space point.
    pub fn cell_at(&self, point: Vec3) -> IVec3 {
        (point / self.block_size).round().as_ivec3()
    }

    pub fn add_floor_tile(&mut self, position: IVec3) -> usize {
        self.floor.push(FloorTile { position });
        self.floor.len() - 1
    }

    /// Lays a square of floor tiles at y = 0 covering `min..max` on X and Z.
    pub fn fill_floor(&mut self, min: i32, max: i32) {
        let side = (max - min).max(0) as usize;
        self.floor.reserve(side * side);
        for x in min..max {
            for z in min..max {
                self.add_floor_tile(IVec3::new(x, 0, z));
            }
        }
    }

    pub fn insert(&mut self, voxel: Voxel, render: RenderHandle) -> VoxelKey {
        self.placed.insert(PlacedVoxel { voxel, render })
    }

    pub fn remove(&mut self, key: VoxelKey) -> Option<PlacedVoxel> {
        self.placed.remove(key)
    }

    pub fn get(&self, key: VoxelKey) -> Option<&PlacedVoxel> {
        self.placed.get(key)
    }

    pub fn floor_tile(&self, index: usize) -> Option<&FloorTile> {
        self.floor.get(index)
    }

    /// Position of whatever a reference points at, if it still exists.
    pub fn position_of(&self, target: VoxelRef) -> Option<IVec3> {
        match target {
            VoxelRef::Floor(index) => self.floor_tile(index).map(|tile| tile.position),
            VoxelRef::Placed(key) => self.get(key).map(|placed| placed.voxel.position),
        }
    }

    pub fn floor_tiles(&self) -> &[FloorTile] {
        &self.floor
    }

    pub fn placed(&self) -> impl Iterator<Item = (VoxelKey, &PlacedVoxel)> + '_ {
        self.placed.iter()
    }

    /// Placed voxels at a lattice position, in insertion-slot order.
    pub fn placed_at(&self, position: IVec3) -> impl Iterator<Item = VoxelKey> + '_ {
        self.placed
            .iter()
            .filter(move |(_, placed)| placed.voxel.position == position)
            .map(|(key, _)| key)
    }

    pub fn floor_count(&self) -> usize {
        self.floor.len()
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Material;
    use crate::render::{GeometrySource, RenderResources};

    fn handle(resources: &mut RenderResources) -> RenderHandle {
        resources.allocate(GeometrySource::Cube { size: 1.0 }, Material::solid(0))
    }

    fn voxel(x: i32, y: i32, z: i32) -> Voxel {
        Voxel {
            position: IVec3::new(x, y, z),
            block_type: 0,
            rotation: StairRotation::IDENTITY,
        }
    }

    #[test]
    fn test_fill_floor() {
        let mut world = VoxelWorld::new(1.0);
        world.fill_floor(-2, 2);
        assert_eq!(world.floor_count(), 16);
        assert!(world.floor_tiles().iter().all(|t| t.position.y == 0));
        assert_eq!(world.floor_tile(0).unwrap().position, IVec3::new(-2, 0, -2));
        assert_eq!(world.floor_tiles().last().unwrap().position, IVec3::new(1, 0, 1));
    }

    #[test]
    fn test_insert_and_remove() {
        let mut resources = RenderResources::new();
        let mut world = VoxelWorld::new(1.0);
        let key = world.insert(voxel(1, 1, 1), handle(&mut resources));
        assert_eq!(world.placed_count(), 1);
        assert_eq!(world.position_of(VoxelRef::Placed(key)), Some(IVec3::new(1, 1, 1)));

        let removed = world.remove(key).unwrap();
        assert_eq!(removed.voxel, voxel(1, 1, 1));
        assert_eq!(world.placed_count(), 0);
        assert!(world.remove(key).is_none());
        assert_eq!(world.position_of(VoxelRef::Placed(key)), None);
    }

    #[test]
    fn test_duplicate_positions_are_kept() {
        let mut resources = RenderResources::new();
        let mut world = VoxelWorld::new(1.0);
        let a = world.insert(voxel(0, 1, 0), handle(&mut resources));
        let b = world.insert(voxel(0, 1, 0), handle(&mut resources));
        assert_ne!(a, b);
        assert_eq!(world.placed_at(IVec3::new(0, 1, 0)).count(), 2);
    }

    #[test]
    fn test_cell_mapping_with_block_size() {
        let world = VoxelWorld::new(2.0);
        assert_eq!(world.cell_center(IVec3::new(1, 0, -1)), Vec3::new(2.0, 0.0, -2.0));
        assert_eq!(world.cell_at(Vec3::new(2.2, 0.9, -1.8)), IVec3::new(1, 0, -1));
    }
}
