//! Stair Geometry
//!
//! A stair voxel is four slabs stacked diagonally inside one cell: each slab
//! spans the full width (X), a quarter of the height (Y) and a quarter of the
//! depth (Z), and slab `i` sits one quarter higher and one quarter further
//! along +Z than slab `i - 1`. The merged mesh is built once per block size and
//! shared; orientation is applied per voxel as a quarter turn about +Y.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{IVec3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::mesh::{Mesh, WHITE, generate_box};

/// Quarter-turn orientation about +Y (0-3)
///
/// One step maps (x, y, z) to (z, y, -x), the same right-handed rotation as
/// `Quat::from_rotation_y(FRAC_PI_2)`, but exact on the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StairRotation(u8);

impl StairRotation {
    pub const IDENTITY: Self = Self(0);

    /// Wraps any step count into 0-3.
    pub fn new(step: u8) -> Self {
        Self(step % 4)
    }

    pub fn step(self) -> u8 {
        self.0
    }

    /// Next quarter turn: 0 -> 1 -> 2 -> 3 -> 0
    pub fn next(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    pub fn radians(self) -> f32 {
        self.0 as f32 * FRAC_PI_2
    }

    pub fn quat(self) -> Quat {
        Quat::from_rotation_y(self.radians())
    }

    pub fn apply(self, v: Vec3) -> Vec3 {
        match self.0 {
            1 => Vec3::new(v.z, v.y, -v.x),
            2 => Vec3::new(-v.x, v.y, -v.z),
            3 => Vec3::new(-v.z, v.y, v.x),
            _ => v,
        }
    }

    pub fn apply_ivec(self, v: IVec3) -> IVec3 {
        match self.0 {
            1 => IVec3::new(v.z, v.y, -v.x),
            2 => IVec3::new(-v.x, v.y, -v.z),
            3 => IVec3::new(-v.z, v.y, v.x),
            _ => v,
        }
    }

    /// Odd steps swap the X and Z extents of an axis-aligned box.
    pub fn swaps_axes(self) -> bool {
        self.0 % 2 == 1
    }
}

/// One axis-aligned slab of the stair shape, relative to the voxel center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlabBox {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl SlabBox {
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// The slab after a quarter turn. Stays axis-aligned.
    pub fn rotated(&self, rotation: StairRotation) -> SlabBox {
        let half_extents = if rotation.swaps_axes() {
            Vec3::new(self.half_extents.z, self.half_extents.y, self.half_extents.x)
        } else {
            self.half_extents
        };
        SlabBox {
            center: rotation.apply(self.center),
            half_extents,
        }
    }

    pub fn translated(&self, offset: Vec3) -> SlabBox {
        SlabBox {
            center: self.center + offset,
            half_extents: self.half_extents,
        }
    }
}

/// Shared stair shape for one block size
#[derive(Debug, Clone)]
pub struct StairGeometry {
    unit: f32,
    slabs: [SlabBox; StairGeometry::SLAB_COUNT],
    mesh: Mesh,
}

impl StairGeometry {
    pub const SLAB_COUNT: usize = 4;

    pub fn build(unit: f32) -> Self {
        let step = unit / Self::SLAB_COUNT as f32;
        let half_extents = Vec3::new(unit * 0.5, step * 0.5, step * 0.5);
        let first = -unit * 0.5 + step * 0.5;

        let slabs: [SlabBox; Self::SLAB_COUNT] = std::array::from_fn(|i| {
            let offset = first + i as f32 * step;
            SlabBox {
                center: Vec3::new(0.0, offset, offset),
                half_extents,
            }
        });

        let mut mesh = Mesh::new();
        for slab in &slabs {
            mesh.merge(&generate_box(slab.center, slab.half_extents, WHITE));
        }

        Self { unit, slabs, mesh }
    }

    /// Builds the geometry behind an `Arc` for sharing between voxels.
    pub fn shared(unit: f32) -> Arc<Self> {
        Arc::new(Self::build(unit))
    }

    pub fn unit(&self) -> f32 {
        self.unit
    }

    pub fn slabs(&self) -> &[SlabBox; Self::SLAB_COUNT] {
        &self.slabs
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Slabs of a stair voxel centered at `center` with the given rotation.
    pub fn world_slabs(
        &self,
        center: Vec3,
        rotation: StairRotation,
    ) -> impl Iterator<Item = SlabBox> + '_ {
        self.slabs
            .iter()
            .map(move |slab| slab.rotated(rotation).translated(center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_four_slabs_for_unit_block() {
        let stairs = StairGeometry::build(1.0);
        let centers: Vec<_> = stairs.slabs().iter().map(|s| s.center).collect();
        assert_eq!(
            centers,
            [
                Vec3::new(0.0, -0.375, -0.375),
                Vec3::new(0.0, -0.125, -0.125),
                Vec3::new(0.0, 0.125, 0.125),
                Vec3::new(0.0, 0.375, 0.375),
            ]
        );
        for slab in stairs.slabs() {
            assert_eq!(slab.half_extents, Vec3::new(0.5, 0.125, 0.125));
        }
    }

    #[test]
    fn test_slabs_scale_with_unit() {
        let unit = StairGeometry::build(1.0);
        let double = StairGeometry::build(2.0);
        assert_eq!(double.slabs().len(), 4);
        for (a, b) in unit.slabs().iter().zip(double.slabs()) {
            assert!(approx(a.center * 2.0, b.center));
            assert!(approx(a.half_extents * 2.0, b.half_extents));
        }
    }

    #[test]
    fn test_mesh_is_four_merged_boxes() {
        let stairs = StairGeometry::build(1.0);
        assert_eq!(stairs.mesh().vertices.len(), 4 * 24);
        assert_eq!(stairs.mesh().indices.len(), 4 * 36);

        let (min, max) = stairs.mesh().bounds().unwrap();
        assert!(approx(min, Vec3::splat(-0.5)));
        assert!(approx(max, Vec3::splat(0.5)));
    }

    #[test]
    fn test_rotation_cycles() {
        let mut rotation = StairRotation::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(rotation.step());
            rotation = rotation.next();
        }
        assert_eq!(seen, [0, 1, 2, 3, 0]);
        assert_eq!(StairRotation::new(6), StairRotation::new(2));
    }

    #[test]
    fn test_rotation_matches_quaternion() {
        let v = Vec3::new(0.3, -0.2, 0.45);
        for step in 0..4 {
            let rotation = StairRotation::new(step);
            assert!(approx(rotation.apply(v), rotation.quat() * v));
        }
    }

    #[test]
    fn test_integer_rotation_matches_float() {
        let v = IVec3::new(1, 2, -3);
        for step in 0..4 {
            let rotation = StairRotation::new(step);
            assert_eq!(rotation.apply_ivec(v).as_vec3(), rotation.apply(v.as_vec3()));
        }
    }

    #[test]
    fn test_half_turn_puts_top_step_at_negative_z() {
        let stairs = StairGeometry::build(1.0);
        let top = stairs
            .world_slabs(Vec3::ZERO, StairRotation::new(2))
            .max_by(|a, b| a.center.y.total_cmp(&b.center.y))
            .unwrap();
        assert!(approx(top.center, Vec3::new(0.0, 0.375, -0.375)));
    }

    #[test]
    fn test_quarter_turn_swaps_extents() {
        let stairs = StairGeometry::build(1.0);
        let slab = stairs.slabs()[0].rotated(StairRotation::new(1));
        assert_eq!(slab.half_extents, Vec3::new(0.125, 0.125, 0.5));
        assert!(approx(slab.center, Vec3::new(-0.375, -0.375, 0.0)));
    }

    #[test]
    fn test_rotated_slabs_stay_inside_cell() {
        let stairs = StairGeometry::build(1.0);
        for step in 0..4 {
            for slab in stairs.world_slabs(Vec3::new(2.0, 1.0, 3.0), StairRotation::new(step)) {
                assert!(slab.min().cmpge(Vec3::new(1.5, 0.5, 2.5) - 1e-5).all());
                assert!(slab.max().cmple(Vec3::new(2.5, 1.5, 3.5) + 1e-5).all());
            }
        }
    }
}
