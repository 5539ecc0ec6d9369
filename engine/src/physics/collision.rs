//! Collision detection module
//!
//! Ray versus axis-aligned box tests used by voxel targeting. Every voxel
//! shape (cube, floor tile, rotated stair slab) is a set of AABBs, so a
//! single slab-method routine covers all of them.
//!
//! # Example
//!
//! ```ignore
//! use voxel_sandbox_engine::physics::collision::{Aabb, ray_aabb_entry};
//! use glam::Vec3;
//!
//! let cell = Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5));
//! if let Some(hit) = ray_aabb_entry(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &cell) {
//!     println!("Hit at distance {} on face {:?}", hit.distance, hit.normal);
//! }
//! ```

use glam::{IVec3, Vec3};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }
}

/// Where a ray enters a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbHit {
    /// Ray parameter of the entry point
    pub distance: f32,
    /// Outward unit normal of the entry face
    pub normal: IVec3,
}

fn inverse_direction(ray_dir: Vec3) -> Vec3 {
    // Near-zero components become huge so the slab for that axis spans everything
    let inv = |d: f32| if d.abs() > 1e-10 { 1.0 / d } else { f32::MAX * d.signum() };
    Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z))
}

/// Ray entry into a box, with the face it crosses.
///
/// Rays starting inside the box report nothing: only outward-facing surfaces
/// are targetable.
pub fn ray_aabb_entry(ray_origin: Vec3, ray_dir: Vec3, aabb: &Aabb) -> Option<AabbHit> {
    let inv_dir = inverse_direction(ray_dir);

    let t1 = (aabb.min - ray_origin) * inv_dir;
    let t2 = (aabb.max - ray_origin) * inv_dir;
    let near = t1.min(t2);
    let far = t1.max(t2);

    let t_min = near.max_element();
    let t_max = far.min_element();

    if t_max < t_min || t_min < 0.0 {
        return None;
    }

    // The entry face is on the axis whose slab is entered last
    let normal = if near.x >= near.y && near.x >= near.z {
        IVec3::new(-(ray_dir.x.signum() as i32), 0, 0)
    } else if near.y >= near.z {
        IVec3::new(0, -(ray_dir.y.signum() as i32), 0)
    } else {
        IVec3::new(0, 0, -(ray_dir.z.signum() as i32))
    };

    Some(AabbHit {
        distance: t_min,
        normal,
    })
}
