//! Scene Builder
//!
//! Generates the walkable floor plane into the [`VoxelWorld`] and the static
//! decorations around it: a translucent preview pyramid in the play area, a
//! columned temple with four small houses to the west, and three large
//! pyramids on sand pads to the east.
//!
//! Decorations are render-only. They are never raycast targets and cannot be
//! removed.

use std::sync::Arc;

use glam::{IVec3, Mat4, Vec3};

use super::store::VoxelWorld;
use crate::blocks::{BlockRegistry, Material, StairGeometry, StairRotation};
use crate::config::SandboxConfig;
use crate::render::{GeometrySource, MaterialId, RenderHandle, RenderResources, model_matrix};

/// Light sand color of the floor plane
pub const FLOOR_COLOR: u32 = 0xE5D8B0;
/// Color of the translucent preview pyramid
pub const PREVIEW_PYRAMID_COLOR: u32 = 0xC2B280;
pub const PREVIEW_PYRAMID_OPACITY: f32 = 0.5;

// Reference catalog slots used by the decorations
const SAND: usize = 0;
const STONE: usize = 1;
const WOOD: usize = 3;
const GLASS: usize = 4;
const STAIRS: usize = 5;

/// Shape of a decoration block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorShape {
    Cube,
    Stairs,
}

/// One render-only block
#[derive(Debug, Clone, PartialEq)]
pub struct DecorBlock {
    /// World-space center
    pub center: Vec3,
    pub shape: DecorShape,
    pub rotation: StairRotation,
    pub material: Material,
}

impl DecorBlock {
    pub fn transform(&self) -> Mat4 {
        model_matrix(self.center, self.rotation.quat(), 1.0)
    }
}

/// Pyramid placement: odd base width, layer count and base center (X, Z)
#[derive(Debug, Clone, Copy)]
pub struct PyramidSite {
    pub base: i32,
    pub height: i32,
    pub x: i32,
    pub z: i32,
}

/// Lays the floor plane into the world: one tile per cell on
/// `plane_min..plane_max` (X and Z) at y = 0.
pub fn build_floor(world: &mut VoxelWorld, config: &SandboxConfig) {
    world.fill_floor(config.plane_min, config.plane_max);
    log::info!(
        "[Scene] Floor plane {}..{} ({} tiles)",
        config.plane_min,
        config.plane_max,
        world.floor_count()
    );
}

/// All decoration blocks of the scene
#[derive(Debug, Clone)]
pub struct SceneLayout {
    blocks: Vec<DecorBlock>,
    block_size: f32,
}

impl SceneLayout {
    pub fn empty(block_size: f32) -> Self {
        Self {
            blocks: Vec::new(),
            block_size,
        }
    }

    /// Builds the stock layout relative to the configured floor plane.
    pub fn build(config: &SandboxConfig) -> Self {
        let mut layout = Self::empty(config.block_size);
        if !config.build_decorations {
            return layout;
        }

        let catalog = BlockRegistry::reference();
        let materials = DecorMaterials::from_registry(&catalog);

        layout.add_preview_pyramid(IVec3::new(0, 0, 10), 7, 5);

        let temple_x = config.plane_min - 30;
        layout.add_temple(&materials, temple_x, 0);
        for (x, z) in [
            (temple_x - 20, -8),
            (temple_x - 20, 8),
            (temple_x - 28, 0),
            (temple_x - 12, 0),
        ] {
            layout.add_house(&materials, x, z);
        }

        for pyramid in [
            PyramidSite { base: 17, height: 9, x: config.plane_max + 30, z: -20 },
            PyramidSite { base: 13, height: 7, x: config.plane_max + 45, z: 0 },
            PyramidSite { base: 9, height: 5, x: config.plane_max + 55, z: 20 },
        ] {
            layout.add_sand_pyramid(&materials, pyramid);
        }

        log::info!("[Scene] Built {} decoration blocks", layout.len());
        layout
    }

    pub fn blocks(&self) -> &[DecorBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn count_shape(&self, shape: DecorShape) -> usize {
        self.blocks.iter().filter(|b| b.shape == shape).count()
    }

    /// Registers the decorations for drawing and returns one handle per block,
    /// in [`blocks`](Self::blocks) order.
    ///
    /// All cubes share one geometry and all stairs share another. Blocks with
    /// equal materials share a material entry. Nothing is allocated for an
    /// empty layout.
    pub fn register(
        &self,
        resources: &mut RenderResources,
        stairs: &Arc<StairGeometry>,
    ) -> Vec<RenderHandle> {
        if self.blocks.is_empty() {
            return Vec::new();
        }

        let cube = resources.create_geometry(GeometrySource::Cube {
            size: self.block_size,
        });
        let stair = resources.create_geometry(GeometrySource::Stairs(Arc::clone(stairs)));
        let mut materials: Vec<(Material, MaterialId)> = Vec::new();

        let handles: Vec<RenderHandle> = self
            .blocks
            .iter()
            .map(|block| {
                let material = match materials.iter().find(|(m, _)| *m == block.material) {
                    Some((_, id)) => *id,
                    None => {
                        let id = resources.create_material(block.material.clone());
                        materials.push((block.material.clone(), id));
                        id
                    }
                };
                let geometry = match block.shape {
                    DecorShape::Cube => cube,
                    DecorShape::Stairs => stair,
                };
                RenderHandle { geometry, material }
            })
            .collect();

        log::debug!(
            "[Scene] Registered {} decorations with {} materials",
            handles.len(),
            materials.len()
        );
        handles
    }

    fn push(&mut self, center: Vec3, shape: DecorShape, rotation: StairRotation, material: &Material) {
        self.blocks.push(DecorBlock {
            center: center * self.block_size,
            shape,
            rotation,
            material: material.clone(),
        });
    }

    fn push_cube(&mut self, cell: IVec3, material: &Material) {
        self.push(cell.as_vec3(), DecorShape::Cube, StairRotation::IDENTITY, material);
    }

    /// Stepped pyramid resting on the floor: layer `y` is `base - 2y` wide.
    fn add_pyramid(&mut self, center_x: i32, center_z: i32, base: i32, height: i32, material: &Material) {
        for y in 0..height {
            let size = base - y * 2;
            let half = (size - 1) as f32 / 2.0;
            for px in 0..size.max(0) {
                for pz in 0..size.max(0) {
                    let center = Vec3::new(
                        center_x as f32 + (px as f32 - half),
                        y as f32 + 0.5,
                        center_z as f32 + (pz as f32 - half),
                    );
                    self.push(center, DecorShape::Cube, StairRotation::IDENTITY, material);
                }
            }
        }
    }

    fn add_preview_pyramid(&mut self, center: IVec3, base: i32, height: i32) {
        let material = Material::translucent(PREVIEW_PYRAMID_COLOR, PREVIEW_PYRAMID_OPACITY);
        self.add_pyramid(center.x, center.z, base, height, &material);
    }

    fn add_sand_pyramid(&mut self, materials: &DecorMaterials, site: PyramidSite) {
        let pad = (site.base + 4) / 2;
        for fx in -pad..=pad {
            for fz in -pad..=pad {
                self.push_cube(IVec3::new(site.x + fx, 0, site.z + fz), &materials.sand);
            }
        }
        self.add_pyramid(site.x, site.z, site.base, site.height, &materials.sand);
    }

    /// 15x11 sand platform, two rows of columns and a flat roof.
    fn add_temple(&mut self, materials: &DecorMaterials, x: i32, z: i32) {
        const WIDTH: i32 = 15;
        const DEPTH: i32 = 11;
        const HEIGHT: i32 = 7;
        let (hw, hd) = (WIDTH / 2, DEPTH / 2);

        for tx in -hw..=hw {
            for tz in -hd..=hd {
                self.push_cube(IVec3::new(x + tx, 0, z + tz), &materials.sand);
            }
        }

        for col in (-6..=6).step_by(3) {
            for h in 1..=HEIGHT {
                self.push_cube(IVec3::new(x + col, h, z - hd), &materials.sand);
                self.push_cube(IVec3::new(x + col, h, z + hd), &materials.sand);
            }
        }

        for rx in -hw..=hw {
            for rz in -hd..=hd {
                self.push_cube(IVec3::new(x + rx, HEIGHT + 1, z + rz), &materials.sand);
            }
        }
    }

    /// 3x3 stone floor, wooden walls with a door on -Z and glass windows,
    /// two rings of outward-facing stairs and a cap block.
    fn add_house(&mut self, materials: &DecorMaterials, x: i32, z: i32) {
        for hx in -1..=1 {
            for hz in -1..=1 {
                self.push_cube(IVec3::new(x + hx, 0, z + hz), &materials.stone);
            }
        }

        for hy in 1..=3 {
            for hx in -1_i32..=1 {
                for hz in -1_i32..=1 {
                    let door = hz == -1 && hx == 0 && hy == 1;
                    let window = hy == 2 && hz.abs() == 1 && hx.abs() == 1;
                    let edge = hx.abs() == 1 || hz.abs() == 1;
                    let cell = IVec3::new(x + hx, hy, z + hz);

                    if window {
                        self.push_cube(cell, &materials.glass);
                    } else if edge && !door {
                        self.push_cube(cell, &materials.wood);
                    }
                }
            }
        }

        for (y, edge) in [(4, 2_i32), (5, 1)] {
            for hx in -edge..=edge {
                for hz in -edge..=edge {
                    if hx.abs() != edge && hz.abs() != edge {
                        continue;
                    }
                    let rotation = outward_rotation(hx, hz, edge);
                    let center = IVec3::new(x + hx, y, z + hz).as_vec3();
                    self.push(center, DecorShape::Stairs, rotation, &materials.stairs);
                }
            }
        }

        self.push_cube(IVec3::new(x, 6, z), &materials.stairs);
    }
}

/// Roof stairs face away from the house center. Rows on the Z edges win over
/// the X edges at corners.
fn outward_rotation(hx: i32, hz: i32, edge: i32) -> StairRotation {
    if hz == -edge {
        StairRotation::new(2)
    } else if hz == edge {
        StairRotation::IDENTITY
    } else if hx == -edge {
        StairRotation::new(1)
    } else {
        StairRotation::new(3)
    }
}

struct DecorMaterials {
    sand: Material,
    stone: Material,
    wood: Material,
    glass: Material,
    stairs: Material,
}

impl DecorMaterials {
    fn from_registry(catalog: &BlockRegistry) -> Self {
        let material = |id: usize| {
            catalog
                .get(id)
                .map(Material::for_block)
                .unwrap_or_else(|_| Material::solid(FLOOR_COLOR))
        };
        Self {
            sand: material(SAND),
            stone: material(STONE),
            wood: material(WOOD),
            glass: material(GLASS),
            stairs: material(STAIRS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house_only() -> SceneLayout {
        let mut layout = SceneLayout::empty(1.0);
        let materials = DecorMaterials::from_registry(&BlockRegistry::reference());
        layout.add_house(&materials, 0, 0);
        layout
    }

    #[test]
    fn test_floor_plane() {
        let config = SandboxConfig::default();
        let mut world = VoxelWorld::new(config.block_size);
        build_floor(&mut world, &config);
        assert_eq!(world.floor_count(), 60 * 60);
    }

    #[test]
    fn test_house_composition() {
        let layout = house_only();
        assert_eq!(layout.len(), 57);
        assert_eq!(layout.count_shape(DecorShape::Stairs), 24);

        let glass = layout.blocks().iter().filter(|b| b.material.transparent).count();
        assert_eq!(glass, 4);

        // Door opening on the -Z wall
        assert!(!layout.blocks().iter().any(|b| b.center == Vec3::new(0.0, 1.0, -1.0)));
    }

    #[test]
    fn test_roof_stairs_face_outward() {
        let layout = house_only();
        let rotation_at = |center: Vec3| {
            layout
                .blocks()
                .iter()
                .find(|b| b.center == center && b.shape == DecorShape::Stairs)
                .map(|b| b.rotation.step())
        };
        assert_eq!(rotation_at(Vec3::new(0.0, 4.0, -2.0)), Some(2));
        assert_eq!(rotation_at(Vec3::new(0.0, 4.0, 2.0)), Some(0));
        assert_eq!(rotation_at(Vec3::new(-2.0, 4.0, 0.0)), Some(1));
        assert_eq!(rotation_at(Vec3::new(2.0, 4.0, 0.0)), Some(3));
        assert_eq!(rotation_at(Vec3::new(2.0, 4.0, -2.0)), Some(2));
        assert_eq!(rotation_at(Vec3::new(1.0, 5.0, 0.0)), Some(3));
    }

    #[test]
    fn test_register_shares_geometry_and_materials() {
        let layout = house_only();
        let mut resources = RenderResources::new();
        let handles = layout.register(&mut resources, &StairGeometry::shared(1.0));

        assert_eq!(handles.len(), layout.len());
        assert_eq!(resources.live_geometries(), 2);

        let mut distinct: Vec<&Material> = Vec::new();
        for block in layout.blocks() {
            if !distinct.contains(&&block.material) {
                distinct.push(&block.material);
            }
        }
        assert_eq!(resources.live_materials(), distinct.len());

        for (block, handle) in layout.blocks().iter().zip(&handles) {
            assert_eq!(resources.material(handle.material), Some(&block.material));
            let source = resources.geometry(handle.geometry).unwrap();
            assert_eq!(source.is_stairs(), block.shape == DecorShape::Stairs);
        }
    }

    #[test]
    fn test_register_empty_layout_allocates_nothing() {
        let mut resources = RenderResources::new();
        let handles = SceneLayout::empty(1.0).register(&mut resources, &StairGeometry::shared(1.0));
        assert!(handles.is_empty());
        assert_eq!(resources.live_geometries(), 0);
        assert_eq!(resources.live_materials(), 0);
    }

    #[test]
    fn test_full_layout_counts() {
        let layout = SceneLayout::build(&SandboxConfig::default());
        // temple 400, houses 4 x 57, preview pyramid 84, giza 1410 + 744 + 334
        assert_eq!(layout.len(), 400 + 228 + 84 + 1410 + 744 + 334);

        let preview = layout
            .blocks()
            .iter()
            .filter(|b| b.material.opacity() == PREVIEW_PYRAMID_OPACITY)
            .count();
        assert_eq!(preview, 84);
    }

    #[test]
    fn test_decorations_can_be_disabled() {
        let config = SandboxConfig {
            build_decorations: false,
            ..Default::default()
        };
        assert!(SceneLayout::build(&config).is_empty());
    }

    #[test]
    fn test_pyramid_layers_rest_on_floor() {
        let mut layout = SceneLayout::empty(1.0);
        layout.add_preview_pyramid(IVec3::new(0, 0, 10), 7, 5);
        let lowest = layout.blocks().iter().map(|b| b.center.y).fold(f32::MAX, f32::min);
        assert_eq!(lowest, 0.5);
        let apex = layout.blocks().iter().find(|b| b.center.y == 3.5).unwrap();
        assert_eq!(apex.center, Vec3::new(0.0, 3.5, 10.0));
    }
}
