//! Hover Preview and Hand Block
//!
//! The hover preview is a translucent ghost of the selected block drawn in
//! the cell a click would fill. It is never a raycast target. The hand block
//! is a miniature of the selected block carried in the player's right hand.
//!
//! Both own render resources. The preview keeps its material id and swaps
//! geometry only when the shape kind changes; the hand block is rebuilt from
//! scratch on every selection change. In both cases the old entry is released
//! before the new one is allocated.

use std::sync::Arc;

use glam::{IVec3, Mat4, Quat, Vec3};

use super::selection::SelectionState;
use super::targeting::TargetingResult;
use crate::blocks::{BlockKind, BlockRegistry, BlockType, Material, StairGeometry, StairRotation};
use crate::render::{GeometrySource, RenderHandle, RenderResources, model_matrix};

/// Right hand position in camera space
pub const RIGHT_HAND_OFFSET: Vec3 = Vec3::new(0.38, -0.18, -0.55);
/// Hand block position relative to the hand
pub const HAND_BLOCK_OFFSET: Vec3 = Vec3::new(0.0, 0.18, 0.0);

fn fallback_type() -> BlockType {
    BlockType::new("Unknown", 0x00FF00)
}

#[derive(Debug)]
pub struct HoverPreview {
    handle: RenderHandle,
    kind: BlockKind,
    visible: bool,
    cell: IVec3,
    rotation: StairRotation,
    ghost_opacity: f32,
    block_size: f32,
    stairs: Arc<StairGeometry>,
}

impl HoverPreview {
    /// Creates a hidden preview shaped like the current selection.
    pub fn new(
        resources: &mut RenderResources,
        selection: &SelectionState,
        registry: &BlockRegistry,
        ghost_opacity: f32,
        block_size: f32,
        stairs: Arc<StairGeometry>,
    ) -> Self {
        let block = selection
            .selected_type(registry)
            .cloned()
            .unwrap_or_else(|_| fallback_type());
        let handle = resources.allocate(
            GeometrySource::for_kind(block.kind, block_size, &stairs),
            Material::ghost(&block, ghost_opacity),
        );

        Self {
            handle,
            kind: block.kind,
            visible: false,
            cell: IVec3::ZERO,
            rotation: selection.placement_rotation(registry),
            ghost_opacity,
            block_size,
            stairs,
        }
    }

    /// Follows the current target. No target hides the preview.
    pub fn update(
        &mut self,
        target: Option<&TargetingResult>,
        selection: &SelectionState,
        registry: &BlockRegistry,
        resources: &mut RenderResources,
    ) {
        match target {
            Some(target) => {
                self.cell = target.placement_cell;
                self.visible = true;
                self.refresh(selection, registry, resources);
            }
            None => self.visible = false,
        }
    }

    /// Re-reads the selection: color, opacity, shape and rotation.
    pub fn refresh(
        &mut self,
        selection: &SelectionState,
        registry: &BlockRegistry,
        resources: &mut RenderResources,
    ) {
        let Ok(block) = selection.selected_type(registry) else {
            return;
        };

        if block.kind != self.kind {
            resources.release_geometry(self.handle.geometry);
            self.handle.geometry = resources.create_geometry(GeometrySource::for_kind(
                block.kind,
                self.block_size,
                &self.stairs,
            ));
            self.kind = block.kind;
        }

        resources.update_material(self.handle.material, Material::ghost(block, self.ghost_opacity));
        self.rotation = selection.placement_rotation(registry);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn cell(&self) -> IVec3 {
        self.cell
    }

    pub fn rotation(&self) -> StairRotation {
        self.rotation
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    pub fn model_matrix(&self) -> Mat4 {
        model_matrix(self.cell.as_vec3() * self.block_size, self.rotation.quat(), 1.0)
    }

    /// Releases the preview's resources.
    pub fn release(self, resources: &mut RenderResources) {
        resources.release(self.handle);
    }
}

/// Miniature of the selected block in the player's right hand
#[derive(Debug)]
pub struct HandBlock {
    handle: RenderHandle,
    kind: BlockKind,
    scale: f32,
    block_size: f32,
    stairs: Arc<StairGeometry>,
}

impl HandBlock {
    pub fn new(
        resources: &mut RenderResources,
        selection: &SelectionState,
        registry: &BlockRegistry,
        scale: f32,
        block_size: f32,
        stairs: Arc<StairGeometry>,
    ) -> Self {
        let block = selection
            .selected_type(registry)
            .cloned()
            .unwrap_or_else(|_| fallback_type());
        let handle = Self::allocate(resources, &block, block_size, &stairs);
        Self {
            handle,
            kind: block.kind,
            scale,
            block_size,
            stairs,
        }
    }

    fn allocate(
        resources: &mut RenderResources,
        block: &BlockType,
        block_size: f32,
        stairs: &Arc<StairGeometry>,
    ) -> RenderHandle {
        resources.allocate(
            GeometrySource::for_kind(block.kind, block_size, stairs),
            Material::for_block(block),
        )
    }

    /// Disposes the current block and builds one for the new selection.
    pub fn rebuild(
        &mut self,
        selection: &SelectionState,
        registry: &BlockRegistry,
        resources: &mut RenderResources,
    ) {
        let Ok(block) = selection.selected_type(registry) else {
            return;
        };
        resources.release(self.handle);
        self.handle = Self::allocate(resources, block, self.block_size, &self.stairs);
        self.kind = block.kind;
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Transform in camera space.
    pub fn local_transform(&self) -> Mat4 {
        model_matrix(RIGHT_HAND_OFFSET + HAND_BLOCK_OFFSET, Quat::IDENTITY, self.scale)
    }

    pub fn release(self, resources: &mut RenderResources) {
        resources.release(self.handle);
    }
}
