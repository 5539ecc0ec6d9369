//! Sandbox Context
//!
//! Owns the whole session: world, selection, preview, hand block, camera,
//! locomotion and render resources. Every event handler and the frame tick
//! take `&mut Sandbox`, so input handling and frame updates never overlap.
//!
//! Interaction rules:
//! - A click while the pointer is released only captures it.
//! - Left click places the selected block next to the targeted face.
//! - Right click removes the targeted placed voxel; the floor is skipped.
//! - Rejected edits are logged and otherwise ignored.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use crate::blocks::{BlockKind, BlockRegistry, Material, StairGeometry, hex_to_rgb};
use crate::camera::FirstPersonCamera;
use crate::config::SandboxConfig;
use crate::error::{ConfigError, PlacementError, RemovalError};
use crate::input::{
    ButtonState, CursorAction, InputAction, KeyBindings, KeyCode, MouseButton, MovementKeys,
    PointerLock,
};
use crate::interaction::{
    HandBlock, HoverPreview, PlacementController, PlacementRequest, SelectionState, TargetFilter,
    TargetingResult, target_from_ray,
};
use crate::player::FlyController;
use crate::render::{GeometrySource, RenderHandle, RenderResources, model_matrix};
use crate::world::{FLOOR_COLOR, SceneLayout, Voxel, VoxelKey, VoxelWorld, build_floor};

/// One hotbar entry as the UI shows it
#[derive(Debug, Clone, PartialEq)]
pub struct HotbarSlot {
    /// Zero-based slot, also the block type id
    pub index: usize,
    /// Digit key that selects the slot
    pub key: char,
    pub label: String,
    pub color: [f32; 3],
    pub opacity: f32,
    pub kind: BlockKind,
    pub selected: bool,
}

/// A resource-backed object to draw this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub handle: RenderHandle,
    /// Local-to-world transform
    pub transform: Mat4,
}

/// What a mouse press did
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Release, repeat, or an unbound button
    Ignored,
    /// The click captured the pointer and did nothing else
    PointerLocked,
    /// Nothing under the crosshair
    NoTarget,
    Placed(VoxelKey),
    Removed(Voxel),
    PlaceRejected(PlacementError),
    RemoveRejected(RemovalError),
}

#[derive(Debug)]
pub struct Sandbox {
    config: SandboxConfig,
    registry: BlockRegistry,
    stairs: Arc<StairGeometry>,
    world: VoxelWorld,
    layout: SceneLayout,
    resources: RenderResources,
    /// Shared by every floor tile
    floor_handle: RenderHandle,
    /// One per layout block, same order
    decor_handles: Vec<RenderHandle>,
    selection: SelectionState,
    preview: HoverPreview,
    hand: HandBlock,
    placement: PlacementController,
    locomotion: FlyController,
    camera: FirstPersonCamera,
    movement: MovementKeys,
    buttons: ButtonState,
    bindings: KeyBindings,
    pointer: PointerLock,
    target: Option<TargetingResult>,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("[Config] {}", config);

        let registry = BlockRegistry::reference();
        let stairs = StairGeometry::shared(config.block_size);

        let mut world = VoxelWorld::new(config.block_size);
        build_floor(&mut world, &config);
        let layout = SceneLayout::build(&config);

        let mut resources = RenderResources::new();
        let floor_handle = resources.allocate(
            GeometrySource::Cube {
                size: config.block_size,
            },
            Material::solid(FLOOR_COLOR),
        );
        let decor_handles = layout.register(&mut resources, &stairs);

        let selection = SelectionState::new();
        let preview = HoverPreview::new(
            &mut resources,
            &selection,
            &registry,
            config.preview_opacity,
            config.block_size,
            Arc::clone(&stairs),
        );
        let hand = HandBlock::new(
            &mut resources,
            &selection,
            &registry,
            config.hand_block_scale,
            config.block_size,
            Arc::clone(&stairs),
        );

        let placement = PlacementController::new(
            config.exclusion_half_extents,
            config.block_size,
            Arc::clone(&stairs),
        );
        let locomotion = FlyController::from_config(&config);
        let camera = FirstPersonCamera::new(config.spawn_position, config.mouse_sensitivity);

        log::info!(
            "[Sandbox] Ready: {} block types, {} floor tiles, {} decorations",
            registry.len(),
            world.floor_count(),
            layout.len()
        );

        Ok(Self {
            config,
            registry,
            stairs,
            world,
            layout,
            resources,
            floor_handle,
            decor_handles,
            selection,
            preview,
            hand,
            placement,
            locomotion,
            camera,
            movement: MovementKeys::new(),
            buttons: ButtonState::new(),
            bindings: KeyBindings::new(),
            pointer: PointerLock::new(),
            target: None,
        })
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Handles a key press or release. Returns `true` if the key did something.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if self.movement.handle_key(key, pressed) {
            return true;
        }
        if !pressed {
            return false;
        }

        match self.bindings.get_action(key) {
            Some(InputAction::SelectSlot(slot)) => self.select_slot(slot),
            Some(InputAction::RotateStairs) => self.rotate_stairs(),
            Some(InputAction::ReleasePointer) => {
                if self.pointer.handle_escape() == CursorAction::ApplyState {
                    self.drop_interaction();
                }
                true
            }
            _ => false,
        }
    }

    /// Selects a hotbar slot. Slots past the registry are ignored.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        match self.selection.select(slot, &self.registry) {
            Ok(true) => {
                self.preview
                    .refresh(&self.selection, &self.registry, &mut self.resources);
                self.hand
                    .rebuild(&self.selection, &self.registry, &mut self.resources);
                log::debug!("[Sandbox] Selected slot {}", slot + 1);
                true
            }
            Ok(false) => false,
            Err(err) => {
                log::error!("[Sandbox] Slot {} ignored: {}", slot + 1, err);
                false
            }
        }
    }

    /// Quarter-turns the stairs rotation while stairs are selected.
    pub fn rotate_stairs(&mut self) -> bool {
        if !self.selection.rotate_stairs(&self.registry) {
            return false;
        }
        self.preview
            .refresh(&self.selection, &self.registry, &mut self.resources);
        log::debug!(
            "[Sandbox] Stairs rotation {}°",
            self.selection.stairs_rotation().step() as u32 * 90
        );
        true
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) -> ClickOutcome {
        if !self.buttons.set(button, pressed) {
            return ClickOutcome::Ignored;
        }

        if !self.pointer.is_locked() {
            return match self.pointer.handle_click() {
                CursorAction::ApplyState => ClickOutcome::PointerLocked,
                CursorAction::None => ClickOutcome::Ignored,
            };
        }

        match self.bindings.button_action(button) {
            Some(InputAction::Place) => self.place_selected(),
            Some(InputAction::Remove) => self.remove_targeted(),
            _ => ClickOutcome::Ignored,
        }
    }

    /// Raw pointer motion, applied on the next tick.
    pub fn handle_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.pointer.accumulate_delta(dx, dy);
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        if self.pointer.set_locked(locked) && !locked {
            self.drop_interaction();
        }
    }

    /// Held keys, buttons and the hover target do not survive a release.
    fn drop_interaction(&mut self) {
        self.movement.reset();
        self.buttons.reset();
        self.target = None;
        self.preview.hide();
    }

    pub fn handle_focus_lost(&mut self) {
        self.pointer.handle_focus_lost();
        self.movement.reset();
        self.buttons.reset();
    }

    pub fn handle_focus_gained(&mut self) -> CursorAction {
        self.pointer.handle_focus_gained()
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    fn query(&self, filter: TargetFilter) -> Option<TargetingResult> {
        let ray = self.camera.center_ray();
        target_from_ray(
            ray.origin,
            ray.direction,
            &self.world,
            &self.registry,
            &self.stairs,
            filter,
            self.config.max_reach,
        )
    }

    /// Places the selected block against the face under the crosshair.
    pub fn place_selected(&mut self) -> ClickOutcome {
        let Some(target) = self.query(TargetFilter::All) else {
            return ClickOutcome::NoTarget;
        };

        let request = PlacementRequest {
            cell: target.placement_cell,
            block_type: self.selection.selected(),
            rotation: self.selection.stairs_rotation(),
            player_position: self.camera.position,
        };
        let outcome = match self.placement.place(
            &mut self.world,
            &mut self.resources,
            &self.registry,
            request,
        ) {
            Ok(key) => ClickOutcome::Placed(key),
            Err(err) => {
                log::debug!("[Sandbox] Placement rejected: {}", err);
                ClickOutcome::PlaceRejected(err)
            }
        };
        self.retarget();
        outcome
    }

    /// Removes the placed voxel under the crosshair.
    pub fn remove_targeted(&mut self) -> ClickOutcome {
        let Some(target) = self.query(TargetFilter::PlacedOnly) else {
            return ClickOutcome::NoTarget;
        };

        let outcome = match self
            .placement
            .remove(&mut self.world, &mut self.resources, target.hit)
        {
            Ok(voxel) => ClickOutcome::Removed(voxel),
            Err(err) => {
                log::debug!("[Sandbox] Removal rejected: {}", err);
                ClickOutcome::RemoveRejected(err)
            }
        };
        self.retarget();
        outcome
    }

    fn retarget(&mut self) {
        self.target = if self.pointer.is_locked() {
            self.query(TargetFilter::All)
        } else {
            None
        };
        self.preview.update(
            self.target.as_ref(),
            &self.selection,
            &self.registry,
            &mut self.resources,
        );
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Advances one frame: mouse look, movement, then the hover target.
    pub fn tick(&mut self, dt: f32) {
        let (dx, dy) = self.pointer.consume_delta();
        if self.pointer.is_locked() {
            self.camera.apply_mouse_delta(dx, dy);
            self.camera.position = self.locomotion.step(
                self.camera.position,
                dt,
                &self.movement,
                self.camera.horizontal_forward(),
                self.camera.horizontal_right(),
            );
        }
        self.retarget();
    }

    // ------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------

    pub fn hotbar(&self) -> Vec<HotbarSlot> {
        self.registry
            .iter()
            .enumerate()
            .map(|(index, block)| HotbarSlot {
                index,
                key: char::from_digit(index as u32 + 1, 10).unwrap_or('?'),
                label: block.name.clone(),
                color: hex_to_rgb(block.color),
                opacity: block.opacity(),
                kind: block.kind,
                selected: index == self.selection.selected(),
            })
            .collect()
    }

    /// Everything to draw this frame: floor tiles, decorations, placed voxels,
    /// the preview when visible, and the hand block.
    pub fn draw_list(&self) -> Vec<Drawable> {
        let mut list = Vec::with_capacity(
            self.world.floor_count() + self.decor_handles.len() + self.world.placed_count() + 2,
        );

        for tile in self.world.floor_tiles() {
            list.push(Drawable {
                handle: self.floor_handle,
                transform: model_matrix(self.world.cell_center(tile.position), Quat::IDENTITY, 1.0),
            });
        }
        for (block, handle) in self.layout.blocks().iter().zip(&self.decor_handles) {
            list.push(Drawable {
                handle: *handle,
                transform: block.transform(),
            });
        }
        for (_, placed) in self.world.placed() {
            list.push(Drawable {
                handle: placed.render,
                transform: model_matrix(
                    self.world.cell_center(placed.voxel.position),
                    placed.voxel.rotation.quat(),
                    1.0,
                ),
            });
        }
        if self.preview.is_visible() {
            list.push(Drawable {
                handle: self.preview.handle(),
                transform: self.preview.model_matrix(),
            });
        }
        list.push(Drawable {
            handle: self.hand.handle(),
            transform: self.camera.world_from_camera() * self.hand.local_transform(),
        });
        list
    }

    /// One-line summary for a window title or overlay.
    pub fn status_text(&self) -> String {
        let selected = match self.selection.selected_type(&self.registry) {
            Ok(block) if block.is_stairs() => format!(
                "{} {}°",
                block.name,
                self.selection.stairs_rotation().step() as u32 * 90
            ),
            Ok(block) => block.name.clone(),
            Err(_) => "none".to_string(),
        };
        let target = match &self.target {
            Some(target) => {
                let c = target.placement_cell;
                format!("target ({}, {}, {})", c.x, c.y, c.z)
            }
            None => "no target".to_string(),
        };
        format!(
            "Pyramid Builder | {} | {} | {} blocks | {}",
            selected,
            target,
            self.world.placed_count(),
            self.pointer.status_message()
        )
    }

    pub fn eye_position(&self) -> Vec3 {
        self.camera.position
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn resources(&self) -> &RenderResources {
        &self.resources
    }

    pub fn floor_handle(&self) -> RenderHandle {
        self.floor_handle
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn preview(&self) -> &HoverPreview {
        &self.preview
    }

    pub fn hand(&self) -> &HandBlock {
        &self.hand
    }

    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FirstPersonCamera {
        &mut self.camera
    }

    pub fn target(&self) -> Option<&TargetingResult> {
        self.target.as_ref()
    }

    pub fn pointer(&self) -> &PointerLock {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut PointerLock {
        &mut self.pointer
    }
}
