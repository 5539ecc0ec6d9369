//! Interaction Tests - Targeting, Placement and Removal
//!
//! End-to-end checks of the build loop: aim, place, rotate, remove. The first
//! half drives the library pieces directly, the second half goes through
//! `Sandbox` the way the window front end does.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{IVec3, Vec3};
use voxel_sandbox_engine::blocks::{BlockRegistry, StairGeometry, StairRotation};
use voxel_sandbox_engine::interaction::{
    PlacementController, PlacementRequest, SelectionState, TargetFilter, target_from_ray,
};
use voxel_sandbox_engine::render::RenderResources;
use voxel_sandbox_engine::world::build_floor;
use voxel_sandbox_engine::{
    ClickOutcome, KeyCode, MouseButton, PlacementError, RemovalError, Sandbox, SandboxConfig,
    VoxelRef, VoxelWorld,
};

// ============================================================================
// Library-level fixture
// ============================================================================

struct Scene {
    config: SandboxConfig,
    world: VoxelWorld,
    resources: RenderResources,
    registry: BlockRegistry,
    stairs: std::sync::Arc<StairGeometry>,
    controller: PlacementController,
    selection: SelectionState,
}

impl Scene {
    fn new() -> Self {
        let config = SandboxConfig::default();
        let mut world = VoxelWorld::new(config.block_size);
        build_floor(&mut world, &config);
        let stairs = StairGeometry::shared(config.block_size);
        Self {
            controller: PlacementController::new(
                config.exclusion_half_extents,
                config.block_size,
                std::sync::Arc::clone(&stairs),
            ),
            config,
            world,
            resources: RenderResources::new(),
            registry: BlockRegistry::reference(),
            stairs,
            selection: SelectionState::new(),
        }
    }

    /// Straight-down ray onto the column at (x, z).
    fn aim_down(&self, x: i32, z: i32, filter: TargetFilter) -> Option<voxel_sandbox_engine::TargetingResult> {
        target_from_ray(
            Vec3::new(x as f32, 10.0, z as f32),
            Vec3::NEG_Y,
            &self.world,
            &self.registry,
            &self.stairs,
            filter,
            self.config.max_reach,
        )
    }

    fn place(&mut self, cell: IVec3, player: Vec3) -> Result<voxel_sandbox_engine::world::VoxelKey, PlacementError> {
        let request = PlacementRequest {
            cell,
            block_type: self.selection.selected(),
            rotation: self.selection.stairs_rotation(),
            player_position: player,
        };
        self.controller
            .place(&mut self.world, &mut self.resources, &self.registry, request)
    }
}

const FAR_PLAYER: Vec3 = Vec3::new(10.0, 2.0, 10.0);

// ============================================================================
// Build loop scenarios
// ============================================================================

#[test]
fn test_place_on_floor_face() {
    let mut scene = Scene::new();
    let target = scene.aim_down(2, 3, TargetFilter::All).unwrap();

    assert!(target.hit.is_floor());
    assert_eq!(target.hit_cell, IVec3::new(2, 0, 3));
    assert_eq!(target.face_normal, IVec3::Y);
    assert_eq!(target.placement_cell, IVec3::new(2, 1, 3));

    let key = scene.place(target.placement_cell, FAR_PLAYER).unwrap();
    let placed = scene.world.get(key).unwrap();
    assert_eq!(placed.voxel.position, IVec3::new(2, 1, 3));
    assert_eq!(placed.voxel.block_type, 0);
}

#[test]
fn test_placement_blocked_by_player() {
    let mut scene = Scene::new();
    let result = scene.place(IVec3::new(0, 1, 0), Vec3::new(0.0, 2.0, 0.0));

    assert_eq!(result, Err(PlacementError::Blocked { cell: IVec3::new(0, 1, 0) }));
    assert_eq!(scene.world.placed_count(), 0);
    assert_eq!(scene.resources.live_geometries(), 0);
}

#[test]
fn test_stairs_placed_with_half_turn() {
    let mut scene = Scene::new();
    scene.selection.select(5, &scene.registry).unwrap();
    assert!(scene.selection.rotate_stairs(&scene.registry));
    assert!(scene.selection.rotate_stairs(&scene.registry));

    let key = scene.place(IVec3::new(5, 1, 5), FAR_PLAYER).unwrap();
    let voxel = &scene.world.get(key).unwrap().voxel;
    assert_eq!(voxel.position, IVec3::new(5, 1, 5));
    assert_eq!(voxel.block_type, 5);
    assert_eq!(voxel.rotation, StairRotation::new(2));
    assert!((voxel.rotation.radians() - PI).abs() < 1e-6);

    // Top step faces -Z after a half turn
    let top = scene
        .stairs
        .world_slabs(Vec3::new(5.0, 1.0, 5.0), StairRotation::new(2))
        .max_by(|a, b| a.center.y.total_cmp(&b.center.y))
        .unwrap();
    assert!(top.center.z < 5.0);
}

#[test]
fn test_rotation_is_frozen_at_placement() {
    let mut scene = Scene::new();
    scene.selection.select(5, &scene.registry).unwrap();
    scene.selection.rotate_stairs(&scene.registry);

    let key = scene.place(IVec3::new(-3, 1, 2), FAR_PLAYER).unwrap();
    scene.selection.rotate_stairs(&scene.registry);
    scene.selection.rotate_stairs(&scene.registry);

    assert_eq!(scene.selection.stairs_rotation().step(), 3);
    assert_eq!(scene.world.get(key).unwrap().voxel.rotation.step(), 1);
}

#[test]
fn test_floor_removal_refused_and_ray_falls_through() {
    let mut scene = Scene::new();
    let floor = scene.aim_down(2, 3, TargetFilter::All).unwrap();
    let before = scene.world.floor_count();
    assert_eq!(
        scene.controller.remove(&mut scene.world, &mut scene.resources, floor.hit),
        Err(RemovalError::NotRemovable)
    );
    assert_eq!(scene.world.floor_count(), before);

    // Removal never targets the floor
    assert!(scene.aim_down(2, 3, TargetFilter::PlacedOnly).is_none());

    scene.place(IVec3::new(2, 1, 3), FAR_PLAYER).unwrap();
    let target = scene.aim_down(2, 3, TargetFilter::PlacedOnly).unwrap();
    assert_eq!(target.hit_cell, IVec3::new(2, 1, 3));
    assert_eq!(target.placement_cell, IVec3::new(2, 2, 3));

    let removed = scene
        .controller
        .remove(&mut scene.world, &mut scene.resources, target.hit)
        .unwrap();
    assert_eq!(removed.position, IVec3::new(2, 1, 3));

    let after = scene.aim_down(2, 3, TargetFilter::All).unwrap();
    assert!(matches!(after.hit, VoxelRef::Floor(_)));
    assert_eq!(after.placement_cell, IVec3::new(2, 1, 3));
}

#[test]
fn test_placed_voxel_is_immediately_targetable() {
    let mut scene = Scene::new();
    scene.selection.select(5, &scene.registry).unwrap();
    scene.selection.rotate_stairs(&scene.registry);
    let key = scene.place(IVec3::new(7, 1, -2), FAR_PLAYER).unwrap();

    let target = scene.aim_down(7, -2, TargetFilter::All).unwrap();
    assert_eq!(target.hit, VoxelRef::Placed(key));
    let voxel = scene.world.get(key).unwrap().voxel;
    assert_eq!(voxel.block_type, 5);
    assert_eq!(voxel.rotation.step(), 1);
}

#[test]
fn test_duplicate_cells_are_allowed() {
    let mut scene = Scene::new();
    scene.place(IVec3::new(1, 1, 1), FAR_PLAYER).unwrap();
    scene.place(IVec3::new(1, 1, 1), FAR_PLAYER).unwrap();
    assert_eq!(scene.world.placed_at(IVec3::new(1, 1, 1)).count(), 2);
}

#[test]
fn test_stacking_builds_upward() {
    let mut scene = Scene::new();
    for expected in 1..=4 {
        let target = scene.aim_down(-5, -5, TargetFilter::All).unwrap();
        assert_eq!(target.placement_cell, IVec3::new(-5, expected, -5));
        scene.place(target.placement_cell, FAR_PLAYER).unwrap();
    }
    assert_eq!(scene.world.placed_count(), 4);
}

// ============================================================================
// Through the sandbox context
// ============================================================================

fn sandbox() -> Sandbox {
    Sandbox::new(SandboxConfig {
        build_decorations: false,
        ..Default::default()
    })
    .unwrap()
}

fn look_down(sandbox: &mut Sandbox, x: f32, z: f32) {
    let camera = sandbox.camera_mut();
    camera.position = Vec3::new(x, 6.0, z);
    camera.yaw = 0.0;
    camera.pitch = -FRAC_PI_2;
}

fn click(sandbox: &mut Sandbox, button: MouseButton) -> ClickOutcome {
    let outcome = sandbox.handle_mouse_button(button, true);
    sandbox.handle_mouse_button(button, false);
    outcome
}

#[test]
fn test_sandbox_place_rotate_remove_cycle() {
    let mut sandbox = sandbox();
    sandbox.set_pointer_locked(true);

    sandbox.handle_key(KeyCode::Digit6, true);
    sandbox.handle_key(KeyCode::R, true);
    sandbox.handle_key(KeyCode::R, true);

    look_down(&mut sandbox, 2.0, 3.0);
    let ClickOutcome::Placed(key) = click(&mut sandbox, MouseButton::Left) else {
        panic!("expected a placement");
    };
    let voxel = sandbox.world().get(key).unwrap().voxel;
    assert_eq!(voxel.position, IVec3::new(2, 1, 3));
    assert_eq!(voxel.rotation.step(), 2);

    let ClickOutcome::Removed(removed) = click(&mut sandbox, MouseButton::Right) else {
        panic!("expected a removal");
    };
    assert_eq!(removed.position, IVec3::new(2, 1, 3));

    // Nothing placed is left, so the floor stays
    assert_eq!(click(&mut sandbox, MouseButton::Right), ClickOutcome::NoTarget);
    assert_eq!(sandbox.world().placed_count(), 0);
}

#[test]
fn test_sandbox_rejects_placement_inside_player() {
    let mut sandbox = sandbox();
    sandbox.set_pointer_locked(true);
    let camera = sandbox.camera_mut();
    camera.position = Vec3::new(0.0, 2.0, 0.0);
    camera.pitch = -FRAC_PI_2;

    assert_eq!(
        click(&mut sandbox, MouseButton::Left),
        ClickOutcome::PlaceRejected(PlacementError::Blocked { cell: IVec3::new(0, 1, 0) })
    );
    assert_eq!(sandbox.world().placed_count(), 0);
}

#[test]
fn test_sandbox_preview_hides_on_miss() {
    let mut sandbox = sandbox();
    sandbox.set_pointer_locked(true);
    look_down(&mut sandbox, 2.0, 3.0);
    sandbox.tick(0.0);
    assert!(sandbox.preview().is_visible());

    sandbox.camera_mut().pitch = FRAC_PI_2;
    sandbox.tick(0.0);
    assert!(!sandbox.preview().is_visible());
    assert!(sandbox.target().is_none());
    assert_eq!(click(&mut sandbox, MouseButton::Left), ClickOutcome::NoTarget);
}

#[test]
fn test_sandbox_preview_tracks_selection_in_same_frame() {
    let mut sandbox = sandbox();
    sandbox.set_pointer_locked(true);
    look_down(&mut sandbox, 2.0, 3.0);
    sandbox.tick(0.0);

    sandbox.handle_key(KeyCode::Digit6, true);
    sandbox.handle_key(KeyCode::R, true);
    assert!(sandbox.preview().kind().is_stairs());
    assert_eq!(sandbox.preview().rotation().step(), 1);

    sandbox.handle_key(KeyCode::Digit2, true);
    assert!(!sandbox.preview().kind().is_stairs());
    assert_eq!(sandbox.preview().rotation(), StairRotation::IDENTITY);
}

#[test]
fn test_sandbox_resources_return_to_baseline() {
    let mut sandbox = sandbox();
    let geometries = sandbox.resources().live_geometries();
    let materials = sandbox.resources().live_materials();

    sandbox.set_pointer_locked(true);
    for slot in [KeyCode::Digit1, KeyCode::Digit6, KeyCode::Digit5, KeyCode::Digit3] {
        sandbox.handle_key(slot, true);
        for x in 0..3 {
            look_down(&mut sandbox, x as f32 * 4.0, -6.0);
            assert!(matches!(click(&mut sandbox, MouseButton::Left), ClickOutcome::Placed(_)));
        }
    }
    assert_eq!(sandbox.world().placed_count(), 12);
    assert_eq!(sandbox.resources().live_geometries(), geometries + 12);

    for x in 0..3 {
        look_down(&mut sandbox, x as f32 * 4.0, -6.0);
        for _ in 0..4 {
            assert!(matches!(click(&mut sandbox, MouseButton::Right), ClickOutcome::Removed(_)));
        }
    }
    assert_eq!(sandbox.world().placed_count(), 0);
    assert_eq!(sandbox.resources().live_geometries(), geometries);
    assert_eq!(sandbox.resources().live_materials(), materials);
}
