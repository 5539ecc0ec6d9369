//! Selection State
//!
//! The hotbar slot the player has chosen and the global stairs rotation.
//! The rotation survives switching to other block types and back; it is only
//! read when a stairs type is previewed or placed.

use crate::blocks::{BlockRegistry, BlockType, BlockTypeId, StairRotation};
use crate::error::RegistryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected: BlockTypeId,
    stairs_rotation: StairRotation,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> BlockTypeId {
        self.selected
    }

    pub fn stairs_rotation(&self) -> StairRotation {
        self.stairs_rotation
    }

    pub fn selected_type<'a>(&self, registry: &'a BlockRegistry) -> Result<&'a BlockType, RegistryError> {
        registry.get(self.selected)
    }

    /// Selects a registry index. Returns whether the selection changed.
    pub fn select(&mut self, id: BlockTypeId, registry: &BlockRegistry) -> Result<bool, RegistryError> {
        registry.get(id)?;
        let changed = self.selected != id;
        self.selected = id;
        Ok(changed)
    }

    /// Advances the stairs rotation by a quarter turn, but only while a stairs
    /// type is selected. Returns whether it rotated.
    pub fn rotate_stairs(&mut self, registry: &BlockRegistry) -> bool {
        let is_stairs = self
            .selected_type(registry)
            .map(|t| t.is_stairs())
            .unwrap_or(false);
        if is_stairs {
            self.stairs_rotation = self.stairs_rotation.next();
        }
        is_stairs
    }

    /// Rotation a voxel of the selected type gets: the stairs rotation for
    /// stairs, identity for everything else.
    pub fn placement_rotation(&self, registry: &BlockRegistry) -> StairRotation {
        match self.selected_type(registry) {
            Ok(block) if block.is_stairs() => self.stairs_rotation,
            _ => StairRotation::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let selection = SelectionState::new();
        assert_eq!(selection.selected(), 0);
        assert_eq!(selection.stairs_rotation().step(), 0);
    }

    #[test]
    fn test_select_valid_and_invalid() {
        let registry = BlockRegistry::reference();
        let mut selection = SelectionState::new();

        assert_eq!(selection.select(3, &registry), Ok(true));
        assert_eq!(selection.select(3, &registry), Ok(false));
        assert_eq!(selection.selected(), 3);

        assert_eq!(
            selection.select(6, &registry),
            Err(RegistryError::OutOfRange { id: 6, len: 6 })
        );
        assert_eq!(selection.selected(), 3);
    }

    #[test]
    fn test_rotate_only_with_stairs_selected() {
        let registry = BlockRegistry::reference();
        let mut selection = SelectionState::new();

        assert!(!selection.rotate_stairs(&registry));
        assert_eq!(selection.stairs_rotation().step(), 0);

        selection.select(5, &registry).unwrap();
        assert!(selection.rotate_stairs(&registry));
        assert!(selection.rotate_stairs(&registry));
        assert_eq!(selection.stairs_rotation().step(), 2);
    }

    #[test]
    fn test_rotation_persists_across_selection() {
        let registry = BlockRegistry::reference();
        let mut selection = SelectionState::new();
        selection.select(5, &registry).unwrap();
        selection.rotate_stairs(&registry);

        selection.select(0, &registry).unwrap();
        assert_eq!(selection.placement_rotation(&registry), StairRotation::IDENTITY);
        assert_eq!(selection.stairs_rotation().step(), 1);

        selection.select(5, &registry).unwrap();
        assert_eq!(selection.placement_rotation(&registry).step(), 1);
    }

    #[test]
    fn test_full_cycle() {
        let registry = BlockRegistry::reference();
        let mut selection = SelectionState::new();
        selection.select(5, &registry).unwrap();
        for _ in 0..4 {
            selection.rotate_stairs(&registry);
        }
        assert_eq!(selection.stairs_rotation(), StairRotation::IDENTITY);
    }
}
