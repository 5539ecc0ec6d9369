//! Block Type Registry
//!
//! Static catalog of placeable block types. The registry is ordered: index `n`
//! is hotbar slot `n + 1`, and ids are assigned from that order when the
//! registry is built. Nothing mutates it afterwards.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Index of a block type inside its registry
pub type BlockTypeId = usize;

/// Digit keys 1-9 address the hotbar, so a registry never holds more types.
pub const MAX_HOTBAR_SLOTS: usize = 9;

const SANDSTONE_01: &str = "model/textures/Sandstone01_baseColor.jpeg";
const SANDSTONE_02: &str = "model/textures/Sandstone02_baseColor.jpeg";
const SANDSTONE_03: &str = "model/textures/Sandstone03_baseColor.jpeg";

/// Shape family of a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockKind {
    /// Full unit cube
    #[default]
    Ordinary,
    /// Four stepped slabs, rotatable in quarter turns
    Stairs,
}

impl BlockKind {
    pub fn is_stairs(self) -> bool {
        matches!(self, BlockKind::Stairs)
    }
}

/// Static descriptor for one placeable block type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockType {
    /// Stable index (assigned by the registry)
    #[serde(default)]
    pub id: BlockTypeId,
    /// Display name for the hotbar
    pub name: String,
    /// Base color as 0xRRGGBB
    pub color: u32,
    /// Optional texture image path
    #[serde(default)]
    pub texture: Option<String>,
    /// Drawn with alpha blending
    #[serde(default)]
    pub transparent: bool,
    /// Declared opacity (0-1); `None` means fully opaque
    #[serde(default)]
    pub opacity: Option<f32>,
    /// Shape family
    #[serde(default)]
    pub kind: BlockKind,
}

impl BlockType {
    /// An opaque, untextured cube type.
    pub fn new(name: impl Into<String>, color: u32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            color,
            texture: None,
            transparent: false,
            opacity: None,
            kind: BlockKind::Ordinary,
        }
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn with_kind(mut self, kind: BlockKind) -> Self {
        self.kind = kind;
        self
    }

    /// Effective opacity, 1.0 unless the type declares one.
    pub fn opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn is_stairs(&self) -> bool {
        self.kind.is_stairs()
    }
}

/// Ordered, immutable collection of block types.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    types: Vec<BlockType>,
}

impl BlockRegistry {
    /// Build a registry from an ordered list. Ids are reassigned to match positions.
    pub fn new(types: Vec<BlockType>) -> Result<Self, RegistryError> {
        if types.is_empty() {
            return Err(RegistryError::Empty);
        }
        if types.len() > MAX_HOTBAR_SLOTS {
            return Err(RegistryError::TooManyTypes {
                count: types.len(),
                max: MAX_HOTBAR_SLOTS,
            });
        }

        Ok(Self::with_positional_ids(types))
    }

    fn with_positional_ids(types: Vec<BlockType>) -> Self {
        Self {
            types: types
                .into_iter()
                .enumerate()
                .map(|(id, block)| BlockType { id, ..block })
                .collect(),
        }
    }

    /// The six stock types: sand, stone, grass, wood, glass and sandstone stairs.
    pub fn reference() -> Self {
        let types = vec![
            BlockType::new("Sand", 0xF7E9A0).with_texture(SANDSTONE_01),
            BlockType::new("Stone", 0x888888).with_texture(SANDSTONE_02),
            BlockType::new("Grass", 0x4CAF50),
            BlockType::new("Wood", 0x8B5A2B).with_texture(SANDSTONE_01),
            BlockType::new("Glass", 0x99E6FF).with_opacity(0.4),
            BlockType::new("Sandstone Stairs", 0xF7E9A0)
                .with_texture(SANDSTONE_03)
                .with_kind(BlockKind::Stairs),
        ];

        Self::with_positional_ids(types)
    }

    pub fn get(&self, id: BlockTypeId) -> Result<&BlockType, RegistryError> {
        self.types.get(id).ok_or(RegistryError::OutOfRange {
            id,
            len: self.types.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &BlockType> + '_ {
        self.types.iter()
    }

    /// First registered type of the given kind.
    pub fn find_kind(&self, kind: BlockKind) -> Option<&BlockType> {
        self.types.iter().find(|t| t.kind == kind)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::reference()
    }
}
