//! Block Materials
//!
//! Renderer-facing surface descriptions. A placed voxel, the hover preview and
//! the hand block each get their own [`Material`] so the renderer can release
//! them independently.

use super::registry::BlockType;

/// Converts 0xRRGGBB to linear 0-1 channels.
pub fn hex_to_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
    ]
}

/// Surface description for one drawable
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// RGB plus opacity in alpha
    pub color: [f32; 4],
    /// Alpha blending enabled
    pub transparent: bool,
    /// Texture image path, if any
    pub texture: Option<String>,
}

impl Material {
    /// Plain colored material.
    pub fn solid(color: u32) -> Self {
        let [r, g, b] = hex_to_rgb(color);
        Self {
            color: [r, g, b, 1.0],
            transparent: false,
            texture: None,
        }
    }

    /// Colored material with the given opacity; transparent when below 1.
    pub fn translucent(color: u32, opacity: f32) -> Self {
        let [r, g, b] = hex_to_rgb(color);
        Self {
            color: [r, g, b, opacity],
            transparent: opacity < 1.0,
            texture: None,
        }
    }

    /// Material of a placed voxel of this type.
    pub fn for_block(block: &BlockType) -> Self {
        let [r, g, b] = hex_to_rgb(block.color);
        Self {
            color: [r, g, b, block.opacity()],
            transparent: block.transparent,
            texture: block.texture.clone(),
        }
    }

    /// Preview ghost of this type: the type's own opacity when it declares one,
    /// `default_opacity` otherwise. Always blended.
    pub fn ghost(block: &BlockType, default_opacity: f32) -> Self {
        let [r, g, b] = hex_to_rgb(block.color);
        Self {
            color: [r, g, b, block.opacity.unwrap_or(default_opacity)],
            transparent: true,
            texture: None,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.color[3]
    }
}
