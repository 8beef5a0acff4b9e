//! Draw instructions handed to a renderer

use serde::{Deserialize, Serialize};

use crate::core::types::Mat4;

/// Bark colour used when the bark texture is unavailable
pub const BARK_COLOR: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
/// Foliage colour
pub const LEAF_COLOR: [f32; 4] = [0.2, 0.7, 0.2, 1.0];
/// Ground plane colour
pub const GROUND_COLOR: [f32; 4] = [0.3, 0.5, 0.3, 1.0];

/// Which shared mesh an instruction instances
///
/// Branch is a unit-height cylinder standing on the origin along +Y, Leaf a
/// small sphere centred on the origin, Ground a unit quad spanning
/// [-1, 1] on X and Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshKind {
    Branch,
    Leaf,
    Ground,
}

/// Surface appearance of an instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Material {
    /// Sampled from the renderer's texture, or `fallback` if none is bound
    Textured { fallback: [f32; 4] },
    /// Flat colour
    Solid([f32; 4]),
}

impl Material {
    pub const BARK: Material = Material::Textured { fallback: BARK_COLOR };
    pub const LEAF: Material = Material::Solid(LEAF_COLOR);
    pub const GROUND: Material = Material::Solid(GROUND_COLOR);

    /// Colour to use when no texture is sampled
    pub fn color(&self) -> [f32; 4] {
        match *self {
            Material::Textured { fallback } => fallback,
            Material::Solid(color) => color,
        }
    }

    pub fn is_textured(&self) -> bool {
        matches!(self, Material::Textured { .. })
    }
}

/// One mesh instance to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawInstruction {
    pub mesh: MeshKind,
    /// Model-to-world transform
    pub transform: Mat4,
    pub material: Material,
}

impl DrawInstruction {
    pub fn branch(transform: Mat4) -> Self {
        Self { mesh: MeshKind::Branch, transform, material: Material::BARK }
    }

    pub fn leaf(transform: Mat4) -> Self {
        Self { mesh: MeshKind::Leaf, transform, material: Material::LEAF }
    }

    pub fn ground(transform: Mat4) -> Self {
        Self { mesh: MeshKind::Ground, transform, material: Material::GROUND }
    }
}
