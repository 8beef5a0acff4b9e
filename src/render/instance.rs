//! GPU instance packing.
//!
//! [`InstanceBatcher`] is a [`Renderer`] that buffers one frame of draw
//! instructions as per-mesh arrays of [`InstanceData`], ready to upload to
//! an instance buffer.

use bytemuck::{Pod, Zeroable};

use crate::core::types::Mat4;
use super::instruction::{DrawInstruction, MeshKind};
use super::renderer::Renderer;

/// Per-instance vertex data.
/// Must match the instance layout in the renderer's shaders.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Model matrix, column-major
    pub model: [[f32; 4]; 4],
    /// Solid colour, or fallback colour for textured instances
    pub color: [f32; 4],
    /// Whether to sample the bound texture (0 or 1)
    pub textured: u32,
    /// Padding for alignment
    pub _pad: [u32; 3],
}

impl From<&DrawInstruction> for InstanceData {
    fn from(instruction: &DrawInstruction) -> Self {
        Self {
            model: instruction.transform.to_cols_array_2d(),
            color: instruction.material.color(),
            textured: u32::from(instruction.material.is_textured()),
            _pad: [0; 3],
        }
    }
}

/// One frame of instances grouped by mesh
#[derive(Debug, Default)]
pub struct InstanceBatcher {
    view_projection: Mat4,
    branches: Vec<InstanceData>,
    leaves: Vec<InstanceData>,
    ground: Vec<InstanceData>,
}

impl InstanceBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// View-projection matrix of the current frame
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// Instances queued for `mesh`
    pub fn batch(&self, mesh: MeshKind) -> &[InstanceData] {
        match mesh {
            MeshKind::Branch => &self.branches,
            MeshKind::Leaf => &self.leaves,
            MeshKind::Ground => &self.ground,
        }
    }

    /// Raw bytes of the batch for `mesh`, for buffer upload
    pub fn as_bytes(&self, mesh: MeshKind) -> &[u8] {
        bytemuck::cast_slice(self.batch(mesh))
    }

    /// Total queued instances
    pub fn len(&self) -> usize {
        self.branches.len() + self.leaves.len() + self.ground.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.branches.clear();
        self.leaves.clear();
        self.ground.clear();
    }
}

impl Renderer for InstanceBatcher {
    fn begin_frame(&mut self, view_projection: Mat4) {
        self.view_projection = view_projection;
        self.clear();
    }

    fn draw(&mut self, instruction: &DrawInstruction) {
        let data = InstanceData::from(instruction);
        match instruction.mesh {
            MeshKind::Branch => self.branches.push(data),
            MeshKind::Leaf => self.leaves.push(data),
            MeshKind::Ground => self.ground.push(data),
        }
    }
}
