//! Renderer boundary

use crate::core::types::Mat4;
use super::instruction::DrawInstruction;

/// Consumer of draw instructions.
///
/// Implementations own everything GPU-side: meshes, shaders, textures. The
/// forest calls `begin_frame`, then `draw` once per instance, then
/// `end_frame`.
pub trait Renderer {
    /// Start a frame with the camera's combined view-projection matrix
    fn begin_frame(&mut self, view_projection: Mat4);

    /// Queue or draw one instance
    fn draw(&mut self, instruction: &DrawInstruction);

    /// Finish the frame
    fn end_frame(&mut self) {}

    /// Draw a run of instructions
    fn draw_all(&mut self, instructions: &[DrawInstruction]) {
        for instruction in instructions {
            self.draw(instruction);
        }
    }
}
