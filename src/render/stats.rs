//! Instruction counting renderer

use serde::Serialize;

use crate::core::types::Mat4;
use super::instruction::{DrawInstruction, MeshKind};
use super::renderer::Renderer;

/// Counts instances per mesh over the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub frames: u64,
    pub branches: usize,
    pub leaves: usize,
    pub ground: usize,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.branches + self.leaves + self.ground
    }

    /// Tally a slice without going through a frame
    pub fn count(instructions: &[DrawInstruction]) -> Self {
        let mut stats = Self::default();
        stats.draw_all(instructions);
        stats
    }
}

impl Renderer for FrameStats {
    fn begin_frame(&mut self, _view_projection: Mat4) {
        self.frames += 1;
        self.branches = 0;
        self.leaves = 0;
        self.ground = 0;
    }

    fn draw(&mut self, instruction: &DrawInstruction) {
        match instruction.mesh {
            MeshKind::Branch => self.branches += 1,
            MeshKind::Leaf => self.leaves += 1,
            MeshKind::Ground => self.ground += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_reset_each_frame() {
        let mut stats = FrameStats::new();
        stats.begin_frame(Mat4::IDENTITY);
        stats.draw(&DrawInstruction::leaf(Mat4::IDENTITY));
        stats.draw(&DrawInstruction::leaf(Mat4::IDENTITY));
        assert_eq!(stats.leaves, 2);

        stats.begin_frame(Mat4::IDENTITY);
        stats.draw(&DrawInstruction::branch(Mat4::IDENTITY));
        assert_eq!(stats.leaves, 0);
        assert_eq!(stats.branches, 1);
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.total(), 1);
    }

    #[test]
    fn test_count_slice() {
        let stats = FrameStats::count(&[
            DrawInstruction::ground(Mat4::IDENTITY),
            DrawInstruction::branch(Mat4::IDENTITY),
        ]);
        assert_eq!(stats.ground, 1);
        assert_eq!(stats.branches, 1);
        assert_eq!(stats.frames, 0);
    }
}
