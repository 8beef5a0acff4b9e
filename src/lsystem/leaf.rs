//! Pre-randomized foliage clusters
//!
//! Each `]` in an expanded string owns one cluster. Clusters are generated
//! once per tree, in the order their `]` occurs, and the turtle consumes
//! them in that same order. Keeping the randomness out of the draw pass is
//! what stops foliage from jittering between frames.

use rand::Rng;

use crate::core::types::{Mat4, Vec3};
use crate::math;
use super::grammar::ExpandedString;

/// Uniform scale applied to every leaf mesh
pub const LEAF_SCALE: f32 = 0.8;

/// Half-extent of the random leaf offset around the branch tip
pub const LEAF_OFFSET_EXTENT: Vec3 = Vec3::new(0.3, 0.2, 0.3);

/// Half-extent of the random leaf rotation about each axis, in radians
pub const LEAF_ROTATION_EXTENT: f32 = 0.25;

/// Placement of one leaf relative to the turtle frame at its `]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafOffset {
    pub offset: Vec3,
    /// Rotation about local x, y, z in radians, applied in that order
    pub rotation: Vec3,
}

impl LeafOffset {
    pub fn new(offset: Vec3, rotation: Vec3) -> Self {
        Self { offset, rotation }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut centered = |extent: f32| rng.gen_range(-extent..extent);
        let offset = Vec3::new(
            centered(LEAF_OFFSET_EXTENT.x),
            centered(LEAF_OFFSET_EXTENT.y),
            centered(LEAF_OFFSET_EXTENT.z),
        );
        let rotation = Vec3::new(
            centered(LEAF_ROTATION_EXTENT),
            centered(LEAF_ROTATION_EXTENT),
            centered(LEAF_ROTATION_EXTENT),
        );
        Self { offset, rotation }
    }

    /// Leaf transform relative to the branch frame
    pub fn local_transform(&self) -> Mat4 {
        let m = math::translate(Mat4::IDENTITY, self.offset);
        let m = math::rotate(m, self.rotation.x, Vec3::X);
        let m = math::rotate(m, self.rotation.y, Vec3::Y);
        let m = math::rotate(m, self.rotation.z, Vec3::Z);
        math::scale(m, Vec3::splat(LEAF_SCALE))
    }
}

/// Leaves attached to one `]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafCluster {
    leaves: Vec<LeafOffset>,
}

impl LeafCluster {
    pub fn new(leaves: Vec<LeafOffset>) -> Self {
        Self { leaves }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Self {
        Self {
            leaves: (0..count).map(|_| LeafOffset::random(rng)).collect(),
        }
    }

    pub fn leaves(&self) -> &[LeafOffset] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

/// One cluster of `leaves_per_cluster` leaves for every `]` in `expanded`
pub fn generate_leaf_clusters<R: Rng + ?Sized>(
    expanded: &ExpandedString,
    leaves_per_cluster: usize,
    rng: &mut R,
) -> Vec<LeafCluster> {
    expanded
        .symbols()
        .filter(|&c| c == ']')
        .map(|_| LeafCluster::random(rng, leaves_per_cluster))
        .collect()
}
