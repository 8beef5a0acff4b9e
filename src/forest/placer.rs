//! Tree placement by rejection sampling
//!
//! Candidates are drawn uniformly over the placement square and rejected if
//! they land closer than `min_separation` to any accepted tree. Each
//! candidate is checked against every accepted position, which is O(n^2)
//! over a full run. At the tens to low hundreds of trees a forest holds this
//! is negligible next to interpretation, so there is no spatial index.

use std::f32::consts::TAU;

use rand::Rng;

use super::config::{ForestConfig, MAX_TARGET_COUNT};

/// Attempts allowed per requested tree
pub const ATTEMPTS_PER_TREE: usize = 10;

/// Ground position and heading of one tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreePlacement {
    pub x: f32,
    pub z: f32,
    /// Rotation about +Y in radians, in [0, 2pi)
    pub yaw: f32,
}

impl TreePlacement {
    pub fn new(x: f32, z: f32, yaw: f32) -> Self {
        Self { x, z, yaw }
    }

    /// Ground-plane distance to `other`
    pub fn distance(&self, other: &TreePlacement) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

/// Rejection sampler for tree positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestPlacer {
    /// Candidates are drawn from [-half_extent, half_extent] on X and Z
    pub half_extent: f32,
    pub min_separation: f32,
}

impl ForestPlacer {
    /// `ground_half_size` shrunk by `edge_margin` on every side.
    ///
    /// A non-finite extent collapses to the origin.
    pub fn new(ground_half_size: f32, edge_margin: f32, min_separation: f32) -> Self {
        let half_extent = ground_half_size - edge_margin;
        Self {
            half_extent: if half_extent.is_finite() { half_extent.max(0.0) } else { 0.0 },
            min_separation,
        }
    }

    pub fn from_config(config: &ForestConfig) -> Self {
        Self::new(config.ground_half_size, config.edge_margin, config.min_separation)
    }

    /// Place up to `target_count` trees.
    ///
    /// Gives up after `target_count * ATTEMPTS_PER_TREE` candidates and
    /// returns whatever was accepted. Every returned pair is at least
    /// `min_separation` apart. Targets above [`MAX_TARGET_COUNT`] are
    /// clamped.
    pub fn place<R: Rng + ?Sized>(&self, target_count: usize, rng: &mut R) -> Vec<TreePlacement> {
        if target_count > MAX_TARGET_COUNT {
            log::warn!("Clamping tree target {} to {}", target_count, MAX_TARGET_COUNT);
        }
        let target_count = target_count.min(MAX_TARGET_COUNT);
        let mut placed: Vec<TreePlacement> = Vec::with_capacity(target_count);
        let budget = target_count.saturating_mul(ATTEMPTS_PER_TREE);
        let mut attempts = 0;

        while placed.len() < target_count && attempts < budget {
            attempts += 1;

            let x = self.sample_axis(rng);
            let z = self.sample_axis(rng);

            let too_close = placed
                .iter()
                .any(|tree| (x - tree.x).hypot(z - tree.z) < self.min_separation);
            if too_close {
                continue;
            }

            let yaw = rng.gen_range(0.0..TAU);
            placed.push(TreePlacement { x, z, yaw });
        }

        if placed.len() < target_count {
            log::warn!(
                "Placed {} of {} trees after {} attempts (min separation {})",
                placed.len(), target_count, attempts, self.min_separation
            );
        } else {
            log::debug!("Placed {} trees in {} attempts", placed.len(), attempts);
        }

        placed
    }

    fn sample_axis<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.half_extent.is_finite() && self.half_extent > 0.0 {
            rng.gen_range(-self.half_extent..=self.half_extent)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_separated(trees: &[TreePlacement], min_separation: f32) {
        for (i, a) in trees.iter().enumerate() {
            for b in &trees[i + 1..] {
                assert!(a.distance(b) >= min_separation, "{:?} too close to {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_places_five_separated_trees() {
        let placer = ForestPlacer::new(80.0, 5.0, 10.0);
        let trees = placer.place(5, &mut StdRng::seed_from_u64(42));
        assert_eq!(trees.len(), 5);
        assert_separated(&trees, 10.0);
    }

    #[test]
    fn test_placement_reproducible_with_seed() {
        let placer = ForestPlacer::new(80.0, 5.0, 10.0);
        let a = placer.place(5, &mut StdRng::seed_from_u64(42));
        let b = placer.place(5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        let c = placer.place(5, &mut StdRng::seed_from_u64(43));
        assert_ne!(a, c);
    }

    #[test]
    fn test_positions_and_yaw_in_range() {
        let placer = ForestPlacer::new(80.0, 5.0, 10.0);
        let trees = placer.place(70, &mut StdRng::seed_from_u64(7));
        assert!(!trees.is_empty());
        for tree in &trees {
            assert!(tree.x.abs() <= 75.0 && tree.z.abs() <= 75.0);
            assert!((0.0..TAU).contains(&tree.yaw));
        }
        assert_separated(&trees, 10.0);
    }

    #[test]
    fn test_crowded_ground_under_fills() {
        // 4x4 square cannot hold more than a handful of trees 3 apart
        let placer = ForestPlacer::new(3.0, 1.0, 3.0);
        let trees = placer.place(50, &mut StdRng::seed_from_u64(1));
        assert!(trees.len() < 50);
        assert!(!trees.is_empty());
        assert_separated(&trees, 3.0);
    }

    #[test]
    fn test_zero_target() {
        let placer = ForestPlacer::new(80.0, 5.0, 10.0);
        assert!(placer.place(0, &mut StdRng::seed_from_u64(1)).is_empty());
    }

    #[test]
    fn test_oversized_target_clamped() {
        let placer = ForestPlacer::new(1000.0, 0.0, 1.0);
        let trees = placer.place(usize::MAX, &mut StdRng::seed_from_u64(2));
        assert!(!trees.is_empty());
        assert!(trees.len() <= MAX_TARGET_COUNT);
    }

    #[test]
    fn test_non_finite_extent_collapses_to_origin() {
        for ground in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            let placer = ForestPlacer::new(ground, 5.0, 10.0);
            assert_eq!(placer.half_extent, 0.0);
            let trees = placer.place(3, &mut StdRng::seed_from_u64(3));
            assert_eq!(trees.len(), 1);
            assert_eq!((trees[0].x, trees[0].z), (0.0, 0.0));
        }

        let placer = ForestPlacer { half_extent: f32::INFINITY, min_separation: 1.0 };
        let trees = placer.place(2, &mut StdRng::seed_from_u64(4));
        assert!(trees.iter().all(|t| t.x == 0.0 && t.z == 0.0));
    }

    #[test]
    fn test_separation_holds_across_seeds() {
        let placer = ForestPlacer::new(40.0, 2.0, 6.0);
        for seed in 0..20 {
            let trees = placer.place(60, &mut StdRng::seed_from_u64(seed));
            assert_separated(&trees, 6.0);
        }
    }
}
