//! Forest generation and regeneration

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::{OrbitCamera, Result};
use crate::core::types::{Mat4, Vec3};
use crate::lsystem::TreeParams;
use crate::math;
use crate::render::{DrawInstruction, Renderer};
use super::config::{ForestConfig, NUM_TREES_PARAM};
use super::placer::ForestPlacer;
use super::tree::Tree;

/// A generated forest and the state needed to regenerate it
pub struct Forest {
    config: ForestConfig,
    rng: StdRng,
    trees: Vec<Tree>,
}

impl Forest {
    /// Validate `config` and generate a forest seeded from `config.seed`
    pub fn new(config: ForestConfig) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        let mut forest = Self {
            config,
            rng,
            trees: Vec::new(),
        };
        forest.regenerate();
        Ok(forest)
    }

    /// Throw away every tree and place a fresh forest.
    ///
    /// Continues the random stream, so repeated calls give different forests.
    pub fn regenerate(&mut self) {
        let placer = ForestPlacer::from_config(&self.config);
        let placements = placer.place(self.config.target_count, &mut self.rng);

        let params = self.config.tree;
        self.trees = placements
            .into_iter()
            .map(|placement| Tree::random(placement, &params, &mut self.rng))
            .collect();

        log::info!(
            "Generated forest: {} of {} trees, {} iterations",
            self.trees.len(),
            self.config.target_count,
            params.iterations
        );
    }

    /// Restart the random stream from `seed` and regenerate
    pub fn reseed(&mut self, seed: u64) {
        self.config.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
        self.regenerate();
    }

    /// Apply new tree parameters to every tree.
    ///
    /// Every tree is re-expanded and gets fresh leaf randomness before this
    /// returns; positions and presets are kept. Invalid parameters are
    /// rejected and leave the forest untouched.
    pub fn set_params(&mut self, params: TreeParams) -> Result<()> {
        params.validate()?;
        self.config.tree = params;
        for tree in &mut self.trees {
            tree.regenerate(&self.config.tree, &mut self.rng);
        }
        log::info!("Regenerated {} trees with new parameters", self.trees.len());
        Ok(())
    }

    /// Change the number of trees to place and regenerate the forest.
    ///
    /// Counts above [`MAX_TARGET_COUNT`](super::config::MAX_TARGET_COUNT)
    /// are rejected and leave the forest untouched.
    pub fn set_target_count(&mut self, target_count: usize) -> Result<()> {
        let updated = self.config.clone().with_target_count(target_count);
        updated.validate()?;
        self.config = updated;
        self.regenerate();
        Ok(())
    }

    /// Apply one named parameter from the flat configuration interface
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<()> {
        let mut updated = self.config.clone();
        updated.set_param(name, value)?;

        if name == NUM_TREES_PARAM {
            self.set_target_count(updated.target_count)
        } else {
            self.set_params(updated.tree)
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn params(&self) -> &TreeParams {
        &self.config.tree
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Ground quad scaled to the configured ground size
    pub fn ground_instruction(&self) -> DrawInstruction {
        let half = self.config.ground_half_size;
        DrawInstruction::ground(math::scale(Mat4::IDENTITY, Vec3::new(half, 1.0, half)))
    }

    /// Every instruction for one frame: ground first, then trees in order
    pub fn draw_instructions(&self) -> Vec<DrawInstruction> {
        let mut instructions = vec![self.ground_instruction()];
        for tree in &self.trees {
            instructions.extend(tree.draw_instructions(&self.config.tree));
        }
        instructions
    }

    /// Submit one frame to `renderer`
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R, camera: &OrbitCamera) {
        renderer.begin_frame(camera.view_projection());
        renderer.draw(&self.ground_instruction());
        for tree in &self.trees {
            renderer.draw_all(&tree.draw_instructions(&self.config.tree));
        }
        renderer.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::forest::config::MAX_TARGET_COUNT;
    use crate::render::{FrameStats, InstanceBatcher, MeshKind};

    fn small_config(seed: u64) -> ForestConfig {
        let mut config = ForestConfig::default().with_seed(seed).with_target_count(8);
        config.tree.iterations = 2;
        config
    }

    #[test]
    fn test_same_seed_same_forest() {
        let a = Forest::new(small_config(9)).unwrap();
        let b = Forest::new(small_config(9)).unwrap();
        assert_eq!(a.len(), b.len());
        for (ta, tb) in a.trees().iter().zip(b.trees()) {
            assert_eq!(ta.placement(), tb.placement());
            assert_eq!(ta.preset(), tb.preset());
            assert_eq!(ta.leaf_clusters(), tb.leaf_clusters());
        }
        assert_eq!(a.draw_instructions(), b.draw_instructions());
    }

    #[test]
    fn test_trees_respect_separation() {
        let forest = Forest::new(ForestConfig::default().with_seed(3)).unwrap();
        let trees = forest.trees();
        assert!(trees.len() <= 70);
        for (i, a) in trees.iter().enumerate() {
            for b in &trees[i + 1..] {
                assert!(a.placement().distance(&b.placement()) >= 10.0);
            }
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = small_config(1);
        config.tree.leaf_density = 2.0;
        assert!(matches!(Forest::new(config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_set_params_regenerates_every_tree() {
        let mut forest = Forest::new(small_config(4)).unwrap();
        let placements: Vec<_> = forest.trees().iter().map(Tree::placement).collect();

        let mut params = *forest.params();
        params.leaf_density = 0.5;
        params.iterations = 3;
        forest.set_params(params).unwrap();

        for (tree, placement) in forest.trees().iter().zip(&placements) {
            assert_eq!(tree.placement(), *placement);
            assert!(tree.leaf_clusters().iter().all(|c| c.len() == 4));
            assert_eq!(tree.expanded(), &crate::lsystem::expand(&tree.preset().spec(), 3));
        }
    }

    #[test]
    fn test_rejected_params_leave_forest_untouched() {
        let mut forest = Forest::new(small_config(5)).unwrap();
        let before = forest.draw_instructions();

        let mut params = *forest.params();
        params.length = -1.0;
        assert!(forest.set_params(params).is_err());
        assert!(forest.set_param("leaf_density", 7.0).is_err());
        assert!(forest.set_param("gravity", 1.0).is_err());

        assert_eq!(forest.draw_instructions(), before);
    }

    #[test]
    fn test_set_param_by_name() {
        let mut forest = Forest::new(small_config(6)).unwrap();
        forest.set_param("angle", 40.0).unwrap();
        assert_eq!(forest.params().angle, 40.0);

        forest.set_param("num_trees", 3.0).unwrap();
        assert_eq!(forest.config().target_count, 3);
        assert!(forest.len() <= 3);
    }

    #[test]
    fn test_oversized_target_count_rejected() {
        let config = small_config(13).with_target_count(usize::MAX);
        assert!(matches!(Forest::new(config), Err(Error::InvalidConfig(_))));

        let mut forest = Forest::new(small_config(13)).unwrap();
        let before = forest.draw_instructions();
        assert!(forest.set_target_count(MAX_TARGET_COUNT + 1).is_err());
        assert!(forest.set_param("num_trees", 1e30).is_err());
        assert_eq!(forest.config().target_count, 8);
        assert_eq!(forest.draw_instructions(), before);
    }

    #[test]
    fn test_regenerate_moves_trees() {
        let mut forest = Forest::new(small_config(7)).unwrap();
        let before: Vec<_> = forest.trees().iter().map(Tree::placement).collect();
        forest.regenerate();
        let after: Vec<_> = forest.trees().iter().map(Tree::placement).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn test_reseed_reproduces_initial_forest() {
        let mut forest = Forest::new(small_config(8)).unwrap();
        let initial: Vec<_> = forest.trees().iter().map(Tree::placement).collect();
        forest.regenerate();
        forest.reseed(8);
        let reseeded: Vec<_> = forest.trees().iter().map(Tree::placement).collect();
        assert_eq!(initial, reseeded);
    }

    #[test]
    fn test_render_submits_ground_and_trees() {
        let forest = Forest::new(small_config(10)).unwrap();
        let camera = OrbitCamera::default();

        let mut stats = FrameStats::new();
        forest.render(&mut stats, &camera);

        let expected = FrameStats::count(&forest.draw_instructions());
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.ground, 1);
        assert_eq!(stats.branches, expected.branches);
        assert_eq!(stats.leaves, expected.leaves);

        let leaves_expected: usize = forest
            .trees()
            .iter()
            .map(|t| t.expanded().count(']') * forest.params().leaves_per_cluster())
            .sum();
        assert_eq!(stats.leaves, leaves_expected);
    }

    #[test]
    fn test_render_into_batcher() {
        let forest = Forest::new(small_config(11)).unwrap();
        let camera = OrbitCamera::default();
        let mut batcher = InstanceBatcher::new();
        forest.render(&mut batcher, &camera);

        assert_eq!(batcher.view_projection(), camera.view_projection());
        assert_eq!(batcher.batch(MeshKind::Ground).len(), 1);
        assert_eq!(batcher.len(), forest.draw_instructions().len());
    }

    #[test]
    fn test_ground_instruction_covers_ground() {
        let forest = Forest::new(small_config(12)).unwrap();
        let ground = forest.ground_instruction();
        let corner = ground.transform.transform_point3(Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(corner, Vec3::new(80.0, 0.0, 80.0));
    }
}
