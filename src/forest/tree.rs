//! A single L-system tree

use rand::Rng;

use crate::core::types::{Mat4, Vec3};
use crate::lsystem::{
    expand, generate_leaf_clusters, ExpandedString, GrammarPreset, LeafCluster, TreeParams,
    TurtleInterpreter, TurtleOutput,
};
use crate::math;
use crate::render::DrawInstruction;
use super::placer::TreePlacement;

/// One tree: placement, grammar and the randomness fixed at generation time
#[derive(Debug, Clone)]
pub struct Tree {
    placement: TreePlacement,
    preset: GrammarPreset,
    expanded: ExpandedString,
    leaf_clusters: Vec<LeafCluster>,
}

impl Tree {
    /// Grow a tree from `preset` at `placement`
    pub fn new<R: Rng + ?Sized>(
        placement: TreePlacement,
        preset: GrammarPreset,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut tree = Self {
            placement,
            preset,
            expanded: ExpandedString::default(),
            leaf_clusters: Vec::new(),
        };
        tree.regenerate(params, rng);
        tree
    }

    /// Grow a tree from a randomly chosen preset
    pub fn random<R: Rng + ?Sized>(placement: TreePlacement, params: &TreeParams, rng: &mut R) -> Self {
        let preset = GrammarPreset::random(rng);
        Self::new(placement, preset, params, rng)
    }

    /// Re-expand the grammar and redraw leaf randomness for new parameters.
    ///
    /// Placement and preset are kept.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, params: &TreeParams, rng: &mut R) {
        self.expanded = expand(&self.preset.spec(), params.iterations);
        self.leaf_clusters = generate_leaf_clusters(&self.expanded, params.leaves_per_cluster(), rng);

        log::debug!(
            "Tree {} at ({:.1}, {:.1}): {} symbols, {} leaf clusters",
            self.preset,
            self.placement.x,
            self.placement.z,
            self.expanded.len(),
            self.leaf_clusters.len()
        );
    }

    pub fn placement(&self) -> TreePlacement {
        self.placement
    }

    pub fn position(&self) -> (f32, f32) {
        (self.placement.x, self.placement.z)
    }

    pub fn yaw(&self) -> f32 {
        self.placement.yaw
    }

    pub fn preset(&self) -> GrammarPreset {
        self.preset
    }

    pub fn expanded(&self) -> &ExpandedString {
        &self.expanded
    }

    pub fn leaf_clusters(&self) -> &[LeafCluster] {
        &self.leaf_clusters
    }

    /// World transform of the tree base: translate to (x, 0, z), then yaw
    pub fn placement_matrix(&self) -> Mat4 {
        let m = math::translate(math::identity(), Vec3::new(self.placement.x, 0.0, self.placement.z));
        math::rotate(m, self.placement.yaw, Vec3::Y)
    }

    /// Run the turtle over this tree's string
    pub fn interpret(&self, params: &TreeParams) -> TurtleOutput {
        TurtleInterpreter::new(params, &self.leaf_clusters, self.placement_matrix()).run(&self.expanded)
    }

    /// Branch and leaf instructions for one frame
    pub fn draw_instructions(&self, params: &TreeParams) -> Vec<DrawInstruction> {
        self.interpret(params).instructions
    }
}
