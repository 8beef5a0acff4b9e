//! L-system trees: grammar expansion, presets, shape parameters and the
//! turtle that turns expanded strings into draw instructions.

pub mod grammar;
pub mod preset;
pub mod params;
pub mod leaf;
pub mod turtle;

pub use grammar::{expand, ExpandedString, GrammarSpec, MAX_EXPANDED_LEN};
pub use preset::GrammarPreset;
pub use params::{TreeParams, MAX_ITERATIONS};
pub use leaf::{generate_leaf_clusters, LeafCluster, LeafOffset};
pub use turtle::{interpret, TurtleInterpreter, TurtleOutput};
