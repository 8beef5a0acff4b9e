//! Forest layout: configuration, tree placement and the tree aggregate

pub mod config;
pub mod placer;
pub mod tree;
pub mod forest;

pub use config::{ForestConfig, MAX_TARGET_COUNT};
pub use placer::{ForestPlacer, TreePlacement};
pub use tree::Tree;
pub use forest::Forest;
