//! Forest configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::lsystem::TreeParams;

/// Names accepted by [`ForestConfig::set_param`] beyond the tree parameters
pub const NUM_TREES_PARAM: &str = "num_trees";

/// Largest accepted `target_count`
pub const MAX_TARGET_COUNT: usize = 300;

/// Configuration for a generated forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    /// Random seed for placement, preset choice and leaf randomization
    pub seed: u64,
    /// Number of trees to try to place
    pub target_count: usize,
    /// Ground plane spans [-ground_half_size, ground_half_size] on X and Z
    pub ground_half_size: f32,
    /// Minimum distance between any two tree positions
    pub min_separation: f32,
    /// Trees stay at least this far inside the ground edge
    pub edge_margin: f32,
    /// Shared tree shape
    pub tree: TreeParams,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            target_count: 70,
            ground_half_size: 80.0,
            min_separation: 10.0,
            edge_margin: 5.0,
            tree: TreeParams::default(),
        }
    }
}

impl ForestConfig {
    /// Create a new forest config.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    pub fn with_tree(mut self, tree: TreeParams) -> Self {
        self.tree = tree;
        self
    }

    /// Half-extent of the square trees are placed in
    pub fn placement_half_size(&self) -> f32 {
        self.ground_half_size - self.edge_margin
    }

    /// Check every field is finite and in range
    pub fn validate(&self) -> Result<()> {
        if self.target_count > MAX_TARGET_COUNT {
            return Err(Error::InvalidConfig(format!(
                "target_count must be at most {}, got {}", MAX_TARGET_COUNT, self.target_count
            )));
        }
        if !self.ground_half_size.is_finite() || self.ground_half_size <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "ground_half_size must be > 0, got {}", self.ground_half_size
            )));
        }
        if !self.edge_margin.is_finite() || self.edge_margin < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "edge_margin must be >= 0, got {}", self.edge_margin
            )));
        }
        if self.placement_half_size() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "edge_margin {} leaves no room on ground of half size {}",
                self.edge_margin, self.ground_half_size
            )));
        }
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_separation must be >= 0, got {}", self.min_separation
            )));
        }
        self.tree.validate()
    }

    /// Set one named parameter: `num_trees` or any [`TreeParams`] name.
    ///
    /// `self` is unchanged on error.
    pub fn set_param(&mut self, name: &str, value: f64) -> Result<()> {
        if name == NUM_TREES_PARAM {
            if value < 0.0 || value.fract() != 0.0 || !value.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "num_trees must be a non-negative integer, got {}", value
                )));
            }
            if value > MAX_TARGET_COUNT as f64 {
                return Err(Error::InvalidConfig(format!(
                    "num_trees must be at most {}, got {}", MAX_TARGET_COUNT, value
                )));
            }
            self.target_count = value as usize;
            return Ok(());
        }
        self.tree.set(name, value)
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file (sync) and validate
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ForestConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.placement_half_size(), 75.0);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut cfg = ForestConfig::default();
        cfg.edge_margin = 80.0;
        assert!(cfg.validate().is_err());

        let mut cfg = ForestConfig::default();
        cfg.min_separation = f32::INFINITY;
        assert!(cfg.validate().is_err());

        let mut cfg = ForestConfig::default();
        cfg.tree.iterations = 50;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_set_param() {
        let mut cfg = ForestConfig::default();
        cfg.set_param("num_trees", 12.0).unwrap();
        cfg.set_param("taper", 0.2).unwrap();
        assert_eq!(cfg.target_count, 12);
        assert_eq!(cfg.tree.taper, 0.2);

        assert!(cfg.set_param("num_trees", -1.0).is_err());
        assert!(matches!(cfg.set_param("wind", 1.0), Err(Error::UnknownParameter(_))));
        assert_eq!(cfg.target_count, 12);
    }

    #[test]
    fn test_target_count_bounded() {
        let cfg = ForestConfig::default().with_target_count(MAX_TARGET_COUNT);
        assert!(cfg.validate().is_ok());

        let cfg = ForestConfig::default().with_target_count(MAX_TARGET_COUNT + 1);
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
        let cfg = ForestConfig::default().with_target_count(usize::MAX);
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));

        let mut cfg = ForestConfig::default();
        assert!(matches!(cfg.set_param("num_trees", 1e30), Err(Error::InvalidConfig(_))));
        assert!(cfg.set_param("num_trees", (MAX_TARGET_COUNT + 1) as f64).is_err());
        assert_eq!(cfg.target_count, 70);
        cfg.set_param("num_trees", MAX_TARGET_COUNT as f64).unwrap();
        assert_eq!(cfg.target_count, MAX_TARGET_COUNT);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("forest.json");

        let cfg = ForestConfig::default().with_seed(42).with_target_count(9);
        cfg.save_sync(&path).unwrap();

        let loaded = ForestConfig::load_sync(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "tree": { "leaf_density": 3.0 } }"#).unwrap();
        assert!(matches!(ForestConfig::load_sync(&path), Err(Error::InvalidConfig(_))));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(ForestConfig::load_sync(&path), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = ForestConfig::load_sync(Path::new("/nonexistent/forest.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
