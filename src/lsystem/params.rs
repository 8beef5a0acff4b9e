//! Shared tree shape parameters

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Highest accepted iteration count.
///
/// The bushiest preset reaches about 62k symbols and 15.6k leaf clusters here.
pub const MAX_ITERATIONS: u32 = 6;

/// Leaves per cluster at full leaf density
pub const LEAVES_AT_FULL_DENSITY: f32 = 8.0;

/// Parameters shared by every tree in a forest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeParams {
    /// Grammar rewrite passes
    pub iterations: u32,
    /// Turn angle per rotation symbol, in degrees
    pub angle: f32,
    /// Length of one `F` segment
    pub length: f32,
    /// Radius scale of the trunk base
    pub trunk_scale: f32,
    /// Fraction of trunk radius lost per trunk segment
    pub taper: f32,
    /// Scale applied when branching off the trunk
    pub branch_scale: f32,
    /// 0.0 - 1.0, scaled by 8 to a per-cluster leaf count
    pub leaf_density: f32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            iterations: 3,
            angle: 25.0,
            length: 1.7,
            trunk_scale: 3.5,
            taper: 0.12,
            branch_scale: 0.35,
            leaf_density: 0.9,
        }
    }
}

impl TreeParams {
    /// Names accepted by [`TreeParams::set`]
    pub const NAMES: [&'static str; 7] = [
        "iterations",
        "angle",
        "length",
        "trunk_scale",
        "taper",
        "branch_scale",
        "leaf_density",
    ];

    /// Turn angle in radians
    pub fn angle_radians(&self) -> f32 {
        self.angle.to_radians()
    }

    /// Leaves generated for each `]` occurrence
    pub fn leaves_per_cluster(&self) -> usize {
        (self.leaf_density * LEAVES_AT_FULL_DENSITY).round().max(0.0) as usize
    }

    /// Check every field is finite and in range
    pub fn validate(&self) -> Result<()> {
        if self.iterations > MAX_ITERATIONS {
            return Err(Error::InvalidConfig(format!(
                "iterations must be at most {}, got {}", MAX_ITERATIONS, self.iterations
            )));
        }
        if !self.angle.is_finite() {
            return Err(Error::InvalidConfig("angle must be finite".to_string()));
        }
        positive("length", self.length)?;
        positive("trunk_scale", self.trunk_scale)?;
        positive("branch_scale", self.branch_scale)?;
        if !self.taper.is_finite() || self.taper < 0.0 {
            return Err(Error::InvalidConfig(format!("taper must be >= 0, got {}", self.taper)));
        }
        if !(0.0..=1.0).contains(&self.leaf_density) {
            return Err(Error::InvalidConfig(format!(
                "leaf_density must be within 0.0 - 1.0, got {}", self.leaf_density
            )));
        }
        Ok(())
    }

    /// Set one parameter by name.
    ///
    /// The updated parameters are validated before anything is written, so
    /// `self` is unchanged on error.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let mut updated = *self;
        match name {
            "iterations" => {
                if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
                    return Err(Error::InvalidConfig(format!(
                        "iterations must be a non-negative integer, got {}", value
                    )));
                }
                updated.iterations = value as u32;
            }
            "angle" => updated.angle = value as f32,
            "length" => updated.length = value as f32,
            "trunk_scale" => updated.trunk_scale = value as f32,
            "taper" => updated.taper = value as f32,
            "branch_scale" => updated.branch_scale = value as f32,
            "leaf_density" => updated.leaf_density = value as f32,
            other => return Err(Error::UnknownParameter(other.to_string())),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{} must be > 0, got {}", name, value)))
    }
}
