//! Built-in grammar presets

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::Error;
use super::grammar::GrammarSpec;

/// Named grammar presets a tree can be grown from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarPreset {
    /// Four side branches per segment
    #[default]
    Simple3d,
    /// Non-terminal `X` drives the branching; `F` only carries the trunk
    Minimal3d,
    /// Doubled segments with three side branches
    Basic3d,
}

impl GrammarPreset {
    pub const ALL: [GrammarPreset; 3] = [
        GrammarPreset::Simple3d,
        GrammarPreset::Minimal3d,
        GrammarPreset::Basic3d,
    ];

    /// Grammar for this preset
    pub fn spec(self) -> GrammarSpec {
        match self {
            GrammarPreset::Simple3d => GrammarSpec::new("F")
                .with_rule('F', "F[+F][-F][/F][\\F]"),
            GrammarPreset::Minimal3d => GrammarSpec::new("X")
                .with_rule('X', "F[+X][-X][/X]")
                .with_rule('F', "F"),
            GrammarPreset::Basic3d => GrammarSpec::new("F")
                .with_rule('F', "FF[+F][-F][\\F]"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GrammarPreset::Simple3d => "simple3d",
            GrammarPreset::Minimal3d => "minimal3d",
            GrammarPreset::Basic3d => "basic3d",
        }
    }

    /// Pick a preset uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for GrammarPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrammarPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidConfig(format!(
                "unknown grammar preset '{}', expected one of: simple3d, minimal3d, basic3d", s
            )))
    }
}
