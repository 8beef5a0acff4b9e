//! Grove - L-system forest generation
//!
//! Trees are grown from small L-system grammars, walked by a turtle that
//! emits branch and leaf instances, and scattered over a ground plane with a
//! minimum spacing. Rendering is left to a [`render::Renderer`]
//! implementation.
//!
//! ```
//! use grove::core::OrbitCamera;
//! use grove::forest::{Forest, ForestConfig};
//! use grove::render::FrameStats;
//!
//! let forest = Forest::new(ForestConfig::default().with_seed(7).with_target_count(10)).unwrap();
//! let mut stats = FrameStats::new();
//! forest.render(&mut stats, &OrbitCamera::default());
//! assert_eq!(stats.ground, 1);
//! ```

pub mod core;
pub mod math;
pub mod lsystem;
pub mod render;
pub mod forest;
