//! Renderer-facing types
//!
//! The core never rasterizes anything. It produces [`DrawInstruction`]s and
//! hands them to a [`Renderer`].

pub mod instruction;
pub mod renderer;
pub mod instance;
pub mod stats;

pub use instruction::{DrawInstruction, Material, MeshKind};
pub use renderer::Renderer;
pub use instance::{InstanceBatcher, InstanceData};
pub use stats::FrameStats;
