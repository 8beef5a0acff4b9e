//! Core types and utilities

pub mod types;
pub mod error;
pub mod logging;
pub mod camera;

pub use types::*;
pub use error::Error;
pub use camera::OrbitCamera;
