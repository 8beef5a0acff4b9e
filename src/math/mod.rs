//! Mathematical utilities

pub mod affine;

pub use affine::{identity, look_at, multiply, perspective, rotate, scale, translate};
