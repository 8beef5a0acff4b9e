//! 4x4 affine transform helpers
//!
//! Every function is pure and works on column-major `Mat4`. Composition
//! helpers right-multiply, so `translate(m, v)` yields a transform that
//! first translates by `v` and then applies `m`. Chaining calls therefore
//! reads like a turtle walking in local space.

use crate::core::types::{Mat4, Vec3, Vec4};

/// Axes shorter than this are treated as degenerate.
const AXIS_EPSILON: f32 = 1e-6;

/// Identity transform
#[inline]
pub fn identity() -> Mat4 {
    Mat4::IDENTITY
}

/// `a * b`: applies `b` first, then `a`
#[inline]
pub fn multiply(a: Mat4, b: Mat4) -> Mat4 {
    a * b
}

/// Right-multiply a translation onto `m`
#[inline]
pub fn translate(m: Mat4, offset: Vec3) -> Mat4 {
    m * Mat4::from_translation(offset)
}

/// Right-multiply a non-uniform scale onto `m`
#[inline]
pub fn scale(m: Mat4, factors: Vec3) -> Mat4 {
    m * Mat4::from_scale(factors)
}

/// Rodrigues rotation of `angle` radians about `axis`, right-multiplied onto `m`.
///
/// The axis is normalized first. A near-zero axis has no direction, so `m`
/// is returned unchanged.
pub fn rotate(m: Mat4, angle: f32, axis: Vec3) -> Mat4 {
    let len = axis.length();
    if len < AXIS_EPSILON {
        return m;
    }
    let Vec3 { x, y, z } = axis / len;

    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    let rotation = Mat4::from_cols(
        Vec4::new(x * x * t + c, y * x * t + z * s, z * x * t - y * s, 0.0),
        Vec4::new(x * y * t - z * s, y * y * t + c, z * y * t + x * s, 0.0),
        Vec4::new(x * z * t + y * s, y * z * t - x * s, z * z * t + c, 0.0),
        Vec4::W,
    );

    m * rotation
}

/// Right-handed perspective projection with OpenGL clip depth ([-1, 1]).
///
/// Expects `fov_y > 0`, `aspect > 0` and `0 < near < far`.
#[inline]
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_y, aspect, near, far)
}

/// Right-handed view matrix looking from `eye` towards `center`.
///
/// Returns identity when the view direction has no length or `up` is
/// parallel to it, since no orientation can be derived.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    let forward = eye - center;
    if forward.length_squared() < AXIS_EPSILON * AXIS_EPSILON {
        return Mat4::IDENTITY;
    }
    if up.cross(forward).length_squared() < AXIS_EPSILON * AXIS_EPSILON {
        return Mat4::IDENTITY;
    }
    Mat4::look_at_rh(eye, center, up)
}
