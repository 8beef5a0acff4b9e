//! Orbit camera for viewing the forest

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::core::types::{Mat4, Vec3};
use crate::math;

/// Radians of orbit per pixel of drag
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Distance change per unit of wheel delta
const ZOOM_SENSITIVITY: f32 = 0.05;
/// Keeps the camera off the poles
const POLAR_MARGIN: f32 = 0.1;

/// Camera orbiting a point above the forest centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Distance from the target
    pub distance: f32,
    /// Azimuthal angle around +Y in radians
    pub azimuth: f32,
    /// Polar angle from +Y in radians
    pub polar: f32,
    /// Height of the orbit target above the ground
    pub target_height: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            distance: 50.0,
            azimuth: 0.0,
            polar: FRAC_PI_2 - 0.2,
            target_height: 10.0,
            fov_y: FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 500.0,
            min_distance: 10.0,
            max_distance: 150.0,
        }
    }
}

impl OrbitCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            ..Default::default()
        }
    }

    /// Point the camera orbits around
    pub fn target(&self) -> Vec3 {
        Vec3::new(0.0, self.target_height, 0.0)
    }

    /// World position of the camera
    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        Vec3::new(
            self.distance * sin_polar * sin_azimuth,
            self.target_height + self.distance * cos_polar,
            self.distance * sin_polar * cos_azimuth,
        )
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        math::look_at(self.eye(), self.target(), Vec3::Y)
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        math::perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        math::multiply(self.projection_matrix(), self.view_matrix())
    }

    /// Orbit by a mouse drag of `(dx, dy)` pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth += dx * ORBIT_SENSITIVITY;
        self.polar = (self.polar - dy * ORBIT_SENSITIVITY).clamp(POLAR_MARGIN, PI - POLAR_MARGIN);
    }

    /// Move towards (negative) or away from (positive) the target
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta * ZOOM_SENSITIVITY).clamp(self.min_distance, self.max_distance);
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}
