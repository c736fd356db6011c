//! Visual-side state types shared with the frontends.
//!
//! These types avoid referencing platform-specific APIs and are usable on
//! both native and web targets. Frontends use the camera to turn pointer
//! positions into rays against the card plane.

use crate::constants::{CAMERA_FOVY, CAMERA_Z, MAX_FRAME_DELTA};
use glam::{Mat4, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The fixed camera looking at the card from `CAMERA_Z` on +Z.
    pub fn facing_card(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOVY,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// World-space ray through a point in normalized device coordinates.
    ///
    /// Returns `(origin, direction)` with a unit direction.
    pub fn ray_through_ndc(&self, ndc_x: f32, ndc_y: f32) -> (Vec3, Vec3) {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        let dir = (far - self.eye).normalize_or_zero();
        (self.eye, dir)
    }
}

/// Clamp a frame delta into `[0, MAX_FRAME_DELTA]`; NaN and negatives become 0.
#[inline]
pub fn clamp_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0.0 {
        delta.min(MAX_FRAME_DELTA)
    } else {
        0.0
    }
}
