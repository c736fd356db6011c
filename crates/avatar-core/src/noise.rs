//! Layered sine noise used to vary forcefield displacement.
//!
//! Every function here is pure: the same position and time always produce the
//! same value, so a particle evaluated twice in a frame never flickers.

use crate::constants::{
    NOISE_WEIGHT_DETAIL, NOISE_WEIGHT_DIRECTIONAL, NOISE_WEIGHT_SPATIAL, NOISE_WEIGHT_TEMPORAL,
};
use glam::Vec3;

/// Scalar noise in \[0, 1\] for a point at time `t`.
///
/// The directional layer uses the azimuth of `p` around the local origin.
#[inline]
pub fn noise(p: Vec3, t: f32) -> f32 {
    layered(p, t, azimuth(p))
}

/// Like [`noise`], but the directional layer follows the angle of `p` as seen
/// from `source`, so the pattern rotates with the interaction point.
#[inline]
pub fn noise_towards(p: Vec3, source: Vec3, t: f32) -> f32 {
    layered(p, t, azimuth(p - source))
}

fn layered(p: Vec3, t: f32, angle: f32) -> f32 {
    let spatial = unit((p.x * 2.1 + p.y * 1.7 + p.z * 1.3).sin());
    let temporal = unit((t * 0.9 + p.x * 0.5 - p.z * 0.7).sin());
    let detail = unit((p.x * 7.3 - p.y * 5.9 + t * 2.3).sin() * (p.z * 6.1 + t * 1.1).cos());
    let directional = unit((angle * 3.0 + t * 0.6).sin());
    let n = spatial * NOISE_WEIGHT_SPATIAL
        + temporal * NOISE_WEIGHT_TEMPORAL
        + detail * NOISE_WEIGHT_DETAIL
        + directional * NOISE_WEIGHT_DIRECTIONAL;
    // rounding can leave the weighted sum a hair outside the unit range
    n.clamp(0.0, 1.0)
}

// [-1, 1] -> [0, 1]
#[inline]
fn unit(x: f32) -> f32 {
    x * 0.5 + 0.5
}

// Angle in the card plane (XY); the card faces +Z.
#[inline]
fn azimuth(v: Vec3) -> f32 {
    v.y.atan2(v.x)
}
