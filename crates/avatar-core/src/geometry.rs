//! Source geometry for the ambient swarm.
//!
//! Hosts either hand over points sampled from the avatar mesh, or fall back to
//! an atmospheric shell around the card.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Sample `count` points uniformly in the volume between two spheres.
pub fn atmosphere_shell<R: Rng + ?Sized>(
    count: usize,
    inner_radius: f32,
    outer_radius: f32,
    rng: &mut R,
) -> Vec<Vec3> {
    let (lo, hi) = if inner_radius <= outer_radius {
        (inner_radius.max(0.0), outer_radius.max(0.0))
    } else {
        (outer_radius.max(0.0), inner_radius.max(0.0))
    };
    let lo3 = lo * lo * lo;
    let hi3 = hi * hi * hi;
    (0..count)
        .map(|_| {
            let z: f32 = rng.gen::<f32>() * 2.0 - 1.0;
            let phi: f32 = rng.gen::<f32>() * TAU;
            let ring = (1.0 - z * z).max(0.0).sqrt();
            let dir = Vec3::new(ring * phi.cos(), ring * phi.sin(), z);
            // cube-root keeps the density uniform across the shell volume
            let r = (lo3 + (hi3 - lo3) * rng.gen::<f32>()).cbrt();
            dir * r
        })
        .collect()
}

/// Interpret a flat `[x, y, z, x, y, z, ...]` slice as points.
///
/// A trailing partial triple is ignored.
pub fn points_from_flat(xyz: &[f32]) -> Vec<Vec3> {
    xyz.chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect()
}

/// Drop non-finite points and thin the rest to at most `max` with an even stride.
pub fn prepare_source(points: &[Vec3], max: usize) -> Vec<Vec3> {
    let finite: Vec<Vec3> = points.iter().copied().filter(|p| p.is_finite()).collect();
    if finite.len() <= max {
        return finite;
    }
    let len = finite.len();
    (0..max).map(|i| finite[i * len / max]).collect()
}
