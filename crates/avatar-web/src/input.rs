use avatar_core::Camera;
use glam::{Vec2, Vec3};

/// Pointer state as last reported by the page.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub ndc: Vec2,
    pub aspect: f32,
    pub inside: bool,
}

// ---------------- Canvas mapping ----------------

/// Client pixel position to normalized device coordinates (+Y up).
///
/// `rect_origin`/`rect_size` are the canvas bounding rect in CSS pixels.
/// Returns `None` for a collapsed canvas.
#[inline]
pub fn client_to_ndc(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Option<Vec2> {
    if !(rect_size.x > 0.0 && rect_size.y > 0.0) {
        return None;
    }
    let uv = (client - rect_origin) / rect_size;
    Some(Vec2::new(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0))
}

// ---------------- Picking ----------------

/// Distance along the ray to the plane `z = plane_z`, if it is hit in front.
#[inline]
pub fn ray_plane_z(ray_origin: Vec3, ray_dir: Vec3, plane_z: f32) -> Option<f32> {
    if ray_dir.z.abs() < 1e-6 {
        return None;
    }
    let t = (plane_z - ray_origin.z) / ray_dir.z;
    (t >= 0.0 && t.is_finite()).then_some(t)
}

/// Map an NDC pointer to the swarm's local space.
///
/// The ray from the fixed camera is intersected with the card plane and the
/// card's resting position is subtracted.
pub fn pointer_local(camera: &Camera, ndc: Vec2, anchor: Vec3) -> Option<Vec3> {
    if !ndc.is_finite() {
        return None;
    }
    let (origin, dir) = camera.ray_through_ndc(ndc.x, ndc.y);
    let t = ray_plane_z(origin, dir, anchor.z)?;
    let hit = origin + dir * t;
    hit.is_finite().then(|| hit - anchor)
}
