// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use avatar_core::{Camera, CAMERA_FOVY, CAMERA_Z};
use glam::{Vec2, Vec3};
use input::*;

#[test]
fn client_corners_map_to_ndc_corners() {
    let origin = Vec2::new(10.0, 20.0);
    let size = Vec2::new(200.0, 100.0);
    let top_left = client_to_ndc(origin, origin, size).unwrap();
    assert!((top_left - Vec2::new(-1.0, 1.0)).length() < 1e-6);
    let bottom_right = client_to_ndc(origin + size, origin, size).unwrap();
    assert!((bottom_right - Vec2::new(1.0, -1.0)).length() < 1e-6);
    let center = client_to_ndc(origin + size * 0.5, origin, size).unwrap();
    assert!(center.length() < 1e-6);
}

#[test]
fn collapsed_canvas_has_no_ndc() {
    assert_eq!(client_to_ndc(Vec2::ZERO, Vec2::ZERO, Vec2::new(0.0, 10.0)), None);
    assert_eq!(client_to_ndc(Vec2::ZERO, Vec2::ZERO, Vec2::new(10.0, -1.0)), None);
}

#[test]
fn ray_plane_intersection_basic() {
    // From z = 6 looking down -Z hits z = 0 after 6 units
    let t = ray_plane_z(Vec3::new(0.0, 0.0, 6.0), Vec3::NEG_Z, 0.0).unwrap();
    assert!((t - 6.0).abs() < 1e-6);
}

#[test]
fn parallel_or_receding_rays_miss() {
    assert_eq!(ray_plane_z(Vec3::new(0.0, 0.0, 6.0), Vec3::X, 0.0), None);
    assert_eq!(ray_plane_z(Vec3::new(0.0, 0.0, 6.0), Vec3::Z, 0.0), None);
}

#[test]
fn screen_center_maps_to_card_center() {
    let camera = Camera::facing_card(16.0 / 9.0);
    let local = pointer_local(&camera, Vec2::ZERO, Vec3::ZERO).unwrap();
    assert!(local.length() < 1e-3, "got {local:?}");
}

#[test]
fn screen_edge_maps_to_frustum_edge_on_card_plane() {
    let aspect = 1.5;
    let camera = Camera::facing_card(aspect);
    let half_height = CAMERA_Z * (CAMERA_FOVY * 0.5).tan();
    let right = pointer_local(&camera, Vec2::new(1.0, 0.0), Vec3::ZERO).unwrap();
    assert!((right.x - half_height * aspect).abs() < 1e-3, "got {right:?}");
    assert!(right.y.abs() < 1e-3);
    let top = pointer_local(&camera, Vec2::new(0.0, 1.0), Vec3::ZERO).unwrap();
    assert!((top.y - half_height).abs() < 1e-3, "got {top:?}");
}

#[test]
fn pointer_is_relative_to_card_anchor() {
    let camera = Camera::facing_card(1.0);
    let anchor = Vec3::new(0.0, 0.5, 0.0);
    let local = pointer_local(&camera, Vec2::ZERO, anchor).unwrap();
    assert!((local - Vec3::new(0.0, -0.5, 0.0)).length() < 1e-3);
    assert!(local.z.abs() < 1e-3);
}

#[test]
fn non_finite_ndc_has_no_pointer() {
    let camera = Camera::facing_card(1.0);
    assert_eq!(pointer_local(&camera, Vec2::new(f32::NAN, 0.0), Vec3::ZERO), None);
}
