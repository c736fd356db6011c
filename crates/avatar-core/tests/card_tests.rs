// Host-side tests for the card spin state machine and idle float.

use avatar_core::*;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

fn run_until_idle(card: &mut CardController, start: f64, dt: f32) -> f64 {
    let mut t = start;
    for _ in 0..10_000 {
        t += dt as f64;
        card.tick(t, dt);
        if !card.is_spinning() {
            return t;
        }
    }
    panic!("spin never finished");
}

#[test]
fn smoothstep_endpoints_and_monotonic() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = smoothstep(i as f32 / 100.0);
        assert!(v > prev);
        prev = v;
    }
}

#[test]
fn spin_completes_after_expected_time() {
    let mut card = CardController::new(CardConfig::default());
    assert!(card.start_spin());
    let done = run_until_idle(&mut card, 0.0, 1.0 / 60.0);
    // 1 / 1.5 s, give or take one frame of float accumulation
    assert!((done - 2.0 / 3.0).abs() <= 1.0 / 60.0 + 1e-6, "spin finished at {done}");
    assert_eq!(card.spin_progress(), 1.0);
}

#[test]
fn spin_rotation_follows_eased_progress() {
    let mut card = CardController::new(CardConfig {
        spin_speed: 1.0,
        ..CardConfig::default()
    });
    card.start_spin();
    card.tick(0.1, 0.1);
    let r = card.transform().rotation;
    assert!((r.y - TAU * smoothstep(0.1)).abs() < 1e-5);
    assert_eq!(r.x, 0.0);
    let mut t = 0.1;
    for _ in 0..4 {
        t += 0.1;
        card.tick(t, 0.1);
    }
    assert!((card.spin_progress() - 0.5).abs() < 1e-5);
    assert!((card.transform().rotation.y - TAU * 0.5).abs() < 1e-4);
}

#[test]
fn spin_suppresses_idle_float() {
    let config = CardConfig::default();
    let mut card = CardController::new(config.clone());
    // idle: bob is visible at a time where sin is far from zero
    let t = std::f64::consts::FRAC_PI_2 / config.float_frequency as f64;
    card.tick(t, 0.016);
    assert!((card.transform().position.y - config.float_amplitude).abs() < 1e-4);

    card.start_spin();
    card.tick(t + 0.016, 0.016);
    assert_eq!(card.transform().position, config.position);
    assert_eq!(card.transform().rotation.x, 0.0);
}

#[test]
fn base_rotation_is_normalized_after_spins() {
    for start in [-10.0f32, -PI, -1.0, 0.0, 1.0, PI, 3.5, 100.0] {
        assert!(
            normalize_angle(start) > -PI && normalize_angle(start) <= PI,
            "normalize_angle({start}) = {}",
            normalize_angle(start)
        );
    }
    assert_eq!(normalize_angle(PI), PI);
    assert!((normalize_angle(-PI) - PI).abs() < 1e-6);

    let mut card = CardController::new(CardConfig::default());
    let mut t = 0.0;
    for _ in 0..5 {
        card.start_spin();
        t = run_until_idle(&mut card, t, 0.02);
        let base = card.state().base_rotation_y;
        assert!(base > -PI && base <= PI, "base rotation {base}");
        // a full turn lands where it started
        assert!(base.abs() < 1e-4);
    }
}

#[test]
fn spin_cannot_be_restarted_mid_flight() {
    let mut card = CardController::new(CardConfig::default());
    assert!(card.start_spin());
    card.tick(0.1, 0.1);
    let progress = card.spin_progress();
    assert!(!card.start_spin());
    assert_eq!(card.spin_progress(), progress);
    assert!(card.is_spinning());
}

#[test]
fn long_frames_do_not_skip_the_spin() {
    let mut card = CardController::new(CardConfig::default());
    card.start_spin();
    card.tick(5.0, 5.0);
    // clamped to MAX_FRAME_DELTA, so still mid-spin
    assert!(card.is_spinning());
    assert!((card.spin_progress() - MAX_FRAME_DELTA * SPIN_SPEED).abs() < 1e-6);
}

#[test]
fn model_matrix_places_card() {
    let mut card = CardController::new(CardConfig {
        position: Vec3::new(1.0, 2.0, 3.0),
        float_amplitude: 0.0,
        tilt_amplitude: 0.0,
        sway_amplitude: 0.0,
        ..CardConfig::default()
    });
    card.tick(1.0, 0.016);
    let m = card.transform().model_matrix();
    let origin = m.transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    assert_eq!(card.anchor(), Vec3::new(1.0, 2.0, 3.0));
}
