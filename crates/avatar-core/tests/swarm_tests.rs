// Host-side tests for the ambient swarm lifecycle.

use avatar_core::*;
use glam::Vec3;
use rand::prelude::*;

fn make_swarm(count: usize, lifetime: f32, seed: u64) -> Swarm {
    let mut rng = StdRng::seed_from_u64(seed);
    let points = atmosphere_shell(count, 1.0, 2.0, &mut rng);
    let config = SwarmConfig {
        lifetime,
        ..SwarmConfig::default()
    };
    Swarm::from_geometry(&points, &config, &mut rng).expect("valid config")
}

#[test]
fn cycle_age_is_periodic_and_in_range() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..5000 {
        let lifetime: f32 = rng.gen_range(0.05..10.0);
        let phase: f32 = rng.gen::<f32>() * lifetime;
        let time: f64 = rng.gen_range(-1.0e4..1.0e5);
        let age = cycle_age(time, phase, lifetime);
        assert!(
            age >= 0.0 && age < lifetime as f64,
            "age {age} outside [0, {lifetime}) at t={time}"
        );
        let later = cycle_age(time + lifetime as f64, phase, lifetime);
        let wrapped = (later - age).abs().min(lifetime as f64 - (later - age).abs());
        assert!(wrapped < 1e-6, "age not periodic: {age} vs {later}");
    }
}

#[test]
fn phase_offsets_lie_within_lifetime() {
    let swarm = make_swarm(3000, 2.5, 9);
    assert_eq!(swarm.len(), 3000);
    for p in swarm.particles() {
        assert!(p.phase_offset >= 0.0 && p.phase_offset < 2.5);
        assert!(p.velocity.length() <= SWARM_DRIFT_SPEED + 1e-6);
    }
}

#[test]
fn each_particle_respawns_once_per_cycle() {
    let lifetime = 2.0f32;
    let mut swarm = make_swarm(500, lifetime, 21);
    let dt = 1.0f32 / 64.0;
    let start = 10.0f64;
    let steps = 64 * 9; // nine seconds, four and a half cycles
    let particles: Vec<Particle> = swarm.particles().to_vec();
    let mut counts = vec![0usize; particles.len()];
    let mut reported = 0usize;

    let mut t = start;
    for _ in 0..steps {
        t += dt as f64;
        let stats = swarm.tick(t, dt, None);
        let mut fired = 0usize;
        for (i, p) in particles.iter().enumerate() {
            if cycle_age(t, p.phase_offset, lifetime) < dt as f64 {
                counts[i] += 1;
                fired += 1;
            }
        }
        assert_eq!(stats.respawned, fired);
        reported += stats.respawned;
    }

    let end = t;
    let l = lifetime as f64;
    let mut expected_total = 0usize;
    for (i, p) in particles.iter().enumerate() {
        let phase = p.phase_offset as f64;
        let wraps = ((end - phase) / l).floor() - ((start - phase) / l).floor();
        assert_eq!(
            counts[i] as f64, wraps,
            "particle {i} respawned {} times for {wraps} wraps",
            counts[i]
        );
        // 4.5 cycles: every particle wraps four or five times
        assert!(counts[i] == 4 || counts[i] == 5);
        expected_total += counts[i];
    }
    assert_eq!(reported, expected_total);
}

#[test]
fn tick_reports_respawns_and_reseeds_through_the_field() {
    let lifetime = 1.0f32;
    let mut swarm = make_swarm(2000, lifetime, 5);
    let field = ForcefieldState {
        source: Vec3::ZERO,
        radius: 10.0,
        strength: 0.5,
    };
    let dt = 1.0f32 / 60.0;
    let mut total = 0usize;
    let mut t = 0.0f64;
    for _ in 0..60 {
        t += dt as f64;
        let stats = swarm.tick(t, dt, Some(&field));
        assert_eq!(stats.skipped, 0);
        total += stats.respawned;
    }
    // one second with a one second lifetime: roughly every particle once
    assert!(total > 1900 && total <= 2100, "respawned {total}");

    let mut moved = 0;
    for (seed, p) in swarm.seeds().iter().zip(swarm.particles()) {
        let shift = seed.distance(p.base_position);
        assert!(shift <= field.strength + 1e-5);
        if shift > 0.0 {
            moved += 1;
        }
    }
    assert!(moved > 1900, "only {moved} particles were displaced");
}

#[test]
fn respawn_without_field_resets_to_base() {
    let mut swarm = make_swarm(200, 1.0, 8);
    let field = ForcefieldState {
        source: Vec3::ZERO,
        radius: 10.0,
        strength: 0.5,
    };
    let dt = 0.05f32;
    let mut t = 0.0f64;
    for _ in 0..20 {
        t += dt as f64;
        swarm.tick(t, dt, Some(&field));
    }
    for _ in 0..20 {
        t += dt as f64;
        swarm.tick(t, dt, None);
    }
    for (seed, p) in swarm.seeds().iter().zip(swarm.particles()) {
        assert_eq!(*seed, p.base_position);
    }
}

#[test]
fn zero_or_invalid_delta_respawns_nothing() {
    let mut swarm = make_swarm(500, 1.0, 12);
    for delta in [0.0, -0.5, f32::NAN, f32::INFINITY * -1.0] {
        let stats = swarm.tick(3.0, delta, None);
        assert_eq!(stats.respawned, 0);
    }
}

#[test]
fn long_frames_are_clamped() {
    let mut swarm = make_swarm(2000, 1.0, 13);
    // a two second hitch only counts as MAX_FRAME_DELTA of respawn window
    let stats = swarm.tick(5.0, 2.0, None);
    let expected = 2000.0 * MAX_FRAME_DELTA / 1.0;
    assert!(
        (stats.respawned as f32) < expected * 1.5,
        "respawned {} for a clamped window",
        stats.respawned
    );
}

#[test]
fn empty_or_non_finite_geometry_yields_empty_swarm() {
    let mut rng = StdRng::seed_from_u64(1);
    let config = SwarmConfig::default();
    let mut empty = Swarm::from_geometry(&[], &config, &mut rng).expect("valid config");
    assert!(empty.is_empty());
    assert_eq!(empty.tick(1.0, 0.016, None), SwarmTickStats::default());
    assert!(empty.seed_floats().is_empty());

    let junk = [Vec3::NAN, Vec3::new(f32::INFINITY, 0.0, 0.0)];
    let swarm = Swarm::from_geometry(&junk, &config, &mut rng).expect("valid config");
    assert!(swarm.is_empty());
}

#[test]
fn oversized_geometry_is_thinned() {
    let mut rng = StdRng::seed_from_u64(2);
    let points = atmosphere_shell(500, 1.0, 2.0, &mut rng);
    let config = SwarmConfig {
        max_particles: 100,
        ..SwarmConfig::default()
    };
    let swarm = Swarm::from_geometry(&points, &config, &mut rng).expect("valid config");
    assert_eq!(swarm.len(), 100);
    assert_eq!(swarm.particles()[0].base_position, points[0]);
    assert_eq!(swarm.particles()[1].base_position, points[5]);
}

#[test]
fn invalid_lifetime_is_rejected() {
    let mut rng = StdRng::seed_from_u64(4);
    let config = SwarmConfig {
        lifetime: -1.0,
        ..SwarmConfig::default()
    };
    assert!(Swarm::from_geometry(&[Vec3::ZERO], &config, &mut rng).is_err());
}

#[test]
fn flat_views_match_buffers() {
    let swarm = make_swarm(10, 1.0, 6);
    let floats = swarm.seed_floats();
    assert_eq!(floats.len(), 30);
    assert_eq!(floats[3], swarm.seeds()[1].x);
    assert_eq!(
        swarm.particle_bytes().len(),
        10 * std::mem::size_of::<Particle>()
    );
    assert_eq!(std::mem::size_of::<Particle>(), 28);
}

#[test]
fn shell_points_respect_radii() {
    let mut rng = StdRng::seed_from_u64(10);
    for p in atmosphere_shell(1000, 1.5, 2.5, &mut rng) {
        let r = p.length();
        assert!((1.5 - 1e-4..=2.5 + 1e-4).contains(&r), "radius {r}");
    }
    let pts = points_from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    assert_eq!(pts, vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
}
