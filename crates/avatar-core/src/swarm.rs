use crate::constants::{SWARM_DRIFT_SPEED, SWARM_LIFETIME, SWARM_MAX_PARTICLES};
use crate::error::{ConfigError, Result};
use crate::forcefield::{displace, ForcefieldState};
use crate::geometry::prepare_source;
use crate::state::clamp_delta;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

/// Static tuning for the ambient swarm.
///
/// - `lifetime`: seconds between two respawns of the same particle
/// - `max_particles`: source geometry beyond this is thinned
/// - `drift_speed`: upper bound on each particle's drift velocity
#[derive(Clone, Debug, PartialEq)]
pub struct SwarmConfig {
    pub lifetime: f32,
    pub max_particles: usize,
    pub drift_speed: f32,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            lifetime: SWARM_LIFETIME,
            max_particles: SWARM_MAX_PARTICLES,
            drift_speed: SWARM_DRIFT_SPEED,
        }
    }
}

impl SwarmConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.lifetime.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "swarm.lifetime",
            });
        }
        if self.lifetime <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "swarm.lifetime",
                value: self.lifetime,
            });
        }
        if !self.drift_speed.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "swarm.drift_speed",
            });
        }
        Ok(())
    }
}

/// One ambient particle. Laid out for direct upload as an instance buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Particle {
    pub base_position: Vec3,
    pub velocity: Vec3,
    pub phase_offset: f32,
}

/// Counters from one lifecycle pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwarmTickStats {
    pub respawned: usize,
    pub skipped: usize,
}

/// The ambient particle swarm and its staggered respawn schedule.
///
/// Particles are allocated once and never destroyed. Each one restarts its
/// cycle when `(time - phase_offset) mod lifetime` wraps, and only then is its
/// seed position recomputed. The renderer extrapolates motion from the seed
/// using the particle's velocity and cycle age; the host never moves particles
/// between respawns.
///
/// Typical usage:
/// - Construct with `Swarm::from_geometry(points, &config, &mut rng)`
/// - Call `tick(time, delta, field)` once per frame
/// - Upload `seed_floats()` after each tick and `particle_bytes()` once
#[derive(Clone, Debug)]
pub struct Swarm {
    particles: Vec<Particle>,
    seeds: Vec<Vec3>,
    lifetime: f32,
}

impl Swarm {
    /// Build a swarm over `points`. Empty geometry yields an empty swarm.
    pub fn from_geometry<R: Rng + ?Sized>(
        points: &[Vec3],
        config: &SwarmConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let source = prepare_source(points, config.max_particles);
        if source.is_empty() {
            log::debug!("[swarm] no source geometry; swarm is empty");
        }
        let particles = source
            .iter()
            .map(|&base_position| Particle {
                base_position,
                velocity: drift_velocity(config.drift_speed, rng),
                phase_offset: phase_offset(config.lifetime, rng),
            })
            .collect::<Vec<_>>();
        let seeds = source;
        Ok(Self {
            particles,
            seeds,
            lifetime: config.lifetime,
        })
    }

    /// Respawn every particle whose cycle wrapped within the last `delta`
    /// seconds, re-seeding it through the forcefield when one is present.
    pub fn tick(
        &mut self,
        time: f64,
        delta: f32,
        field: Option<&ForcefieldState>,
    ) -> SwarmTickStats {
        let mut stats = SwarmTickStats::default();
        let window = clamp_delta(delta) as f64;
        if window <= 0.0 || !time.is_finite() {
            return stats;
        }
        let time_f32 = time as f32;
        for (i, (p, seed)) in self.particles.iter().zip(self.seeds.iter_mut()).enumerate() {
            if cycle_age(time, p.phase_offset, self.lifetime) >= window {
                continue;
            }
            let next = match field {
                Some(f) => displace(p.base_position, f, time_f32),
                None => p.base_position,
            };
            if !next.is_finite() {
                log::trace!("[swarm] particle {i} produced a non-finite seed; skipped");
                stats.skipped += 1;
                continue;
            }
            *seed = next;
            stats.respawned += 1;
        }
        stats
    }

    /// Cycle age of particle `index` at `time`, if it exists.
    pub fn age_of(&self, index: usize, time: f64) -> Option<f32> {
        self.particles
            .get(index)
            .map(|p| cycle_age(time, p.phase_offset, self.lifetime) as f32)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn seeds(&self) -> &[Vec3] {
        &self.seeds
    }

    /// Seed positions as packed `xyz` floats.
    pub fn seed_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.seeds)
    }

    /// Static per-particle attributes as raw bytes (`base, velocity, phase`).
    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}

/// `(time - phase) mod lifetime`, always in `[0, lifetime)`.
///
/// Uses the Euclidean remainder so times before the phase offset still land
/// in range.
pub fn cycle_age(time: f64, phase_offset: f32, lifetime: f32) -> f64 {
    let l = lifetime as f64;
    let age = (time - phase_offset as f64).rem_euclid(l);
    // rem_euclid may round up to exactly `l` for tiny negative inputs
    if age >= l {
        0.0
    } else {
        age
    }
}

fn phase_offset<R: Rng + ?Sized>(lifetime: f32, rng: &mut R) -> f32 {
    let p = rng.gen::<f32>() * lifetime;
    if p < lifetime {
        p
    } else {
        0.0
    }
}

// Mostly upward drift, like warm air rising off the card.
fn drift_velocity<R: Rng + ?Sized>(max_speed: f32, rng: &mut R) -> Vec3 {
    let dir = Vec3::new(
        rng.gen::<f32>() - 0.5,
        rng.gen::<f32>() * 0.7 + 0.3,
        rng.gen::<f32>() - 0.5,
    )
    .normalize_or_zero();
    dir * max_speed * (0.3 + 0.7 * rng.gen::<f32>())
}
