use crate::constants::*;
use crate::error::{ConfigError, Result};
use crate::state::clamp_delta;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Which transaction a burst celebrates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BurstKind {
    #[default]
    None,
    Buy,
    Sell,
}

impl BurstKind {
    /// Numeric tag published in the uniforms table.
    #[inline]
    pub fn as_uniform(self) -> f32 {
        match self {
            BurstKind::None => 0.0,
            BurstKind::Buy => 1.0,
            BurstKind::Sell => 2.0,
        }
    }

    /// Inverse of [`as_uniform`](Self::as_uniform) for integer tags.
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            1 => BurstKind::Buy,
            2 => BurstKind::Sell,
            _ => BurstKind::None,
        }
    }

    pub fn tint(self) -> [f32; 3] {
        match self {
            BurstKind::None => NEUTRAL_TINT,
            BurstKind::Buy => BUY_TINT,
            BurstKind::Sell => SELL_TINT,
        }
    }
}

/// Static tuning for transaction bursts.
#[derive(Clone, Debug, PartialEq)]
pub struct BurstConfig {
    pub particle_count: usize,
    pub duration: f32,
    pub gravity: f32,
    pub drag: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub elevation_max: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub max_age_min: f32,
    pub max_age_max: f32,
    /// Emission point relative to the card position
    pub emission_offset: Vec3,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            particle_count: BURST_PARTICLE_COUNT,
            duration: BURST_DURATION,
            gravity: BURST_GRAVITY,
            drag: BURST_DRAG,
            speed_min: BURST_SPEED_MIN,
            speed_max: BURST_SPEED_MAX,
            elevation_max: BURST_ELEVATION_MAX,
            size_min: BURST_SIZE_MIN,
            size_max: BURST_SIZE_MAX,
            max_age_min: BURST_MAX_AGE_MIN,
            max_age_max: BURST_MAX_AGE_MAX,
            emission_offset: burst_emission_offset_vec3(),
        }
    }
}

impl BurstConfig {
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("burst.duration", self.duration),
            ("burst.gravity", self.gravity),
            ("burst.drag", self.drag),
            ("burst.speed_min", self.speed_min),
            ("burst.speed_max", self.speed_max),
            ("burst.elevation_max", self.elevation_max),
            ("burst.size_min", self.size_min),
            ("burst.size_max", self.size_max),
            ("burst.max_age_min", self.max_age_min),
            ("burst.max_age_max", self.max_age_max),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if !self.emission_offset.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "burst.emission_offset",
            });
        }
        for (field, value) in [
            ("burst.duration", self.duration),
            ("burst.max_age_min", self.max_age_min),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.drag) {
            return Err(ConfigError::OutOfRange {
                field: "burst.drag",
                value: self.drag,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

/// One short-lived burst particle.
///
/// `age` is the remaining-life fraction: 1 at emission, falling to 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
    pub max_age: f32,
    pub size: f32,
}

/// Packed per-instance data for drawing burst particles.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct BurstInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub alpha: f32,
}

/// Event-driven burst state machine: `Idle -> Active -> Idle`.
///
/// A burst starts on a trigger while idle, runs for `duration` seconds and
/// then clears itself. Triggers arriving while a burst is active are dropped;
/// there is no queue and no way to cancel a running burst.
#[derive(Clone, Debug)]
pub struct BurstController {
    config: BurstConfig,
    active: bool,
    start_time: f64,
    elapsed: f32,
    kind: BurstKind,
    particles: Vec<BurstParticle>,
}

impl BurstController {
    pub fn new(config: BurstConfig) -> Self {
        let capacity = config.particle_count;
        Self {
            config,
            active: false,
            start_time: 0.0,
            elapsed: 0.0,
            kind: BurstKind::None,
            particles: Vec::with_capacity(capacity),
        }
    }

    /// Start a burst of `kind` at `time`, emitted from `origin`.
    ///
    /// Returns `false` when the trigger is ignored (already active, or no kind).
    pub fn trigger<R: Rng + ?Sized>(
        &mut self,
        kind: BurstKind,
        time: f64,
        origin: Vec3,
        rng: &mut R,
    ) -> bool {
        if kind == BurstKind::None {
            return false;
        }
        if self.active {
            log::debug!(
                "[burst] {:?} trigger ignored; {:?} burst still active",
                kind,
                self.kind
            );
            return false;
        }
        self.active = true;
        self.start_time = time;
        self.elapsed = 0.0;
        self.kind = kind;
        self.particles.clear();
        let n = self.config.particle_count;
        for i in 0..n {
            let angle = i as f32 / n as f32 * TAU;
            let elevation = (rng.gen::<f32>() * 2.0 - 1.0) * self.config.elevation_max;
            let speed = lerp(self.config.speed_min, self.config.speed_max, rng.gen());
            let dir = Vec3::new(
                angle.cos() * elevation.cos(),
                elevation.sin(),
                angle.sin() * elevation.cos(),
            );
            self.particles.push(BurstParticle {
                position: origin,
                velocity: dir * speed,
                age: 1.0,
                max_age: lerp(self.config.max_age_min, self.config.max_age_max, rng.gen()),
                size: lerp(self.config.size_min, self.config.size_max, rng.gen()),
            });
        }
        log::info!("[burst] {:?} burst started with {} particles", kind, n);
        true
    }

    /// Advance the active burst to `time`, retiring it once its duration is up.
    pub fn tick(&mut self, time: f64, delta: f32) {
        if !self.active {
            return;
        }
        let elapsed = (time - self.start_time).max(0.0) as f32;
        if elapsed >= self.config.duration {
            log::info!("[burst] {:?} burst finished", self.kind);
            self.reset();
            return;
        }
        self.elapsed = elapsed;
        let dt = clamp_delta(delta);
        let gravity = self.config.gravity;
        let drag = self.config.drag;
        for p in &mut self.particles {
            p.velocity.y -= dt * gravity;
            p.velocity *= drag;
            p.position += p.velocity * dt;
            p.age = (p.age - dt / p.max_age).max(0.0);
        }
    }

    fn reset(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
        self.kind = BurstKind::None;
        self.particles.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn kind(&self) -> BurstKind {
        self.kind
    }

    /// Seconds since the active burst started; 0 while idle.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// `1 - elapsed / duration` while active, 0 while idle.
    pub fn intensity(&self) -> f32 {
        if !self.active {
            return 0.0;
        }
        (1.0 - self.elapsed / self.config.duration).max(0.0)
    }

    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }

    pub fn config(&self) -> &BurstConfig {
        &self.config
    }

    /// Append draw instances for the live particles to `out`.
    pub fn write_instances(&self, out: &mut Vec<BurstInstance>) {
        let intensity = self.intensity();
        out.extend(self.particles.iter().map(|p| BurstInstance {
            position: p.position.to_array(),
            size: p.size,
            alpha: p.age * intensity,
        }));
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
