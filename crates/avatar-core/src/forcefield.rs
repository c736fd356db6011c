use crate::constants::{
    DISPLACEMENT_NOISE_FLOOR, DISPLACEMENT_NOISE_SCALE, FORCEFIELD_EPSILON, FORCEFIELD_RADIUS,
    FORCEFIELD_STRENGTH,
};
use crate::error::{ConfigError, Result};
use crate::noise::noise_towards;
use glam::Vec3;

/// Host-facing forcefield tuning; the source position arrives per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcefieldConfig {
    pub radius: f32,
    pub base_strength: f32,
}

impl Default for ForcefieldConfig {
    fn default() -> Self {
        Self {
            radius: FORCEFIELD_RADIUS,
            base_strength: FORCEFIELD_STRENGTH,
        }
    }
}

impl ForcefieldConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "forcefield.radius",
            });
        }
        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "forcefield.radius",
                value: self.radius,
            });
        }
        if !self.base_strength.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "forcefield.base_strength",
            });
        }
        Ok(())
    }

    /// Place the field at `source`, scaling the base strength by `strength_scale`.
    #[inline]
    pub fn at(&self, source: Vec3, strength_scale: f32) -> ForcefieldState {
        ForcefieldState {
            source,
            radius: self.radius,
            strength: self.base_strength * strength_scale,
        }
    }
}

/// A localized push around the pointer, in the swarm's local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcefieldState {
    pub source: Vec3,
    pub radius: f32,
    pub strength: f32,
}

/// Push `base` away from the field source.
///
/// Falloff is quadratic: full strength at the source, zero at the radius. A
/// noise factor in \[0.3, 1.0\] varies the push per point so that no particle
/// inside the field is left completely still. Points outside the radius, or
/// too close to the source to have a direction, come back unchanged.
pub fn displace(base: Vec3, field: &ForcefieldState, time: f32) -> Vec3 {
    if !(field.radius.is_finite() && field.radius > 0.0) {
        return base;
    }
    let d = base - field.source;
    let dist = d.length();
    if dist >= field.radius || dist < FORCEFIELD_EPSILON {
        return base;
    }
    let falloff = 1.0 - dist / field.radius;
    let force = falloff * falloff;
    let random_factor =
        noise_towards(base, field.source, time) * DISPLACEMENT_NOISE_SCALE + DISPLACEMENT_NOISE_FLOOR;
    let displacement = field.strength * force * random_factor;
    base + (d / dist) * displacement
}
