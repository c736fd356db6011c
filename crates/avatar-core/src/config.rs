use crate::burst::BurstConfig;
use crate::card::CardConfig;
use crate::constants::{FORCEFIELD_GENERATION_BOOST, GENERATION_RAMP_PER_SEC};
use crate::crossfade::CrossfadeConfig;
use crate::error::{ConfigError, Result};
use crate::forcefield::ForcefieldConfig;
use crate::swarm::SwarmConfig;

/// Complete scene tuning, built from the crate constants by default.
///
/// Hosts override individual fields with struct update syntax:
///
/// ```
/// use avatar_core::{BurstConfig, SceneConfig};
///
/// let config = SceneConfig {
///     burst: BurstConfig {
///         duration: 2.0,
///         ..BurstConfig::default()
///     },
///     ..SceneConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneConfig {
    pub swarm: SwarmConfig,
    pub forcefield: ForcefieldConfig,
    pub burst: BurstConfig,
    pub card: CardConfig,
    pub crossfade: CrossfadeConfig,
    pub generation: GenerationConfig,
}

/// How the "generating" glow follows the generation flag.
///
/// - `ramp_per_sec`: exponential approach rate toward 0 or 1
/// - `forcefield_boost`: extra forcefield strength at full intensity
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
    pub ramp_per_sec: f32,
    pub forcefield_boost: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            ramp_per_sec: GENERATION_RAMP_PER_SEC,
            forcefield_boost: FORCEFIELD_GENERATION_BOOST,
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.ramp_per_sec.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "generation.ramp_per_sec",
            });
        }
        if self.ramp_per_sec <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "generation.ramp_per_sec",
                value: self.ramp_per_sec,
            });
        }
        if !self.forcefield_boost.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "generation.forcefield_boost",
            });
        }
        Ok(())
    }
}

impl SceneConfig {
    /// Check every section; the first problem found is reported.
    pub fn validate(&self) -> Result<()> {
        self.swarm.validate()?;
        self.forcefield.validate()?;
        self.burst.validate()?;
        self.card.validate()?;
        self.crossfade.validate()?;
        self.generation.validate()?;
        Ok(())
    }
}
