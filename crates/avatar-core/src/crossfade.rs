use crate::constants::{CROSSFADE_START, TRANSITION_SPEED};
use crate::error::{ConfigError, Result};
use crate::state::clamp_delta;

/// Opaque handle for a texture owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Outcome of an asynchronous texture load, routed in as a scene event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureEvent {
    Loaded(TextureId),
    Failed,
}

/// What drives transition progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrossfadeMode {
    /// Progress advances with frame time
    TimeCoupled,
    /// Progress follows the back part of the card spin
    SpinCoupled,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrossfadeConfig {
    /// Spin progress at which a spin-coupled swap starts to show
    pub crossfade_start: f32,
    /// Time-coupled progress per second
    pub transition_speed: f32,
}

impl Default for CrossfadeConfig {
    fn default() -> Self {
        Self {
            crossfade_start: CROSSFADE_START,
            transition_speed: TRANSITION_SPEED,
        }
    }
}

impl CrossfadeConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.crossfade_start.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "crossfade.crossfade_start",
            });
        }
        if !(0.0..1.0).contains(&self.crossfade_start) {
            return Err(ConfigError::OutOfRange {
                field: "crossfade.crossfade_start",
                value: self.crossfade_start,
                min: 0.0,
                max: 1.0,
            });
        }
        if !self.transition_speed.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "crossfade.transition_speed",
            });
        }
        if self.transition_speed <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "crossfade.transition_speed",
                value: self.transition_speed,
            });
        }
        Ok(())
    }
}

/// Read-only view of the card spin the crossfade may couple to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpinSnapshot {
    pub spinning: bool,
    pub progress: f32,
}

/// Two-slot texture blend: `Stable -> Transitioning -> Stable`.
///
/// Opacities always sum to one: `current = 1 - progress`, `next = progress`.
/// A transition requested mid-spin follows the spin and is not finalized
/// until the spin has finished, even if its own progress is already full.
#[derive(Clone, Debug)]
pub struct CrossfadeController {
    config: CrossfadeConfig,
    current: Option<TextureId>,
    next: Option<TextureId>,
    transitioning: bool,
    progress: f32,
    mode: CrossfadeMode,
}

impl CrossfadeController {
    pub fn new(config: CrossfadeConfig) -> Self {
        Self {
            config,
            current: None,
            next: None,
            transitioning: false,
            progress: 0.0,
            mode: CrossfadeMode::TimeCoupled,
        }
    }

    /// Route a texture load outcome into the blend.
    ///
    /// Returns `true` when a transition starts or restarts.
    pub fn on_texture(&mut self, event: TextureEvent, spin: SpinSnapshot) -> bool {
        let id = match event {
            TextureEvent::Loaded(id) => id,
            TextureEvent::Failed => {
                log::warn!("[crossfade] texture failed to load; keeping current state");
                return false;
            }
        };
        let Some(current) = self.current else {
            log::info!("[crossfade] first texture {:?} shown directly", id);
            self.current = Some(id);
            return false;
        };
        if !self.transitioning && current == id {
            log::debug!("[crossfade] texture {:?} already shown", id);
            return false;
        }
        if self.transitioning {
            log::debug!(
                "[crossfade] replacing pending {:?} with {:?}",
                self.next,
                id
            );
        }
        self.next = Some(id);
        self.transitioning = true;
        self.progress = 0.0;
        self.mode = if spin.spinning {
            CrossfadeMode::SpinCoupled
        } else {
            CrossfadeMode::TimeCoupled
        };
        log::info!("[crossfade] transition to {:?} ({:?})", id, self.mode);
        true
    }

    /// Advance the transition; `spin` is the card state after this frame's spin step.
    pub fn tick(&mut self, delta: f32, spin: SpinSnapshot) {
        if !self.transitioning {
            return;
        }
        match self.mode {
            CrossfadeMode::TimeCoupled => {
                self.progress = (self.progress + clamp_delta(delta) * self.config.transition_speed)
                    .min(1.0);
            }
            CrossfadeMode::SpinCoupled => {
                self.progress = if spin.spinning {
                    let start = self.config.crossfade_start;
                    ((spin.progress - start) / (1.0 - start)).clamp(0.0, 1.0)
                } else {
                    1.0
                };
            }
        }
        let gated = self.mode == CrossfadeMode::SpinCoupled && spin.spinning;
        if self.progress >= 1.0 && !gated {
            self.finish();
        }
    }

    fn finish(&mut self) {
        if let Some(next) = self.next.take() {
            self.current = Some(next);
        }
        self.transitioning = false;
        self.progress = 0.0;
        log::info!("[crossfade] now showing {:?}", self.current);
    }

    pub fn current(&self) -> Option<TextureId> {
        self.current
    }

    pub fn next(&self) -> Option<TextureId> {
        self.next
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// False until the first texture arrives; the renderer shows its placeholder.
    pub fn has_texture(&self) -> bool {
        self.current.is_some()
    }

    pub fn progress(&self) -> f32 {
        if self.transitioning {
            self.progress
        } else {
            0.0
        }
    }

    pub fn mode(&self) -> CrossfadeMode {
        self.mode
    }

    pub fn current_opacity(&self) -> f32 {
        1.0 - self.progress()
    }

    pub fn next_opacity(&self) -> f32 {
        self.progress()
    }
}
