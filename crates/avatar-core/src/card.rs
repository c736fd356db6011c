use crate::constants::*;
use crate::error::{ConfigError, Result};
use crate::state::clamp_delta;
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::{PI, TAU};

/// Static tuning for the card's idle float and spin.
#[derive(Clone, Debug, PartialEq)]
pub struct CardConfig {
    pub position: Vec3,
    pub scale: f32,
    pub spin_speed: f32,
    pub float_amplitude: f32,
    pub float_frequency: f32,
    pub tilt_amplitude: f32,
    pub sway_amplitude: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            position: card_position_vec3(),
            scale: CARD_SCALE,
            spin_speed: SPIN_SPEED,
            float_amplitude: FLOAT_AMPLITUDE,
            float_frequency: FLOAT_FREQUENCY,
            tilt_amplitude: TILT_AMPLITUDE,
            sway_amplitude: SWAY_AMPLITUDE,
        }
    }
}

impl CardConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "card.position",
            });
        }
        for (field, value) in [
            ("card.scale", self.scale),
            ("card.spin_speed", self.spin_speed),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("card.float_amplitude", self.float_amplitude),
            ("card.float_frequency", self.float_frequency),
            ("card.tilt_amplitude", self.tilt_amplitude),
            ("card.sway_amplitude", self.sway_amplitude),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        Ok(())
    }
}

/// Rotation state of the card.
///
/// `base_rotation_y` only changes when a spin completes and always stays in
/// `(-PI, PI]`. `spin_progress` stays at 1 after a spin until the next starts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardState {
    pub base_rotation_y: f32,
    pub spinning: bool,
    pub spin_progress: f32,
    pub spin_start_rotation: f32,
}

/// The card's world transform for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    pub position: Vec3,
    /// Euler angles (XYZ order), radians
    pub rotation: Vec3,
    pub scale: f32,
}

impl CardTransform {
    pub fn model_matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), q, self.position)
    }
}

/// Drives the card between an idle float and a full 360° spin.
///
/// A spin is started by a generation signal and always runs to completion;
/// nothing aborts it. That gives a pending texture swap a fixed point to wait
/// for. While spinning, the idle bob, tilt and sway are suppressed.
#[derive(Clone, Debug)]
pub struct CardController {
    config: CardConfig,
    state: CardState,
    transform: CardTransform,
}

impl CardController {
    pub fn new(config: CardConfig) -> Self {
        let transform = CardTransform {
            position: config.position,
            rotation: Vec3::ZERO,
            scale: config.scale,
        };
        Self {
            config,
            state: CardState::default(),
            transform,
        }
    }

    /// Begin a spin from the current base rotation.
    ///
    /// Returns `false` if a spin is already running; the running spin is kept.
    pub fn start_spin(&mut self) -> bool {
        if self.state.spinning {
            log::debug!("[card] spin already running; start ignored");
            return false;
        }
        self.state.spinning = true;
        self.state.spin_progress = 0.0;
        self.state.spin_start_rotation = self.state.base_rotation_y;
        log::info!(
            "[card] spin started from {:.3} rad",
            self.state.spin_start_rotation
        );
        true
    }

    /// Advance spin progress and recompute the transform for `time`.
    pub fn tick(&mut self, time: f64, delta: f32) {
        let dt = clamp_delta(delta);
        let t = time as f32;
        if self.state.spinning {
            let p = (self.state.spin_progress + dt * self.config.spin_speed).min(1.0);
            self.state.spin_progress = p;
            if p >= 1.0 {
                self.finish_spin();
            } else {
                self.transform.position = self.config.position;
                self.transform.rotation = Vec3::new(
                    0.0,
                    self.state.spin_start_rotation + TAU * smoothstep(p),
                    0.0,
                );
                return;
            }
        }
        self.apply_idle_float(t);
    }

    fn finish_spin(&mut self) {
        self.state.spinning = false;
        self.state.spin_progress = 1.0;
        self.state.base_rotation_y =
            normalize_angle((self.state.spin_start_rotation + TAU).rem_euclid(TAU));
        log::info!(
            "[card] spin finished at {:.3} rad",
            self.state.base_rotation_y
        );
    }

    fn apply_idle_float(&mut self, t: f32) {
        let c = &self.config;
        let phase = t * c.float_frequency;
        self.transform.position = c.position + Vec3::Y * (c.float_amplitude * phase.sin());
        self.transform.rotation = Vec3::new(
            c.tilt_amplitude * (phase * 0.7).sin(),
            self.state.base_rotation_y + c.sway_amplitude * (phase * 0.5).sin(),
            0.0,
        );
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state.spinning
    }

    pub fn spin_progress(&self) -> f32 {
        self.state.spin_progress
    }

    pub fn transform(&self) -> &CardTransform {
        &self.transform
    }

    /// The card's resting position, ignoring the idle bob.
    pub fn anchor(&self) -> Vec3 {
        self.config.position
    }
}

/// `p^2 (3 - 2p)` for `p` in \[0, 1\].
#[inline]
pub fn smoothstep(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

/// Wrap an angle into `(-PI, PI]`.
pub fn normalize_angle(a: f32) -> f32 {
    let r = a.rem_euclid(TAU);
    if r > PI {
        r - TAU
    } else {
        r
    }
}
