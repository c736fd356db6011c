#![cfg(target_arch = "wasm32")]
use avatar_core::{
    AvatarScene, BurstInstance, BurstKind, Camera, ForcefieldConfig, FrameInput, SceneConfig,
    SceneEvent, TextureEvent, TextureId, SWARM_DEFAULT_PARTICLES,
};
use anyhow::Context;
use glam::Vec2;
use instant::Instant;
use js_sys::Float32Array;
use smallvec::SmallVec;
use wasm_bindgen::prelude::*;

mod input;

use input::PointerState;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("avatar-web starting");
    Ok(())
}

/// The avatar card scene, driven from JavaScript once per animation frame.
///
/// Inputs set between frames are queued and drained on the next `frame`.
#[wasm_bindgen]
pub struct WebScene {
    scene: AvatarScene,
    pending: SmallVec<[SceneEvent; 4]>,
    pointer: PointerState,
    forcefield: ForcefieldConfig,
    started: Instant,
    last_tick: Option<f64>,
    burst_scratch: Vec<BurstInstance>,
}

#[wasm_bindgen]
impl WebScene {
    /// Scene around an atmospheric shell. Without a seed one is drawn from
    /// the browser's entropy source.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u32>, particle_count: Option<u32>) -> Result<WebScene, JsValue> {
        let count = particle_count.map_or(SWARM_DEFAULT_PARTICLES, |c| c as usize);
        let seed = resolve_seed(seed);
        let scene = AvatarScene::with_atmosphere(SceneConfig::default(), count, seed)
            .context("building atmosphere scene")
            .map_err(to_js)?;
        Ok(Self::wrap(scene))
    }

    /// Scene seeded from host geometry given as packed `xyz` floats.
    pub fn with_geometry(xyz: &Float32Array, seed: Option<u32>) -> Result<WebScene, JsValue> {
        let flat = xyz.to_vec();
        if flat.len() % 3 != 0 {
            log::warn!(
                "[web] geometry length {} is not a multiple of 3; trailing values ignored",
                flat.len()
            );
        }
        let points = avatar_core::points_from_flat(&flat);
        let scene = AvatarScene::new(SceneConfig::default(), &points, resolve_seed(seed))
            .context("building scene from geometry")
            .map_err(to_js)?;
        Ok(Self::wrap(scene))
    }

    // ---------------- Inputs ----------------

    pub fn set_pointer_ndc(&mut self, x: f32, y: f32, aspect: f32) {
        self.pointer = PointerState {
            ndc: Vec2::new(x, y),
            aspect,
            inside: true,
        };
    }

    pub fn clear_pointer(&mut self) {
        self.pointer.inside = false;
    }

    /// Invalid values are rejected and the previous field is kept.
    pub fn set_forcefield(&mut self, radius: f32, strength: f32) {
        let next = ForcefieldConfig {
            radius,
            base_strength: strength,
        };
        match next.validate() {
            Ok(()) => self.forcefield = next,
            Err(e) => log::warn!("[web] forcefield rejected: {e}"),
        }
    }

    /// `kind`: 0 none, 1 buy, 2 sell.
    pub fn set_transaction(&mut self, kind: u8, active: bool) {
        self.pending.push(SceneEvent::Transaction {
            kind: BurstKind::from_tag(kind),
            is_active: active,
        });
    }

    pub fn set_generating(&mut self, generating: bool) {
        self.pending.push(SceneEvent::Generation {
            is_generating: generating,
        });
    }

    pub fn texture_loaded(&mut self, id: u32) {
        self.pending
            .push(SceneEvent::Texture(TextureEvent::Loaded(TextureId(id))));
    }

    pub fn texture_failed(&mut self) {
        self.pending.push(SceneEvent::Texture(TextureEvent::Failed));
    }

    // ---------------- Stepping ----------------

    /// Step with host-supplied time and delta (seconds).
    pub fn frame(&mut self, time: f64, delta: f32) {
        let pointer = if self.pointer.inside {
            let camera = Camera::facing_card(self.pointer.aspect);
            input::pointer_local(&camera, self.pointer.ndc, self.scene.card().anchor())
        } else {
            None
        };
        let input = FrameInput {
            time,
            delta,
            interaction_point: pointer,
            forcefield: self.forcefield,
            events: std::mem::take(&mut self.pending),
        };
        let stats = self.scene.frame(&input);
        if stats.dropped {
            log::warn!("[web] frame at t={time} dropped");
        }
    }

    /// Step using the scene's own clock.
    pub fn tick(&mut self) {
        let now = self.started.elapsed().as_secs_f64();
        let delta = self.last_tick.map_or(0.0, |last| (now - last) as f32);
        self.last_tick = Some(now);
        self.frame(now, delta);
    }

    // ---------------- Outputs ----------------

    /// Seed positions, packed `xyz`.
    pub fn positions(&self) -> Float32Array {
        Float32Array::from(self.scene.swarm().seed_floats())
    }

    pub fn velocities(&self) -> Float32Array {
        let flat: Vec<f32> = self
            .scene
            .swarm()
            .particles()
            .iter()
            .flat_map(|p| p.velocity.to_array())
            .collect();
        Float32Array::from(flat.as_slice())
    }

    pub fn phases(&self) -> Float32Array {
        let flat: Vec<f32> = self
            .scene
            .swarm()
            .particles()
            .iter()
            .map(|p| p.phase_offset)
            .collect();
        Float32Array::from(flat.as_slice())
    }

    /// Packed `x, y, z, size, alpha` per live burst particle.
    pub fn burst_instances(&mut self) -> Float32Array {
        self.scene.burst_instances(&mut self.burst_scratch);
        Float32Array::from(bytemuck::cast_slice::<BurstInstance, f32>(&self.burst_scratch))
    }

    /// The uniform table in its 16-byte-row GPU layout.
    pub fn uniforms(&self) -> Float32Array {
        let gpu = self.scene.uniforms().gpu();
        Float32Array::from(bytemuck::cast_slice::<_, f32>(std::slice::from_ref(&gpu)))
    }

    pub fn card_matrix(&self) -> Float32Array {
        let m = self.scene.card().transform().model_matrix();
        Float32Array::from(&m.to_cols_array()[..])
    }

    pub fn swarm_matrix(&self) -> Float32Array {
        Float32Array::from(&self.scene.swarm_model_matrix().to_cols_array()[..])
    }

    pub fn current_texture(&self) -> Option<u32> {
        self.scene.crossfade().current().map(|t| t.0)
    }

    pub fn next_texture(&self) -> Option<u32> {
        self.scene.crossfade().next().map(|t| t.0)
    }

    pub fn current_opacity(&self) -> f32 {
        self.scene.crossfade().current_opacity()
    }

    pub fn next_opacity(&self) -> f32 {
        self.scene.crossfade().next_opacity()
    }

    pub fn particle_count(&self) -> u32 {
        self.scene.swarm().len() as u32
    }
}

impl WebScene {
    fn wrap(scene: AvatarScene) -> WebScene {
        log::info!("[web] scene ready ({} particles)", scene.swarm().len());
        WebScene {
            forcefield: scene.config().forcefield,
            scene,
            pending: SmallVec::new(),
            pointer: PointerState::default(),
            started: Instant::now(),
            last_tick: None,
            burst_scratch: Vec::new(),
        }
    }
}

fn resolve_seed(seed: Option<u32>) -> u64 {
    if let Some(s) = seed {
        return s as u64;
    }
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(e) => {
            log::warn!("[web] entropy unavailable ({e}); using clock seed");
            js_sys::Date::now() as u64
        }
    }
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}
