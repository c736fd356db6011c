use crate::burst::{BurstController, BurstInstance, BurstKind, BurstParticle};
use crate::card::{CardController, CardTransform};
use crate::config::SceneConfig;
use crate::constants::{SWARM_SHELL_INNER_RADIUS, SWARM_SHELL_OUTER_RADIUS};
use crate::crossfade::{CrossfadeController, SpinSnapshot, TextureEvent, TextureId};
use crate::error::Result;
use crate::forcefield::ForcefieldConfig;
use crate::geometry::atmosphere_shell;
use crate::state::clamp_delta;
use crate::swarm::{Particle, Swarm, SwarmTickStats};
use crate::uniforms::SceneUniforms;
use glam::{Mat4, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;

/// Something that happened between two frames.
///
/// Transaction and generation carry level flags; the scene turns them into
/// triggers on their rising edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    /// One edge detector serves every kind: switching from `Buy` to `Sell`
    /// while `is_active` stays high is not a new edge and starts nothing.
    /// A `None` kind counts as inactive.
    Transaction { kind: BurstKind, is_active: bool },
    Generation { is_generating: bool },
    Texture(TextureEvent),
}

/// Everything one frame consumes.
///
/// Fields:
/// - `time`: global clock in seconds (host-defined origin)
/// - `delta`: seconds since the previous frame; clamped internally
/// - `interaction_point`: pointer in the swarm's local space, if any
/// - `forcefield`: radius and base strength for this frame
/// - `events`: pending events, applied in order
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub time: f64,
    pub delta: f32,
    pub interaction_point: Option<Vec3>,
    pub forcefield: ForcefieldConfig,
    pub events: SmallVec<[SceneEvent; 4]>,
}

impl FrameInput {
    pub fn new(time: f64, delta: f32) -> Self {
        Self {
            time,
            delta,
            ..Self::default()
        }
    }

    pub fn with_pointer(mut self, point: Vec3) -> Self {
        self.interaction_point = Some(point);
        self
    }

    pub fn with_forcefield(mut self, forcefield: ForcefieldConfig) -> Self {
        self.forcefield = forcefield;
        self
    }

    pub fn with_event(mut self, event: SceneEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Fires once when a level flag goes from false to true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    previous: bool,
}

impl EdgeDetector {
    /// Record `current` and report whether it is a rising edge.
    #[inline]
    pub fn rising(&mut self, current: bool) -> bool {
        let fired = current && !self.previous;
        self.previous = current;
        fired
    }

    #[inline]
    pub fn level(&self) -> bool {
        self.previous
    }
}

/// What happened during one call to [`AvatarScene::frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub swarm: SwarmTickStats,
    pub burst_started: bool,
    pub spin_started: bool,
    pub crossfade_started: bool,
    /// The frame was dropped because its time was not finite
    pub dropped: bool,
}

/// Borrowed outputs of the latest frame, handed to a [`FrameSink`].
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub seeds: &'a [Vec3],
    pub particles: &'a [Particle],
    pub swarm_matrix: Mat4,
    pub burst_particles: &'a [BurstParticle],
    pub burst_kind: BurstKind,
    pub burst_intensity: f32,
    pub card: &'a CardTransform,
    pub uniforms: &'a SceneUniforms,
    pub current_texture: Option<TextureId>,
    pub next_texture: Option<TextureId>,
}

/// The rendering side: consumes buffers and uniforms, otherwise opaque.
pub trait FrameSink {
    fn submit(&mut self, view: &FrameView<'_>);
}

/// Owns every state machine of the avatar card and steps them once per frame.
///
/// Order within a frame is fixed: events, generation glow, swarm respawns
/// (with forcefield displacement), burst physics, card spin, crossfade, and
/// finally the uniforms table.
///
/// Typical usage:
/// - Construct with `AvatarScene::new(config, &points, seed)` or
///   `AvatarScene::with_atmosphere(config, count, seed)`
/// - Call `frame(&input)` from the render loop
/// - Hand `view()` to the renderer, or call `render(&mut sink)`
pub struct AvatarScene {
    config: SceneConfig,
    swarm: Swarm,
    burst: BurstController,
    card: CardController,
    crossfade: CrossfadeController,
    rng: StdRng,
    transaction_edge: EdgeDetector,
    generation_edge: EdgeDetector,
    generation_intensity: f32,
    time: f64,
    frame_count: u64,
    uniforms: SceneUniforms,
}

impl AvatarScene {
    /// Build a scene whose swarm is seeded from `geometry`.
    pub fn new(config: SceneConfig, geometry: &[Vec3], seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let swarm = Swarm::from_geometry(geometry, &config.swarm, &mut rng)?;
        log::info!("[scene] swarm ready with {} particles", swarm.len());
        let mut scene = Self {
            burst: BurstController::new(config.burst.clone()),
            card: CardController::new(config.card.clone()),
            crossfade: CrossfadeController::new(config.crossfade.clone()),
            config,
            swarm,
            rng,
            transaction_edge: EdgeDetector::default(),
            generation_edge: EdgeDetector::default(),
            generation_intensity: 0.0,
            time: 0.0,
            frame_count: 0,
            uniforms: SceneUniforms::default(),
        };
        scene.publish_uniforms();
        Ok(scene)
    }

    /// Build a scene around an atmospheric shell of `count` points.
    pub fn with_atmosphere(config: SceneConfig, count: usize, seed: u64) -> Result<Self> {
        // separate stream so geometry does not shift the swarm's own randomness
        let mut geo_rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
        let points = atmosphere_shell(
            count,
            SWARM_SHELL_INNER_RADIUS,
            SWARM_SHELL_OUTER_RADIUS,
            &mut geo_rng,
        );
        Self::new(config, &points, seed)
    }

    /// Step the whole scene once.
    pub fn frame(&mut self, input: &FrameInput) -> FrameStats {
        let mut stats = FrameStats::default();
        if !input.time.is_finite() {
            log::warn!("[scene] non-finite frame time; frame dropped");
            stats.dropped = true;
            return stats;
        }
        self.time = input.time;
        self.frame_count += 1;
        let dt = clamp_delta(input.delta);

        for event in &input.events {
            match *event {
                SceneEvent::Transaction { kind, is_active } => {
                    let level = is_active && kind != BurstKind::None;
                    if self.transaction_edge.rising(level) {
                        let origin = self.card.anchor() + self.config.burst.emission_offset;
                        stats.burst_started |=
                            self.burst.trigger(kind, self.time, origin, &mut self.rng);
                    }
                }
                SceneEvent::Generation { is_generating } => {
                    if self.generation_edge.rising(is_generating) {
                        stats.spin_started |= self.card.start_spin();
                    }
                }
                SceneEvent::Texture(tex) => {
                    let spin = self.spin_snapshot();
                    stats.crossfade_started |= self.crossfade.on_texture(tex, spin);
                }
            }
        }

        let target = if self.generation_edge.level() { 1.0 } else { 0.0 };
        let alpha = 1.0 - (-dt * self.config.generation.ramp_per_sec).exp();
        self.generation_intensity += (target - self.generation_intensity) * alpha;

        let boost = 1.0 + self.config.generation.forcefield_boost * self.generation_intensity;
        let field = input
            .interaction_point
            .filter(|p| p.is_finite())
            .map(|p| input.forcefield.at(p, boost));
        stats.swarm = self.swarm.tick(self.time, dt, field.as_ref());

        // no time has passed yet for anything started by this frame's events
        let since = |started: bool| if started { 0.0 } else { dt };
        self.burst.tick(self.time, since(stats.burst_started));
        self.card.tick(self.time, since(stats.spin_started));
        let spin = self.spin_snapshot();
        self.crossfade.tick(since(stats.crossfade_started), spin);
        self.publish_uniforms();
        stats
    }

    fn spin_snapshot(&self) -> SpinSnapshot {
        SpinSnapshot {
            spinning: self.card.is_spinning(),
            progress: self.card.spin_progress(),
        }
    }

    fn publish_uniforms(&mut self) {
        self.uniforms = SceneUniforms {
            time: self.time as f32,
            transaction_kind: self.burst.kind().as_uniform(),
            transaction_intensity: self.burst.intensity(),
            card_position: self.card.transform().position,
            is_generating: if self.generation_edge.level() { 1.0 } else { 0.0 },
            generation_intensity: self.generation_intensity,
            burst_time: self.burst.elapsed(),
            burst_active: if self.burst.is_active() { 1.0 } else { 0.0 },
            current_opacity: self.crossfade.current_opacity(),
            next_opacity: self.crossfade.next_opacity(),
        };
    }

    /// The swarm follows the card's resting position but not its spin.
    pub fn swarm_model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.card.anchor())
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            seeds: self.swarm.seeds(),
            particles: self.swarm.particles(),
            swarm_matrix: self.swarm_model_matrix(),
            burst_particles: self.burst.particles(),
            burst_kind: self.burst.kind(),
            burst_intensity: self.burst.intensity(),
            card: self.card.transform(),
            uniforms: &self.uniforms,
            current_texture: self.crossfade.current(),
            next_texture: self.crossfade.next(),
        }
    }

    pub fn render<S: FrameSink + ?Sized>(&self, sink: &mut S) {
        sink.submit(&self.view());
    }

    /// Draw instances for the active burst, replacing the contents of `out`.
    pub fn burst_instances(&self, out: &mut Vec<BurstInstance>) {
        out.clear();
        self.burst.write_instances(out);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn burst(&self) -> &BurstController {
        &self.burst
    }

    pub fn card(&self) -> &CardController {
        &self.card
    }

    pub fn crossfade(&self) -> &CrossfadeController {
        &self.crossfade
    }

    pub fn uniforms(&self) -> &SceneUniforms {
        &self.uniforms
    }

    pub fn generation_intensity(&self) -> f32 {
        self.generation_intensity
    }

    pub fn is_generating(&self) -> bool {
        self.generation_edge.level()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
