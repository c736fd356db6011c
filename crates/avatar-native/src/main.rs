use anyhow::Context;
use glam::Vec3;

use avatar_core::{
    AvatarScene, BurstKind, FrameInput, FrameSink, FrameView, SceneConfig, SceneEvent,
    TextureEvent, TextureId, SWARM_DEFAULT_PARTICLES,
};

const DEFAULT_SEED: u64 = 42;
const SESSION_SECONDS: f64 = 12.0;
const FRAMES_PER_SECOND: u32 = 60;
const SUMMARY_EVERY_FRAMES: u64 = 60;

// Pointer sweep in swarm-local space
const SWEEP_RADIUS: f32 = 1.8;
const SWEEP_SPEED: f32 = 0.8;
const POINTER_ABSENT: (f64, f64) = (10.0, 11.0);

/// A scripted input at a point in session time.
struct Cue {
    at: f64,
    event: SceneEvent,
}

const fn transaction(at: f64, kind: BurstKind, is_active: bool) -> Cue {
    Cue {
        at,
        event: SceneEvent::Transaction { kind, is_active },
    }
}

const fn generation(at: f64, is_generating: bool) -> Cue {
    Cue {
        at,
        event: SceneEvent::Generation { is_generating },
    }
}

const fn texture(at: f64, event: TextureEvent) -> Cue {
    Cue {
        at,
        event: SceneEvent::Texture(event),
    }
}

// Sorted by time. The sell at 2.0 lands while the buy burst is still running.
const SCRIPT: &[Cue] = &[
    texture(0.2, TextureEvent::Loaded(TextureId(1))),
    transaction(1.0, BurstKind::Buy, true),
    transaction(1.3, BurstKind::Buy, false),
    transaction(2.0, BurstKind::Sell, true),
    transaction(2.2, BurstKind::Sell, false),
    transaction(3.0, BurstKind::Sell, true),
    transaction(3.2, BurstKind::Sell, false),
    generation(4.0, true),
    texture(4.2, TextureEvent::Loaded(TextureId(2))),
    generation(7.0, false),
    texture(8.0, TextureEvent::Loaded(TextureId(3))),
    texture(9.0, TextureEvent::Failed),
];

/// Logs what a renderer would receive.
#[derive(Default)]
struct LogSink {
    frames: u64,
    last_burst: Option<BurstKind>,
    last_texture: Option<TextureId>,
}

impl FrameSink for LogSink {
    fn submit(&mut self, view: &FrameView<'_>) {
        self.frames += 1;
        if self.last_burst != Some(view.burst_kind) {
            log::info!(
                "[sink] burst {:?}: {} particles, tint {:?}",
                view.burst_kind,
                view.burst_particles.len(),
                view.burst_kind.tint()
            );
            self.last_burst = Some(view.burst_kind);
        }
        if self.last_texture != view.current_texture {
            log::info!("[sink] showing texture {:?}", view.current_texture);
            self.last_texture = view.current_texture;
        }
        if self.frames % SUMMARY_EVERY_FRAMES == 0 {
            let u = view.uniforms;
            log::info!(
                "[sink] t={:.2} particles={} burst={:.2} gen={:.2} rotY={:.2} fade={:.2}/{:.2} next={:?}",
                u.time,
                view.particles.len(),
                view.burst_intensity,
                u.generation_intensity,
                view.card.rotation.y,
                u.current_opacity,
                u.next_opacity,
                view.next_texture
            );
        }
    }
}

fn pointer_at(t: f64) -> Option<Vec3> {
    if (POINTER_ABSENT.0..POINTER_ABSENT.1).contains(&t) {
        return None;
    }
    let a = t as f32 * SWEEP_SPEED;
    Some(Vec3::new(a.cos() * SWEEP_RADIUS, a.sin() * SWEEP_RADIUS, 0.0))
}

fn parse_seed() -> anyhow::Result<u64> {
    match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("seed must be an unsigned integer, got {arg:?}")),
        None => Ok(DEFAULT_SEED),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let seed = parse_seed()?;
    let mut scene =
        AvatarScene::with_atmosphere(SceneConfig::default(), SWARM_DEFAULT_PARTICLES, seed)
            .context("building scene")?;
    log::info!("[native] session seed={seed} for {SESSION_SECONDS}s");

    let mut sink = LogSink::default();
    let dt = 1.0 / FRAMES_PER_SECOND as f32;
    let total_frames = (SESSION_SECONDS * FRAMES_PER_SECOND as f64) as u64;
    let mut cues = SCRIPT.iter().peekable();
    let mut respawned = 0usize;
    let mut skipped = 0usize;

    for frame in 0..total_frames {
        let t = frame as f64 / FRAMES_PER_SECOND as f64;
        let mut input = FrameInput::new(t, dt);
        input.interaction_point = pointer_at(t);
        while let Some(cue) = cues.next_if(|c| c.at <= t) {
            input.events.push(cue.event);
        }
        let stats = scene.frame(&input);
        if stats.burst_started {
            log::info!("[native] burst at t={t:.2}");
        }
        if stats.spin_started {
            log::info!("[native] spin at t={t:.2}");
        }
        respawned += stats.swarm.respawned;
        skipped += stats.swarm.skipped;
        scene.render(&mut sink);
    }

    log::info!(
        "[native] done: {} frames, {} respawns, {} skipped, texture {:?}",
        scene.frame_count(),
        respawned,
        skipped,
        scene.crossfade().current()
    );
    Ok(())
}
