use glam::Vec3;

// Shared simulation tuning constants used by the web and native frontends.

// Frame timing
pub const MAX_FRAME_DELTA: f32 = 0.1; // clamp for long frames; bounds the missed-respawn window

// Ambient swarm
pub const SWARM_LIFETIME: f32 = 4.0; // seconds between respawns of one particle
pub const SWARM_MAX_PARTICLES: usize = 6000;
pub const SWARM_DEFAULT_PARTICLES: usize = 4000;
pub const SWARM_DRIFT_SPEED: f32 = 0.12; // max drift speed (local units per second)
pub const SWARM_SHELL_INNER_RADIUS: f32 = 1.4; // atmosphere sits just outside the card
pub const SWARM_SHELL_OUTER_RADIUS: f32 = 2.6;

// Forcefield
pub const FORCEFIELD_RADIUS: f32 = 1.2;
pub const FORCEFIELD_STRENGTH: f32 = 0.35; // max push distance at the source
pub const FORCEFIELD_EPSILON: f32 = 1e-6; // below this distance the direction is undefined
pub const FORCEFIELD_GENERATION_BOOST: f32 = 0.8; // extra strength at full generation intensity

// Noise layer weights (sum to 1)
pub const NOISE_WEIGHT_SPATIAL: f32 = 0.4;
pub const NOISE_WEIGHT_TEMPORAL: f32 = 0.3;
pub const NOISE_WEIGHT_DETAIL: f32 = 0.2;
pub const NOISE_WEIGHT_DIRECTIONAL: f32 = 0.1;

// Displacement noise remap: factor = noise * SCALE + FLOOR, never fully zero
pub const DISPLACEMENT_NOISE_SCALE: f32 = 0.7;
pub const DISPLACEMENT_NOISE_FLOOR: f32 = 0.3;

// Transaction bursts
pub const BURST_PARTICLE_COUNT: usize = 50;
pub const BURST_DURATION: f32 = 1.5;
pub const BURST_GRAVITY: f32 = 2.0;
pub const BURST_DRAG: f32 = 0.98; // velocity multiplier per tick
pub const BURST_SPEED_MIN: f32 = 0.8;
pub const BURST_SPEED_MAX: f32 = 2.0;
pub const BURST_ELEVATION_MAX: f32 = 0.9; // radians above/below the horizontal sweep
pub const BURST_SIZE_MIN: f32 = 0.02;
pub const BURST_SIZE_MAX: f32 = 0.06;
pub const BURST_MAX_AGE_MIN: f32 = 0.8;
pub const BURST_MAX_AGE_MAX: f32 = 1.4;
pub const BURST_EMISSION_OFFSET: [f32; 3] = [0.0, 0.0, 0.15]; // just in front of the card face

// Burst tints
pub const BUY_TINT: [f32; 3] = [0.25, 0.95, 0.45]; // green-ish
pub const SELL_TINT: [f32; 3] = [0.95, 0.25, 0.3]; // red-ish
pub const NEUTRAL_TINT: [f32; 3] = [1.0, 1.0, 1.0];

// Card
pub const CARD_POSITION: [f32; 3] = [0.0, 0.0, 0.0];
pub const CARD_SCALE: f32 = 1.0;
pub const SPIN_SPEED: f32 = 1.5; // spin progress per second; a full turn takes 1/SPIN_SPEED
pub const FLOAT_AMPLITUDE: f32 = 0.05; // idle bob height
pub const FLOAT_FREQUENCY: f32 = 0.8; // idle bob angular frequency (rad/s)
pub const TILT_AMPLITUDE: f32 = 0.04; // idle tilt around X (radians)
pub const SWAY_AMPLITUDE: f32 = 0.08; // idle sway around Y (radians)

// Crossfade
pub const CROSSFADE_START: f32 = 0.4; // spin progress where a spin-coupled swap begins
pub const TRANSITION_SPEED: f32 = 2.0; // time-coupled progress per second

// Generation glow
pub const GENERATION_RAMP_PER_SEC: f32 = 2.5;

// Camera used for pointer picking
pub const CAMERA_Z: f32 = 6.0;
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;

#[inline]
pub fn card_position_vec3() -> Vec3 {
    Vec3::from(CARD_POSITION)
}

#[inline]
pub fn burst_emission_offset_vec3() -> Vec3 {
    Vec3::from(BURST_EMISSION_OFFSET)
}
