//! Simulation core for the generative avatar card.
//!
//! Everything here is platform independent: the web and native frontends feed
//! a [`FrameInput`] into [`AvatarScene::frame`] once per frame and hand the
//! resulting buffers and uniforms to their renderer.

pub mod burst;
pub mod card;
pub mod config;
pub mod constants;
pub mod crossfade;
pub mod error;
pub mod forcefield;
pub mod geometry;
pub mod noise;
pub mod scene;
pub mod state;
pub mod swarm;
pub mod uniforms;

pub use burst::*;
pub use card::*;
pub use config::*;
pub use constants::*;
pub use crossfade::*;
pub use error::ConfigError;
pub use forcefield::*;
pub use geometry::*;
pub use noise::*;
pub use scene::*;
pub use state::*;
pub use swarm::*;
pub use uniforms::*;
