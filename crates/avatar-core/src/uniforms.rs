//! Named per-frame values handed to the rendering sink.
//!
//! The table is plain data: the sink decides whether it becomes a uniform
//! buffer, shader material parameters, or a debug readout.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A single table value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Scalar(f32),
    Vec3(Vec3),
}

/// Everything the shaders read besides the particle buffers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneUniforms {
    pub time: f32,
    /// 0 none, 1 buy, 2 sell
    pub transaction_kind: f32,
    pub transaction_intensity: f32,
    pub card_position: Vec3,
    pub is_generating: f32,
    pub generation_intensity: f32,
    pub burst_time: f32,
    pub burst_active: f32,
    pub current_opacity: f32,
    pub next_opacity: f32,
}

impl SceneUniforms {
    pub const NAMES: [&'static str; 10] = [
        "time",
        "transactionKind",
        "transactionIntensity",
        "cardPosition",
        "isGenerating",
        "generationIntensity",
        "burstTime",
        "burstActive",
        "currentOpacity",
        "nextOpacity",
    ];

    /// Name/value pairs in the order of [`NAMES`](Self::NAMES).
    pub fn entries(&self) -> [(&'static str, UniformValue); 10] {
        use UniformValue::{Scalar, Vec3 as V3};
        let n = Self::NAMES;
        [
            (n[0], Scalar(self.time)),
            (n[1], Scalar(self.transaction_kind)),
            (n[2], Scalar(self.transaction_intensity)),
            (n[3], V3(self.card_position)),
            (n[4], Scalar(self.is_generating)),
            (n[5], Scalar(self.generation_intensity)),
            (n[6], Scalar(self.burst_time)),
            (n[7], Scalar(self.burst_active)),
            (n[8], Scalar(self.current_opacity)),
            (n[9], Scalar(self.next_opacity)),
        ]
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// GPU layout, padded to 16-byte rows.
    pub fn gpu(&self) -> GpuSceneUniforms {
        GpuSceneUniforms {
            card_position_time: [
                self.card_position.x,
                self.card_position.y,
                self.card_position.z,
                self.time,
            ],
            transaction: [
                self.transaction_kind,
                self.transaction_intensity,
                self.burst_time,
                self.burst_active,
            ],
            generation_fade: [
                self.is_generating,
                self.generation_intensity,
                self.current_opacity,
                self.next_opacity,
            ],
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuSceneUniforms {
    /// xyz card position, w time
    pub card_position_time: [f32; 4],
    /// kind, intensity, burst time, burst active
    pub transaction: [f32; 4],
    /// is generating, generation intensity, current opacity, next opacity
    pub generation_fade: [f32; 4],
}
