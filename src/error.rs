//! Error types. None of these escape a frame: mask failures are recovered inside
//! the mask pass and schedule errors surface when systems are registered.

use crate::world::Entity;

/// Failures of the clip composition walk.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MaskError {
    #[error("mask hierarchy under {root:?} exceeds the maximum depth of {max_depth}")]
    DepthExceeded { root: Entity, max_depth: usize },

    #[error("clip rect of {entity:?} projected to a non-finite screen rect")]
    NonFiniteClip { entity: Entity },
}

/// Failures while ordering registered systems.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("system `{0}` is registered twice")]
    DuplicateSystem(String),

    #[error("system `{system}` is ordered against unknown system `{target}`")]
    UnknownSystem { system: String, target: String },

    #[error("ordering constraints form a cycle through: {}", .0.join(" -> "))]
    Cycle(Vec<String>),
}
