//! Scene components read and written by the UI passes.

use crate::Tracked;
use crate::geometry::{Color, Vec2};
use crate::transform::{OrientedRect, Rotation2};

/// Anchor-based rectangle of a UI entity.
///
/// Anchors and pivot are normalized to the parent rect. An axis whose two
/// anchors coincide is fixed-size and takes its extent from `size`; otherwise it
/// stretches with the parent and the offsets are added to the anchored edges.
/// `width`/`height` are written by the layout pass and are not inputs.
#[derive(Debug, Clone, Copy, PartialEq, Tracked)]
pub struct UiRect {
    #[track]
    pub anchor_min: Vec2,
    #[track]
    pub anchor_max: Vec2,
    #[track]
    pub offset_min: Vec2,
    #[track]
    pub offset_max: Vec2,
    #[track]
    pub size: Vec2,
    #[track]
    pub pivot: Vec2,
    /// When set, an external layout group owns the entity's position.
    #[track]
    pub layout_managed: bool,
    /// Set by user code to force a relayout; cleared by the layout pass.
    pub dirty: bool,
    pub width: f32,
    pub height: f32,
}

impl Default for UiRect {
    fn default() -> Self {
        Self {
            anchor_min: Vec2::HALF,
            anchor_max: Vec2::HALF,
            offset_min: Vec2::ZERO,
            offset_max: Vec2::ZERO,
            size: Vec2::new(100.0, 100.0),
            pivot: Vec2::HALF,
            layout_managed: false,
            dirty: false,
            width: 0.0,
            height: 0.0,
        }
    }
}

impl UiRect {
    pub fn new() -> Self {
        Self::default()
    }

    /// A rect stretched over the whole parent.
    pub fn stretch() -> Self {
        Self {
            anchor_min: Vec2::ZERO,
            anchor_max: Vec2::ONE,
            ..Default::default()
        }
    }

    /// A fixed-size rect centered on the parent.
    pub fn fixed(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Default::default()
        }
    }

    pub fn anchors(mut self, min: impl Into<Vec2>, max: impl Into<Vec2>) -> Self {
        self.anchor_min = min.into().saturate();
        self.anchor_max = max.into().saturate();
        self
    }

    pub fn offsets(mut self, min: impl Into<Vec2>, max: impl Into<Vec2>) -> Self {
        self.offset_min = min.into();
        self.offset_max = max.into();
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn pivot(mut self, pivot: impl Into<Vec2>) -> Self {
        self.pivot = pivot.into().saturate();
        self
    }

    pub fn layout_managed(mut self, managed: bool) -> Self {
        self.layout_managed = managed;
        self
    }

    pub fn is_fixed_x(&self) -> bool {
        self.anchor_min.x == self.anchor_max.x
    }

    pub fn is_fixed_y(&self) -> bool {
        self.anchor_min.y == self.anchor_max.y
    }

    pub fn computed_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Position written by the layout pass, plus the local rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vec2,
    pub rotation: Rotation2,
    pub scale: Vec2,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: Rotation2::IDENTITY,
            scale: Vec2::ONE,
        }
    }
}

impl LocalTransform {
    pub fn from_position(position: impl Into<Vec2>) -> Self {
        Self {
            position: position.into(),
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation2) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: impl Into<Vec2>) -> Self {
        self.scale = scale.into();
        self
    }
}

/// Resolved world-space transform, produced by the transform propagation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTransform {
    pub position: Vec2,
    pub rotation: Rotation2,
    pub scale: Vec2,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: Rotation2::IDENTITY,
            scale: Vec2::ONE,
        }
    }
}

impl WorldTransform {
    /// The entity's rect as an oriented box in world space.
    pub fn oriented_rect(&self, rect: &UiRect) -> OrientedRect {
        OrientedRect {
            center: self.position,
            extents: Vec2::new(rect.width * self.scale.x, rect.height * self.scale.y),
            pivot: rect.pivot,
            rotation: self.rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskMode {
    #[default]
    Scissor,
    Stencil,
}

/// Marks an entity as a clip boundary for its subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask {
    pub enabled: bool,
    pub mode: MaskMode,
}

impl Default for Mask {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: MaskMode::Scissor,
        }
    }
}

/// Renderer-facing record of something that gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Drawable {
    pub color: Color,
    /// Copied from the computed rect size by the layout pass.
    pub size: Vec2,
    /// Draw order assigned by the render order pass.
    pub layer: u32,
}

impl Drawable {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }
}

/// Tag for the top of a screen-space UI tree. Laid out against the camera rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenSpaceRoot;
