//! Matrix math and screen/world coordinate conversion.
//!
//! Matrices are stored row-major and multiply column vectors, so a point is
//! transformed as `M * (x, y, z, 1)`. The screen is y-down pixels with the
//! viewport's top-left corner at `(viewport.x, viewport.y)`; NDC and world space
//! are y-up.

use bytemuck::{Pod, Zeroable};

use crate::geometry::{Rect, Vec2};

/// Determinant magnitude below which a matrix is treated as singular.
pub const DEFAULT_SINGULAR_EPSILON: f32 = 1e-12;

/// A 4x4 transformation matrix stored in row-major order.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    /// Matrix data in row-major order: [row0, row1, row2, row3]
    pub data: [f32; 16],
}

impl Mat4 {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // row 0
            0.0, 1.0, 0.0, 0.0, // row 1
            0.0, 0.0, 1.0, 0.0, // row 2
            0.0, 0.0, 0.0, 1.0, // row 3
        ],
    };

    /// All-zero matrix, returned by `inverse` for singular input.
    pub const ZERO: Self = Self { data: [0.0; 16] };

    /// Shift in the xy plane.
    pub fn translate(x: f32, y: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.data[3] = x;
        m.data[7] = y;
        m
    }

    /// Counter-clockwise roll about z.
    pub fn rotate(radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        let mut m = Self::IDENTITY;
        m.data[0] = cos;
        m.data[1] = -sin;
        m.data[4] = sin;
        m.data[5] = cos;
        m
    }

    pub fn scale_xy(sx: f32, sy: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.data[0] = sx;
        m.data[5] = sy;
        m
    }

    /// Orthographic projection mapping the given world box to NDC.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fnr = far - near;
        Self {
            data: [
                2.0 / rl, 0.0, 0.0, -(right + left) / rl, // row 0
                0.0, 2.0 / tb, 0.0, -(top + bottom) / tb, // row 1
                0.0, 0.0, -2.0 / fnr, -(far + near) / fnr, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// `self * other`: `other` is applied to a point first.
    pub fn then(&self, other: &Mat4) -> Mat4 {
        let mut data = [0.0f32; 16];
        for (i, cell) in data.iter_mut().enumerate() {
            let (row, col) = (i / 4, i % 4);
            *cell = (0..4)
                .map(|k| self.data[row * 4 + k] * other.data[k * 4 + col])
                .sum();
        }
        Mat4 { data }
    }

    pub fn determinant(&self) -> f32 {
        self.cofactors().1
    }

    /// Full 4x4 inverse by cofactor expansion.
    ///
    /// Returns [`Mat4::ZERO`] when `|det| < epsilon`. Every point mapped through
    /// the zero matrix lands on the origin, which the interaction pass treats as
    /// "nothing can be hit".
    pub fn inverse(&self, epsilon: f32) -> Mat4 {
        let (adjugate, det) = self.cofactors();
        if !det.is_finite() || det.abs() < epsilon {
            return Self::ZERO;
        }

        let inv_det = 1.0 / det;
        let mut data = adjugate;
        for value in &mut data {
            *value *= inv_det;
        }
        Mat4 { data }
    }

    /// Returns the adjugate (transposed cofactor matrix) and the determinant.
    fn cofactors(&self) -> ([f32; 16], f32) {
        let m = &self.data;
        let mut inv = [0.0f32; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        (inv, det)
    }

    /// Multiply a homogeneous point `(x, y, z, w)`.
    pub fn transform_vec4(&self, v: [f32; 4]) -> [f32; 4] {
        let d = &self.data;
        let mut out = [0.0f32; 4];
        for (i, value) in out.iter_mut().enumerate() {
            *value = d[i * 4] * v[0] + d[i * 4 + 1] * v[1] + d[i * 4 + 2] * v[2] + d[i * 4 + 3] * v[3];
        }
        out
    }

    /// Transform a 2D point (z = 0) with a perspective divide.
    ///
    /// A vanishing `w` collapses the result onto the origin. Non-finite input
    /// stays non-finite.
    pub fn project_point(&self, x: f32, y: f32) -> Vec2 {
        let [px, py, _, pw] = self.transform_vec4([x, y, 0.0, 1.0]);
        if pw.abs() <= f32::EPSILON {
            return Vec2::ZERO;
        }
        Vec2::new(px / pw, py / pw)
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|v| *v == 0.0)
    }

    /// Raw bytes for uploading to a GPU uniform.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A rotation about the Z axis stored as the `(z, w)` pair of a quaternion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation2 {
    pub z: f32,
    pub w: f32,
}

impl Rotation2 {
    pub const IDENTITY: Self = Self { z: 0.0, w: 1.0 };

    pub fn from_angle(radians: f32) -> Self {
        let half = radians * 0.5;
        Self {
            z: half.sin(),
            w: half.cos(),
        }
    }

    pub fn from_degrees(degrees: f32) -> Self {
        Self::from_angle(degrees.to_radians())
    }

    pub fn angle(&self) -> f32 {
        2.0 * self.z.atan2(self.w)
    }

    /// Quaternion product restricted to the Z axis: applies `other` first.
    pub fn then(&self, other: &Rotation2) -> Rotation2 {
        Rotation2 {
            z: self.z * other.w + self.w * other.z,
            w: self.w * other.w - self.z * other.z,
        }
    }

    pub fn rotate(&self, v: Vec2) -> Vec2 {
        let (sin, cos) = self.angle().sin_cos();
        Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
    }

    pub fn inverse_rotate(&self, v: Vec2) -> Vec2 {
        let (sin, cos) = self.angle().sin_cos();
        Vec2::new(cos * v.x + sin * v.y, -sin * v.x + cos * v.y)
    }
}

impl Default for Rotation2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Map a screen pixel to world space through an already inverted view-projection.
pub fn screen_to_world(screen: Vec2, viewport: &Rect, inverse_view_projection: &Mat4) -> Vec2 {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec2::ZERO;
    }
    let ndc_x = (screen.x - viewport.x) / viewport.width * 2.0 - 1.0;
    let ndc_y = 1.0 - (screen.y - viewport.y) / viewport.height * 2.0;
    inverse_view_projection.project_point(ndc_x, ndc_y)
}

/// Map a world point to screen pixels through the view-projection.
pub fn world_to_screen(world: Vec2, viewport: &Rect, view_projection: &Mat4) -> Vec2 {
    let ndc = view_projection.project_point(world.x, world.y);
    Vec2::new(
        viewport.x + (ndc.x + 1.0) * 0.5 * viewport.width,
        viewport.y + (1.0 - ndc.y) * 0.5 * viewport.height,
    )
}

/// An oriented rectangle in world space, positioned by its pivot point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedRect {
    /// World position of the pivot point.
    pub center: Vec2,
    /// Full width and height.
    pub extents: Vec2,
    /// Normalized pivot inside the rect.
    pub pivot: Vec2,
    pub rotation: Rotation2,
}

impl OrientedRect {
    /// Local-space minimum and maximum corners relative to the pivot.
    pub fn local_corners(&self) -> (Vec2, Vec2) {
        let min = Vec2::new(-self.pivot.x * self.extents.x, -self.pivot.y * self.extents.y);
        let max = Vec2::new(
            (1.0 - self.pivot.x) * self.extents.x,
            (1.0 - self.pivot.y) * self.extents.y,
        );
        (min, max)
    }
}

/// Oriented rectangle containment test. Boundaries count as inside.
pub fn point_in_obb(point: Vec2, obb: &OrientedRect) -> bool {
    let local = obb.rotation.inverse_rotate(point - obb.center);
    let (min, max) = obb.local_corners();
    local.x >= min.x && local.x <= max.x && local.y >= min.y && local.y <= max.y
}

/// Project an oriented world rect to an axis-aligned screen rect.
///
/// Only the two opposite corners are projected and their bounding box is
/// returned, so a rotated rect is approximated. Hardware scissor rects are
/// axis-aligned anyway.
pub fn world_rect_to_screen(obb: &OrientedRect, viewport: &Rect, view_projection: &Mat4) -> Rect {
    let (min, max) = obb.local_corners();
    let a = world_to_screen(obb.center + obb.rotation.rotate(min), viewport, view_projection);
    let b = world_to_screen(obb.center + obb.rotation.rotate(max), viewport, view_projection);
    Rect::from_min_max(
        Vec2::new(a.x.min(b.x), a.y.min(b.y)),
        Vec2::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Overlap of two screen rects, clamped to a non-negative size.
pub fn intersect_rects(a: &Rect, b: &Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let right = (a.x + a.width).min(b.x + b.width);
    let bottom = (a.y + a.height).min(b.y + b.height);
    Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
}
