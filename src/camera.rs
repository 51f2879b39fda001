//! Per-frame camera data consumed by the UI passes.

use crate::geometry::{Rect, Vec2};
use crate::transform::{DEFAULT_SINGULAR_EPSILON, Mat4, Rotation2, screen_to_world};

/// Precomputed projection state for one frame.
///
/// `world_rect` is the world-space area visible through the viewport and serves
/// as the parent rect of every screen-space root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraInfo {
    pub view_projection: Mat4,
    /// Viewport in physical pixels, y down.
    pub viewport: Rect,
    /// Inverse of `view_projection`, or [`Mat4::ZERO`] when it is singular.
    pub inverse_view_projection: Mat4,
    pub world_rect: Rect,
    /// Pointer position in world space, refreshed by the interaction pass.
    pub mouse_world: Vec2,
}

impl CameraInfo {
    pub fn new(view_projection: Mat4, viewport: Rect) -> Self {
        Self::with_epsilon(view_projection, viewport, DEFAULT_SINGULAR_EPSILON)
    }

    pub fn with_epsilon(view_projection: Mat4, viewport: Rect, epsilon: f32) -> Self {
        let inverse_view_projection = view_projection.inverse(epsilon);
        if inverse_view_projection.is_zero() {
            log::warn!("view-projection is singular, pointer and layout collapse to the origin");
        }

        let a = screen_to_world(viewport.min(), &viewport, &inverse_view_projection);
        let b = screen_to_world(viewport.max(), &viewport, &inverse_view_projection);
        let world_rect = Rect::from_min_max(
            Vec2::new(a.x.min(b.x), a.y.min(b.y)),
            Vec2::new(a.x.max(b.x), a.y.max(b.y)),
        );

        Self {
            view_projection,
            viewport,
            inverse_view_projection,
            world_rect,
            mouse_world: Vec2::ZERO,
        }
    }

    /// Pixel-aligned orthographic camera centered on the world origin.
    pub fn orthographic(width: f32, height: f32) -> Self {
        Self::orthographic_at(width, height, Vec2::ZERO, 1.0, Rotation2::default())
    }

    /// Orthographic camera looking at `center`, magnified by `zoom` and rolled
    /// by `roll`. A zero zoom yields a degenerate camera.
    pub fn orthographic_at(
        width: f32,
        height: f32,
        center: Vec2,
        zoom: f32,
        roll: Rotation2,
    ) -> Self {
        let half_w = width * 0.5;
        let half_h = height * 0.5;
        let projection = Mat4::orthographic(-half_w, half_w, -half_h, half_h, -1.0, 1.0);
        let view = Mat4::rotate(-roll.angle())
            .then(&Mat4::scale_xy(zoom, zoom))
            .then(&Mat4::translate(-center.x, -center.y));
        Self::new(projection.then(&view), Rect::new(0.0, 0.0, width, height))
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen_to_world(screen, &self.viewport, &self.inverse_view_projection)
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        crate::transform::world_to_screen(world, &self.viewport, &self.view_projection)
    }

    pub fn is_degenerate(&self) -> bool {
        self.inverse_view_projection.is_zero()
    }
}

impl Default for CameraInfo {
    fn default() -> Self {
        Self::orthographic(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthographic_world_rect() {
        let camera = CameraInfo::orthographic(800.0, 600.0);
        let rect = camera.world_rect;
        assert!((rect.x + 400.0).abs() < 1e-3);
        assert!((rect.y + 300.0).abs() < 1e-3);
        assert!((rect.width - 800.0).abs() < 1e-3);
        assert!((rect.height - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_screen_center_is_world_origin() {
        let camera = CameraInfo::orthographic(800.0, 600.0);
        let world = camera.screen_to_world(Vec2::new(400.0, 300.0));
        assert!(world.x.abs() < 1e-3 && world.y.abs() < 1e-3);
    }

    #[test]
    fn test_panned_camera_centers_on_target() {
        let center = Vec2::new(100.0, -50.0);
        let camera =
            CameraInfo::orthographic_at(800.0, 600.0, center, 1.0, Rotation2::default());
        let world = camera.screen_to_world(Vec2::new(400.0, 300.0));
        assert!((world.x - 100.0).abs() < 1e-3 && (world.y + 50.0).abs() < 1e-3);
        assert!((camera.world_rect.x + 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_shrinks_visible_world() {
        let camera =
            CameraInfo::orthographic_at(800.0, 600.0, Vec2::ZERO, 2.0, Rotation2::default());
        assert!((camera.world_rect.width - 400.0).abs() < 1e-3);
        assert!((camera.world_rect.height - 300.0).abs() < 1e-3);

        let corner = camera.screen_to_world(Vec2::new(800.0, 0.0));
        assert!((corner.x - 200.0).abs() < 1e-3 && (corner.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_rolled_camera_rotates_pointer() {
        let camera = CameraInfo::orthographic_at(
            800.0,
            600.0,
            Vec2::ZERO,
            1.0,
            Rotation2::from_degrees(90.0),
        );
        // Screen right of center maps to world up once the view rolls 90 degrees.
        let world = camera.screen_to_world(Vec2::new(500.0, 300.0));
        assert!(world.x.abs() < 1e-3 && (world.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_zoom_is_degenerate() {
        let camera =
            CameraInfo::orthographic_at(800.0, 600.0, Vec2::ZERO, 0.0, Rotation2::default());
        assert!(camera.is_degenerate());
    }

    #[test]
    fn test_singular_camera_is_degenerate() {
        let camera = CameraInfo::new(Mat4::ZERO, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!(camera.is_degenerate());
        assert_eq!(camera.world_rect.size(), Vec2::ZERO);
    }
}
