//! Anchor-based rect layout.
//!
//! Each screen-space root is laid out against the camera's visible world rect,
//! then every descendant with a [`UiRect`] against its parent's solved rect.
//! Per axis the rect is either fixed-size (both anchors equal, extent taken from
//! `size`, pivot placed on the anchor point plus `offset_min`) or stretched
//! (edges at `parent_min + anchor * parent_extent + offset`).
//!
//! The solved origin is the pivot point of the rect. Unless the rect is
//! `layout_managed`, it is written to [`LocalTransform::position`] relative to
//! the parent's origin; roots are relative to the world origin.

pub mod stats;

pub use stats::LayoutStats;

use crate::camera::CameraInfo;
use crate::change::ChangeCache;
use crate::components::{Drawable, LocalTransform, ScreenSpaceRoot, UiRect};
use crate::geometry::{Rect, Vec2};
use crate::world::{Entity, World};

/// World-space result of solving one rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedRect {
    /// Axis-aligned bounds, `(x, y)` is the minimum corner.
    pub bounds: Rect,
    /// World position of the pivot.
    pub origin: Vec2,
}

/// Solve one axis. Returns `(min, extent)`.
#[allow(clippy::too_many_arguments)]
pub fn solve_axis(
    parent_min: f32,
    parent_extent: f32,
    anchor_min: f32,
    anchor_max: f32,
    offset_min: f32,
    offset_max: f32,
    size: f32,
    pivot: f32,
) -> (f32, f32) {
    if anchor_min == anchor_max {
        let extent = size.max(0.0);
        let anchor = parent_min + anchor_min * parent_extent;
        (anchor + offset_min - pivot * extent, extent)
    } else {
        let min = parent_min + anchor_min * parent_extent + offset_min;
        let max = parent_min + anchor_max * parent_extent + offset_max;
        (min, (max - min).max(0.0))
    }
}

/// Solve a rect against its parent's world rect.
pub fn solve_rect(rect: &UiRect, parent: &Rect) -> SolvedRect {
    let (x, width) = solve_axis(
        parent.x,
        parent.width,
        rect.anchor_min.x,
        rect.anchor_max.x,
        rect.offset_min.x,
        rect.offset_max.x,
        rect.size.x,
        rect.pivot.x,
    );
    let (y, height) = solve_axis(
        parent.y,
        parent.height,
        rect.anchor_min.y,
        rect.anchor_max.y,
        rect.offset_min.y,
        rect.offset_max.y,
        rect.size.y,
        rect.pivot.y,
    );
    SolvedRect {
        bounds: Rect::new(x, y, width, height),
        origin: Vec2::new(x + rect.pivot.x * width, y + rect.pivot.y * height),
    }
}

/// Lay out every dirty screen-space root.
///
/// Refreshes the change cache first, so edits made since the last frame are
/// picked up here. Clean roots keep last frame's results.
pub fn layout_pass(
    world: &mut World,
    cache: &mut ChangeCache,
    camera: &CameraInfo,
    max_depth: usize,
) -> LayoutStats {
    let mut stats = LayoutStats::default();

    // Roots follow the visible world rect, which moves with the viewport and
    // with the view-projection alike.
    cache.begin_frame(world, &camera.world_rect);
    let dirty = cache.take_dirty_roots(world);

    for root in world.entities_with::<ScreenSpaceRoot>() {
        if dirty.binary_search_by_key(&root.index(), |r| r.index()).is_err() {
            stats.record_root_skipped();
            continue;
        }
        stats.record_root_walked();
        layout_root(world, root, &camera.world_rect, max_depth, &mut stats);
    }

    stats.log_summary();
    stats
}

/// Walk one root and its subtree top-down.
pub fn layout_root(
    world: &mut World,
    root: Entity,
    parent_rect: &Rect,
    max_depth: usize,
    stats: &mut LayoutStats,
) {
    let mut stack = vec![(root, *parent_rect, Vec2::ZERO, 0usize)];

    while let Some((entity, parent, parent_origin, depth)) = stack.pop() {
        let Some(mut rect) = world.get::<UiRect>(entity) else {
            stats.record_entity_skipped();
            continue;
        };

        let solved = solve_rect(&rect, &parent);
        apply(world, entity, &mut rect, &solved, parent_origin);
        stats.record_rect();

        if depth >= max_depth {
            if !world.children(entity).is_empty() {
                log::warn!(
                    "layout of {entity:?} stopped at depth {depth}, children are not laid out"
                );
                stats.record_entity_skipped();
            }
            continue;
        }

        // Reverse so children pop in declaration order.
        for &child in world.children(entity).iter().rev() {
            if world.has::<ScreenSpaceRoot>(child) || !world.has::<UiRect>(child) {
                stats.record_entity_skipped();
                continue;
            }
            stack.push((child, solved.bounds, solved.origin, depth + 1));
        }
    }
}

fn apply(
    world: &mut World,
    entity: Entity,
    rect: &mut UiRect,
    solved: &SolvedRect,
    parent_origin: Vec2,
) {
    rect.width = solved.bounds.width;
    rect.height = solved.bounds.height;
    rect.dirty = false;
    world.insert(entity, *rect);

    if !rect.layout_managed {
        let mut local = world.get::<LocalTransform>(entity).unwrap_or_default();
        local.position = solved.origin - parent_origin;
        world.insert(entity, local);
    }

    if let Some(mut drawable) = world.get::<Drawable>(entity) {
        drawable.size = solved.bounds.size();
        world.insert(entity, drawable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeCache;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn parent() -> Rect {
        Rect::new(-400.0, -300.0, 800.0, 600.0)
    }

    #[test]
    fn test_fixed_axis_ignores_parent_extent() {
        let rect = UiRect::fixed(120.0, 40.0).offsets((10.0, -5.0), (0.0, 0.0));
        for parent in [parent(), Rect::new(0.0, 0.0, 10.0, 10.0)] {
            let solved = solve_rect(&rect, &parent);
            assert!(approx_eq(solved.bounds.width, 120.0));
            assert!(approx_eq(solved.bounds.height, 40.0));
        }
    }

    #[test]
    fn test_fixed_axis_places_pivot_on_anchor() {
        let rect = UiRect::fixed(100.0, 50.0)
            .anchors((0.0, 1.0), (0.0, 1.0))
            .pivot((0.0, 1.0))
            .offsets((8.0, -8.0), (0.0, 0.0));
        let solved = solve_rect(&rect, &parent());
        // Top-left corner sits 8px inside the parent's top-left.
        assert!(approx_eq(solved.origin.x, -392.0));
        assert!(approx_eq(solved.origin.y, 292.0));
        assert!(approx_eq(solved.bounds.x, -392.0));
        assert!(approx_eq(solved.bounds.y, 242.0));
    }

    #[test]
    fn test_stretched_axis_extent() {
        let rect = UiRect::new()
            .anchors((0.25, 0.0), (0.75, 1.0))
            .offsets((10.0, 20.0), (-30.0, -20.0));
        let solved = solve_rect(&rect, &parent());
        assert!(approx_eq(solved.bounds.width, 0.5 * 800.0 - 40.0));
        assert!(approx_eq(solved.bounds.height, 600.0 - 40.0));
    }

    #[test]
    fn test_stretched_axis_clamps_to_zero() {
        let rect = UiRect::stretch().offsets((500.0, 0.0), (-500.0, 0.0));
        let solved = solve_rect(&rect, &parent());
        assert_eq!(solved.bounds.width, 0.0);
        assert!(approx_eq(solved.bounds.height, 600.0));
    }

    #[test]
    fn test_layout_writes_outputs() {
        let mut world = World::new();
        let root = world.spawn();
        let child = world.spawn();
        world.insert(root, ScreenSpaceRoot);
        world.insert(root, UiRect::stretch());
        world.insert(child, UiRect::fixed(100.0, 50.0).pivot((0.0, 0.0)));
        world.insert(child, Drawable::default());
        world.set_parent(child, root);

        let mut cache = ChangeCache::new(64);
        let stats = layout_pass(&mut world, &mut cache, &CameraInfo::orthographic(800.0, 600.0), 64);
        assert_eq!(stats.rects_laid_out, 2);

        let rect = world.get::<UiRect>(child).unwrap();
        assert_eq!(rect.computed_size(), Vec2::new(100.0, 50.0));
        assert_eq!(rect.size, Vec2::new(100.0, 50.0));
        assert_eq!(world.get::<Drawable>(child).unwrap().size, Vec2::new(100.0, 50.0));

        let local = world.get::<LocalTransform>(child).unwrap();
        assert!(approx_eq(local.position.x, 0.0));
        assert!(approx_eq(local.position.y, 0.0));
    }

    #[test]
    fn test_layout_managed_keeps_position() {
        let mut world = World::new();
        let root = world.spawn();
        world.insert(root, ScreenSpaceRoot);
        world.insert(root, UiRect::fixed(10.0, 10.0).layout_managed(true));
        world.insert(root, LocalTransform::from_position((3.0, 4.0)));

        let mut cache = ChangeCache::new(64);
        layout_pass(&mut world, &mut cache, &CameraInfo::orthographic(800.0, 600.0), 64);

        assert_eq!(world.get::<LocalTransform>(root).unwrap().position, Vec2::new(3.0, 4.0));
        assert_eq!(world.get::<UiRect>(root).unwrap().width, 10.0);
    }

    #[test]
    fn test_descent_skips_nested_roots_and_rectless_children() {
        let mut world = World::new();
        let root = world.spawn();
        let bare = world.spawn();
        let below_bare = world.spawn();
        let nested = world.spawn();
        world.insert(root, ScreenSpaceRoot);
        world.insert(root, UiRect::stretch());
        world.insert(below_bare, UiRect::stretch());
        world.insert(nested, ScreenSpaceRoot);
        world.insert(nested, UiRect::fixed(10.0, 10.0));
        world.set_parent(bare, root);
        world.set_parent(below_bare, bare);
        world.set_parent(nested, root);

        let mut stats = LayoutStats::default();
        layout_root(&mut world, root, &parent(), 64, &mut stats);

        assert_eq!(stats.rects_laid_out, 1);
        assert_eq!(stats.entities_skipped, 2);
        assert_eq!(world.get::<UiRect>(below_bare).unwrap().width, 0.0);
        assert_eq!(world.get::<UiRect>(nested).unwrap().width, 0.0);
    }

    #[test]
    fn test_depth_guard_stops_descent() {
        let mut world = World::new();
        let root = world.spawn();
        world.insert(root, ScreenSpaceRoot);
        world.insert(root, UiRect::stretch());
        let mut parent_entity = root;
        for _ in 0..5 {
            let e = world.spawn();
            world.insert(e, UiRect::stretch());
            world.set_parent(e, parent_entity);
            parent_entity = e;
        }

        let mut stats = LayoutStats::default();
        layout_root(&mut world, root, &parent(), 2, &mut stats);
        assert_eq!(stats.rects_laid_out, 3);
        assert_eq!(stats.entities_skipped, 1);
    }

    #[test]
    fn test_clean_roots_are_skipped() {
        let mut world = World::new();
        let root = world.spawn();
        world.insert(root, ScreenSpaceRoot);
        world.insert(root, UiRect::stretch());

        let camera = CameraInfo::orthographic(800.0, 600.0);
        let mut cache = ChangeCache::new(64);
        assert_eq!(layout_pass(&mut world, &mut cache, &camera, 64).roots_walked, 1);

        let stats = layout_pass(&mut world, &mut cache, &camera, 64);
        assert_eq!(stats.roots_walked, 0);
        assert_eq!(stats.roots_skipped, 1);
    }
}
