//! Clip rect composition for masked subtrees.
//!
//! A mask root is an enabled [`Mask`] with no enabled mask above it. Its
//! projected screen rect becomes the clip of every descendant. A nested mask is
//! itself clipped by the incoming rect and narrows the clip for its own subtree
//! to the intersection with its projected rect, so clips only ever shrink going
//! down.

use std::collections::HashMap;

use crate::camera::CameraInfo;
use crate::components::{Mask, UiRect, WorldTransform};
use crate::error::MaskError;
use crate::geometry::Rect;
use crate::transform::{intersect_rects, world_rect_to_screen};
use crate::world::{Entity, World};

/// Screen-space clip rects for the current frame.
///
/// An entity without an entry is unclipped.
#[derive(Debug, Default, Clone)]
pub struct ClipRegistry {
    clips: HashMap<Entity, Rect>,
}

impl ClipRegistry {
    pub fn clip_for(&self, entity: Entity) -> Option<Rect> {
        self.clips.get(&entity).copied()
    }

    pub fn set(&mut self, entity: Entity, clip: Rect) {
        self.clips.insert(entity, clip);
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn clear(&mut self) {
        self.clips.clear();
    }
}

/// Rebuild the clip registry. A failed walk leaves every entity unclipped.
pub fn mask_pass(
    world: &World,
    camera: &CameraInfo,
    registry: &mut ClipRegistry,
    max_depth: usize,
) {
    registry.clear();
    if let Err(err) = compose_clips(world, camera, registry, max_depth) {
        log::warn!("clip composition failed, clearing all clips: {err}");
        registry.clear();
    }
}

fn compose_clips(
    world: &World,
    camera: &CameraInfo,
    registry: &mut ClipRegistry,
    max_depth: usize,
) -> Result<(), MaskError> {
    for root in mask_roots(world, max_depth) {
        let Some(root_clip) = project(world, camera, root)? else {
            continue;
        };

        let mut stack: Vec<(Entity, Rect, usize)> = world
            .children(root)
            .iter()
            .rev()
            .map(|&c| (c, root_clip, 1))
            .collect();

        while let Some((entity, incoming, depth)) = stack.pop() {
            if depth > max_depth {
                return Err(MaskError::DepthExceeded { root, max_depth });
            }
            registry.set(entity, incoming);

            let mut clip = incoming;
            if is_mask_enabled(world, entity)
                && let Some(own) = project(world, camera, entity)?
            {
                clip = intersect_rects(&incoming, &own);
            }

            stack.extend(
                world
                    .children(entity)
                    .iter()
                    .rev()
                    .map(|&c| (c, clip, depth + 1)),
            );
        }
    }
    Ok(())
}

fn is_mask_enabled(world: &World, entity: Entity) -> bool {
    world.get::<Mask>(entity).is_some_and(|m| m.enabled)
}

/// Enabled masks with no enabled mask among their ancestors, in slot order.
fn mask_roots(world: &World, max_depth: usize) -> Vec<Entity> {
    world
        .entities_with::<Mask>()
        .into_iter()
        .filter(|&e| is_mask_enabled(world, e))
        .filter(|&e| {
            let mut current = world.parent(e);
            let mut steps = 0;
            while let Some(ancestor) = current {
                if !world.contains(ancestor) || steps > max_depth {
                    break;
                }
                if is_mask_enabled(world, ancestor) {
                    return false;
                }
                current = world.parent(ancestor);
                steps += 1;
            }
            true
        })
        .collect()
}

/// Screen rect of an entity, or `None` if it has no rect or world transform.
fn project(world: &World, camera: &CameraInfo, entity: Entity) -> Result<Option<Rect>, MaskError> {
    let (Some(rect), Some(transform)) = (
        world.get::<UiRect>(entity),
        world.get::<WorldTransform>(entity),
    ) else {
        return Ok(None);
    };
    let screen = world_rect_to_screen(
        &transform.oriented_rect(&rect),
        &camera.viewport,
        &camera.view_projection,
    );
    if !screen.is_finite() {
        return Err(MaskError::NonFiniteClip { entity });
    }
    Ok(Some(screen))
}
