//! Depth-first draw order.
//!
//! Parents draw before their children and siblings in children order, so a
//! later sibling's subtree covers an earlier one.

use std::collections::HashMap;

use crate::components::{Drawable, ScreenSpaceRoot, UiRect};
use crate::world::{Entity, World};

/// Result of one render order pass.
#[derive(Debug, Default, Clone)]
pub struct RenderOrder {
    /// Every visited entity in pre-order. Also the hit-test scan order.
    traversal: Vec<Entity>,
    layers: HashMap<Entity, u32>,
}

impl RenderOrder {
    pub fn traversal(&self) -> &[Entity] {
        &self.traversal
    }

    /// Render layer of a drawable rect, if it was visited.
    pub fn layer_of(&self, entity: Entity) -> Option<u32> {
        self.layers.get(&entity).copied()
    }

    pub fn drawable_count(&self) -> usize {
        self.layers.len()
    }

    pub fn clear(&mut self) {
        self.traversal.clear();
        self.layers.clear();
    }
}

/// Assign sequential layers to every drawable rect under the screen-space roots.
pub fn assign_render_order(world: &mut World, order: &mut RenderOrder, max_depth: usize) {
    order.clear();
    let mut next_layer = 0u32;

    for root in world.entities_with::<ScreenSpaceRoot>() {
        let mut stack = vec![(root, 0usize)];
        while let Some((entity, depth)) = stack.pop() {
            order.traversal.push(entity);

            if world.has::<UiRect>(entity)
                && let Some(mut drawable) = world.get::<Drawable>(entity)
            {
                drawable.layer = next_layer;
                world.insert(entity, drawable);
                order.layers.insert(entity, next_layer);
                next_layer += 1;
            }

            if depth >= max_depth {
                log::warn!("render order of {entity:?} stopped at depth {depth}");
                continue;
            }
            for &child in world.children(entity).iter().rev() {
                if !world.has::<ScreenSpaceRoot>(child) {
                    stack.push((child, depth + 1));
                }
            }
        }
    }

    log::trace!(
        "[render order] visited={} drawables={}",
        order.traversal.len(),
        next_layer
    );
}
