//! Local to world transform propagation.
//!
//! Composes [`LocalTransform`] down the hierarchy into [`WorldTransform`]. An
//! entity without a local transform passes its parent's world transform through
//! to its children, unless it carries a world transform of its own, which is
//! then left as-is and used for the subtree.

use crate::components::{LocalTransform, WorldTransform};
use crate::geometry::Vec2;
use crate::world::{Entity, World};

/// World transform of a child given its parent's world and its local transform.
pub fn compose(parent: &WorldTransform, local: &LocalTransform) -> WorldTransform {
    let scaled = Vec2::new(
        local.position.x * parent.scale.x,
        local.position.y * parent.scale.y,
    );
    WorldTransform {
        position: parent.position + parent.rotation.rotate(scaled),
        rotation: parent.rotation.then(&local.rotation),
        scale: Vec2::new(
            parent.scale.x * local.scale.x,
            parent.scale.y * local.scale.y,
        ),
    }
}

/// Recompute world transforms for every tree in the world.
pub fn propagate_world_transforms(world: &mut World, max_depth: usize) {
    // Topmost entities with a local transform, seeded with the nearest
    // ancestor world transform (identity if there is none).
    let mut stack: Vec<(Entity, WorldTransform, usize)> = Vec::new();
    for entity in world.entities_with::<LocalTransform>().into_iter().rev() {
        let mut seed = None;
        let mut current = world.parent(entity);
        let mut is_top = true;
        let mut steps = 0;
        while let Some(ancestor) = current {
            if !world.contains(ancestor) || steps > max_depth {
                break;
            }
            if world.has::<LocalTransform>(ancestor) {
                is_top = false;
                break;
            }
            if seed.is_none() {
                seed = world.get::<WorldTransform>(ancestor);
            }
            current = world.parent(ancestor);
            steps += 1;
        }
        if is_top {
            stack.push((entity, seed.unwrap_or_default(), 0));
        }
    }

    while let Some((entity, parent, depth)) = stack.pop() {
        let resolved = match world.get::<LocalTransform>(entity) {
            Some(local) => {
                let world_transform = compose(&parent, &local);
                world.insert(entity, world_transform);
                world_transform
            }
            None => world.get::<WorldTransform>(entity).unwrap_or(parent),
        };

        if depth >= max_depth {
            log::warn!("transform propagation stopped at {entity:?}, depth {depth}");
            continue;
        }
        for &child in world.children(entity).iter().rev() {
            stack.push((child, resolved, depth + 1));
        }
    }
}
