//! Root cache and dirty-root tracking for partial relayout.
//!
//! Every entity maps to its nearest screen-space root. A change anywhere in a
//! tree evicts the cache entries below the changed entity and marks the owning
//! root dirty; the layout pass only walks dirty roots.

use std::collections::{HashMap, HashSet};

use super::snapshot::{FieldTracker, Snapshot};
use crate::components::{ScreenSpaceRoot, UiRect};
use crate::geometry::Rect;
use crate::world::{Entity, World};

pub struct ChangeCache {
    rect_tracker: FieldTracker<UiRect>,
    rect_snapshots: HashMap<Entity, Snapshot>,
    /// Nearest root ancestor (or self) per entity; `None` if the entity has none.
    root_cache: HashMap<Entity, Option<Entity>>,
    dirty_roots: HashSet<Entity>,
    /// Roots seen by the previous `begin_frame`.
    known_roots: HashSet<Entity>,
    last_viewport: Option<Rect>,
    max_depth: usize,
}

impl ChangeCache {
    pub fn new(max_depth: usize) -> Self {
        Self {
            rect_tracker: FieldTracker::derived(),
            rect_snapshots: HashMap::new(),
            root_cache: HashMap::new(),
            dirty_roots: HashSet::new(),
            known_roots: HashSet::new(),
            last_viewport: None,
            max_depth,
        }
    }

    /// Bring the cache up to date with the world before layout runs.
    ///
    /// Prunes dead entries, reacts to viewport changes, roots being tagged or
    /// untagged, re-parenting and tracked `UiRect` field changes. A set
    /// `UiRect::dirty` flag is consumed here.
    pub fn begin_frame(&mut self, world: &mut World, viewport: &Rect) {
        self.prune(world);

        if self.last_viewport != Some(*viewport) {
            log::debug!("viewport changed to {viewport:?}, invalidating all layout roots");
            self.root_cache.clear();
            for root in world.entities_with::<ScreenSpaceRoot>() {
                self.dirty_roots.insert(root);
            }
            self.last_viewport = Some(*viewport);
        }

        self.sync_roots(world);

        for entity in world.take_reparented() {
            self.mark_dirty(world, entity);
        }

        for entity in world.entities_with::<UiRect>() {
            let Some(mut rect) = world.get::<UiRect>(entity) else {
                continue;
            };
            let tracked_change = match self.rect_snapshots.get_mut(&entity) {
                Some(snapshot) => {
                    let changed = self.rect_tracker.changed(snapshot, &rect);
                    if changed {
                        self.rect_tracker.update(snapshot, &rect);
                    }
                    changed
                }
                None => {
                    self.rect_snapshots
                        .insert(entity, self.rect_tracker.take(&rect));
                    true
                }
            };
            let flagged = rect.dirty;
            if flagged {
                // Cleared here: the layout walk may never reach this rect.
                rect.dirty = false;
                world.insert(entity, rect);
            }
            if tracked_change || flagged {
                self.mark_dirty(world, entity);
            }
        }
    }

    /// Diff the tagged roots against the previous frame.
    ///
    /// A new root gets its subtree evicted and is laid out on its own. An
    /// entity that stopped being a root is handed back to the root above it.
    fn sync_roots(&mut self, world: &World) {
        let current: HashSet<Entity> = world
            .entities_with::<ScreenSpaceRoot>()
            .into_iter()
            .collect();

        let mut added: Vec<Entity> = current.difference(&self.known_roots).copied().collect();
        added.sort_by_key(|e| e.index());
        for root in added {
            log::trace!("{root:?} became a screen-space root");
            self.mark_dirty(world, root);
        }

        let mut removed: Vec<Entity> = self
            .known_roots
            .difference(&current)
            .copied()
            .filter(|&e| world.contains(e))
            .collect();
        removed.sort_by_key(|e| e.index());
        for entity in removed {
            log::trace!("{entity:?} is no longer a screen-space root");
            self.dirty_roots.remove(&entity);
            self.mark_dirty(world, entity);
        }

        self.known_roots = current;
    }

    fn prune(&mut self, world: &World) {
        let before = self.root_cache.len() + self.rect_snapshots.len() + self.dirty_roots.len();
        self.root_cache
            .retain(|e, root| world.contains(*e) && root.is_none_or(|r| world.contains(r)));
        self.rect_snapshots
            .retain(|e, _| world.contains(*e) && world.has::<UiRect>(*e));
        self.dirty_roots.retain(|e| world.contains(*e));
        let after = self.root_cache.len() + self.rect_snapshots.len() + self.dirty_roots.len();
        if before != after {
            log::trace!("pruned {} stale change cache entries", before - after);
        }
    }

    /// Evict the entity's subtree from the root cache and mark its root dirty.
    pub fn mark_dirty(&mut self, world: &World, entity: Entity) {
        let mut stack = vec![(entity, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            self.root_cache.remove(&current);
            if depth >= self.max_depth {
                continue;
            }
            stack.extend(world.children(current).iter().map(|&c| (c, depth + 1)));
        }

        if let Some(root) = self.root_of(world, entity) {
            self.dirty_roots.insert(root);
        }
    }

    pub fn is_root_dirty(&self, root: Entity) -> bool {
        self.dirty_roots.contains(&root)
    }

    /// Nearest screen-space root at or above `entity`, memoized.
    pub fn root_of(&mut self, world: &World, entity: Entity) -> Option<Entity> {
        if let Some(cached) = self.root_cache.get(&entity) {
            return *cached;
        }

        let mut path = Vec::new();
        let mut current = Some(entity);
        let mut found = None;
        while let Some(e) = current {
            if !world.contains(e) || path.len() > self.max_depth {
                break;
            }
            if let Some(cached) = self.root_cache.get(&e) {
                found = *cached;
                break;
            }
            path.push(e);
            if world.has::<ScreenSpaceRoot>(e) {
                found = Some(e);
                break;
            }
            current = world.parent(e);
        }

        for e in path {
            self.root_cache.insert(e, found);
        }
        found
    }

    /// Cached root entry without computing it.
    pub fn cached_root(&self, entity: Entity) -> Option<Option<Entity>> {
        self.root_cache.get(&entity).copied()
    }

    /// Drain the dirty roots that are still valid, in slot order.
    pub fn take_dirty_roots(&mut self, world: &World) -> Vec<Entity> {
        let mut roots: Vec<Entity> = self
            .dirty_roots
            .drain()
            .filter(|&r| world.has::<ScreenSpaceRoot>(r))
            .collect();
        roots.sort_by_key(|r| r.index());
        roots
    }

    pub fn clear(&mut self) {
        self.rect_snapshots.clear();
        self.root_cache.clear();
        self.dirty_roots.clear();
        self.known_roots.clear();
        self.last_viewport = None;
    }
}
