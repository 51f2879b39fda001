//! Arena-based entity and component storage.
//!
//! Entities use generational indices so a stale handle to a despawned entity
//! never resolves to whatever reuses its slot. Every component type lives in its
//! own sparse column indexed by the entity slot, which keeps presence checks
//! O(1) and makes queries iterate in a stable, slot-ascending order.
//!
//! Components are handed out as copies. A pass that wants to change one writes
//! the new value back with [`World::insert`]; nothing is mutated in place behind
//! the change tracking's back.

use std::collections::HashSet;

use crate::components::{
    Drawable, LocalTransform, Mask, ScreenSpaceRoot, UiRect, WorldTransform,
};
use crate::interaction::{Interactable, InteractionState, StateColors};

/// Unique identifier for an entity in the world.
///
/// - `index`: position in the slot array (reusable after despawn)
/// - `generation`: version counter that increments when a slot is reused
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Entity {
    index: u32,
    generation: u32,
}

impl Entity {
    fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Hierarchy and liveness metadata for one slot.
struct Slot {
    generation: u32,
    alive: bool,
    parent: Option<Entity>,
    children: Vec<Entity>,
}

/// Sparse storage for one component type.
pub struct Column<T> {
    values: Vec<Option<T>>,
}

impl<T> Column<T> {
    fn new() -> Self {
        Self { values: Vec::new() }
    }

    fn get(&self, index: u32) -> Option<&T> {
        self.values.get(index as usize).and_then(Option::as_ref)
    }

    fn set(&mut self, index: u32, value: T) {
        let index = index as usize;
        if index >= self.values.len() {
            self.values.resize_with(index + 1, || None);
        }
        self.values[index] = Some(value);
    }

    fn take(&mut self, index: u32) -> Option<T> {
        self.values.get_mut(index as usize).and_then(Option::take)
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn occupied(&self) -> impl Iterator<Item = u32> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_some())
            .map(|(i, _)| i as u32)
    }
}

/// A type that can be stored on an entity.
pub trait Component: Clone + 'static {
    fn column(world: &World) -> &Column<Self>;
    fn column_mut(world: &mut World) -> &mut Column<Self>;
}

macro_rules! components {
    ($($ty:ty => $field:ident),* $(,)?) => {
        struct Columns {
            $($field: Column<$ty>,)*
        }

        impl Columns {
            fn new() -> Self {
                Self {
                    $($field: Column::new(),)*
                }
            }

            fn clear_slot(&mut self, index: u32) {
                $(self.$field.take(index);)*
            }

            fn clear(&mut self) {
                $(self.$field.clear();)*
            }
        }

        $(
            impl Component for $ty {
                fn column(world: &World) -> &Column<Self> {
                    &world.columns.$field
                }

                fn column_mut(world: &mut World) -> &mut Column<Self> {
                    &mut world.columns.$field
                }
            }
        )*
    };
}

components! {
    UiRect => rects,
    LocalTransform => local_transforms,
    WorldTransform => world_transforms,
    Mask => masks,
    Drawable => drawables,
    ScreenSpaceRoot => screen_roots,
    Interactable => interactables,
    InteractionState => interaction_states,
    StateColors => state_colors,
}

/// Central entity store.
pub struct World {
    slots: Vec<Slot>,
    free_indices: Vec<u32>,
    columns: Columns,
    /// Entities whose parent changed since the last drain.
    reparented: HashSet<Entity>,
}

impl World {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_indices: Vec::new(),
            columns: Columns::new(),
            reparented: HashSet::new(),
        }
    }

    /// Allocate a new entity with no components.
    pub fn spawn(&mut self) -> Entity {
        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.alive = true;
            slot.parent = None;
            slot.children.clear();
            return Entity::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            alive: true,
            parent: None,
            children: Vec::new(),
        });
        Entity::new(index, 0)
    }

    /// Remove an entity, its components and its whole subtree.
    pub fn despawn(&mut self, entity: Entity) {
        if !self.contains(entity) {
            return;
        }

        if let Some(parent) = self.slots[entity.index as usize].parent
            && self.contains(parent)
        {
            self.slots[parent.index as usize]
                .children
                .retain(|&c| c != entity);
        }

        let mut stack = vec![entity];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            let slot = &mut self.slots[current.index as usize];
            stack.extend(slot.children.drain(..));
            slot.alive = false;
            slot.parent = None;
            self.columns.clear_slot(current.index);
            self.free_indices.push(current.index);
            self.reparented.remove(&current);
        }
    }

    /// Check if an entity handle still refers to a live entity.
    pub fn contains(&self, entity: Entity) -> bool {
        self.slots
            .get(entity.index as usize)
            .is_some_and(|s| s.alive && s.generation == entity.generation)
    }

    /// Copy of a component, if present.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<T> {
        if !self.contains(entity) {
            return None;
        }
        T::column(self).get(entity.index).cloned()
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.contains(entity) && T::column(self).get(entity.index).is_some()
    }

    /// Insert or overwrite a component. Ignored for dead entities.
    pub fn insert<T: Component>(&mut self, entity: Entity, value: T) {
        if self.contains(entity) {
            T::column_mut(self).set(entity.index, value);
        }
    }

    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        if !self.contains(entity) {
            return None;
        }
        T::column_mut(self).take(entity.index)
    }

    /// Live entities carrying `T`, in slot order.
    pub fn entities_with<T: Component>(&self) -> Vec<Entity> {
        T::column(self)
            .occupied()
            .map(|index| Entity::new(index, self.slots[index as usize].generation))
            .collect()
    }

    /// Live entities carrying both `A` and `B`, in slot order.
    pub fn entities_with_both<A: Component, B: Component>(&self) -> Vec<Entity> {
        self.entities_with::<A>()
            .into_iter()
            .filter(|&e| self.has::<B>(e))
            .collect()
    }

    /// Set the parent of an entity, appending it to the parent's children.
    ///
    /// Detaches it from its previous parent first.
    pub fn set_parent(&mut self, child: Entity, parent: Entity) {
        if !self.contains(child) || !self.contains(parent) || child == parent {
            return;
        }

        if let Some(old) = self.slots[child.index as usize].parent
            && self.contains(old)
        {
            self.slots[old.index as usize].children.retain(|&c| c != child);
        }

        self.slots[child.index as usize].parent = Some(parent);
        let children = &mut self.slots[parent.index as usize].children;
        if !children.contains(&child) {
            children.push(child);
        }
        self.reparented.insert(child);
    }

    /// Detach an entity from its parent, making it the top of its own tree.
    pub fn remove_parent(&mut self, child: Entity) {
        if !self.contains(child) {
            return;
        }
        if let Some(old) = self.slots[child.index as usize].parent.take() {
            if self.contains(old) {
                self.slots[old.index as usize].children.retain(|&c| c != child);
            }
            self.reparented.insert(child);
        }
    }

    /// The stored parent reference. It may point at a despawned entity.
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        if !self.contains(entity) {
            return None;
        }
        self.slots[entity.index as usize].parent
    }

    /// Ordered children of an entity.
    pub fn children(&self, entity: Entity) -> &[Entity] {
        if !self.contains(entity) {
            return &[];
        }
        &self.slots[entity.index as usize].children
    }

    /// Take the set of entities re-parented since the last call.
    pub fn take_reparented(&mut self) -> Vec<Entity> {
        let mut changed: Vec<Entity> = self.reparented.drain().collect();
        changed.sort();
        changed
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    /// Despawn everything.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_indices.clear();
        self.columns.clear();
        self.reparented.clear();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
