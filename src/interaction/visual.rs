//! Designer colors per interaction state.
//!
//! The visual pass derives a [`VisualState`] for every entity carrying
//! [`StateColors`] and writes the matching color to the target drawable. Writes
//! only happen when the state changes or the entity is seen for the first time,
//! so colors set by other systems survive while nothing changes.

use std::collections::HashMap;

use super::{Interactable, InteractionState};
use crate::components::Drawable;
use crate::geometry::Color;
use crate::world::{Entity, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisualState {
    #[default]
    Normal,
    Hovered,
    Pressed,
    Disabled,
}

impl VisualState {
    /// Disabled wins over pressed, pressed over hovered.
    pub fn derive(policy: Option<&Interactable>, state: Option<&InteractionState>) -> Self {
        if policy.is_some_and(|p| !p.enabled) {
            return VisualState::Disabled;
        }
        match state {
            Some(s) if s.pressed() => VisualState::Pressed,
            Some(s) if s.hovered() => VisualState::Hovered,
            _ => VisualState::Normal,
        }
    }
}

/// Colors for each visual state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateColors {
    pub normal: Color,
    pub hovered: Color,
    pub pressed: Color,
    pub disabled: Color,
    /// Drawable to recolor. Defaults to the entity itself.
    pub target: Option<Entity>,
}

impl StateColors {
    pub fn new(normal: Color, hovered: Color, pressed: Color, disabled: Color) -> Self {
        Self {
            normal,
            hovered,
            pressed,
            disabled,
            target: None,
        }
    }

    pub fn target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn color_for(&self, state: VisualState) -> Color {
        match state {
            VisualState::Normal => self.normal,
            VisualState::Hovered => self.hovered,
            VisualState::Pressed => self.pressed,
            VisualState::Disabled => self.disabled,
        }
    }
}

/// Last applied state per entity.
#[derive(Debug, Default)]
pub struct VisualStateTracker {
    applied: HashMap<Entity, VisualState>,
}

impl VisualStateTracker {
    pub fn state_of(&self, entity: Entity) -> Option<VisualState> {
        self.applied.get(&entity).copied()
    }

    pub fn clear(&mut self) {
        self.applied.clear();
    }

    /// Apply colors for changed states. Returns the number of drawables written.
    pub fn apply(&mut self, world: &mut World) -> usize {
        self.applied
            .retain(|&e, _| world.contains(e) && world.has::<StateColors>(e));

        let mut written = 0;
        for entity in world.entities_with::<StateColors>() {
            let Some(colors) = world.get::<StateColors>(entity) else {
                continue;
            };
            let state = VisualState::derive(
                world.get::<Interactable>(entity).as_ref(),
                world.get::<InteractionState>(entity).as_ref(),
            );
            if self.applied.get(&entity) == Some(&state) {
                continue;
            }
            self.applied.insert(entity, state);

            let target = colors.target.unwrap_or(entity);
            if let Some(mut drawable) = world.get::<Drawable>(target) {
                drawable.color = colors.color_for(state);
                world.insert(target, drawable);
                written += 1;
            }
        }
        if written > 0 {
            log::trace!("[visual state] recolored {written} drawables");
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionFlags;

    fn colors() -> StateColors {
        StateColors::new(
            Color::rgb(0.2, 0.2, 0.2),
            Color::rgb(0.4, 0.4, 0.4),
            Color::rgb(0.1, 0.1, 0.1),
            Color::rgb(0.5, 0.5, 0.5),
        )
    }

    #[test]
    fn test_derive_precedence() {
        let pressed = InteractionState {
            flags: InteractionFlags::HOVERED | InteractionFlags::PRESSED,
        };
        assert_eq!(VisualState::derive(None, Some(&pressed)), VisualState::Pressed);
        assert_eq!(
            VisualState::derive(Some(&Interactable::default().enabled(false)), Some(&pressed)),
            VisualState::Disabled
        );
        assert_eq!(VisualState::derive(None, None), VisualState::Normal);
    }

    #[test]
    fn test_writes_only_on_transition() {
        let mut world = World::new();
        let e = world.spawn();
        world.insert(e, colors());
        world.insert(e, Drawable::new(Color::WHITE));

        let mut tracker = VisualStateTracker::default();
        assert_eq!(tracker.apply(&mut world), 1);
        assert_eq!(world.get::<Drawable>(e).unwrap().color, colors().normal);

        // Overwritten elsewhere, no transition: left alone.
        world.insert(e, Drawable::new(Color::BLACK));
        assert_eq!(tracker.apply(&mut world), 0);
        assert_eq!(world.get::<Drawable>(e).unwrap().color, Color::BLACK);

        world.insert(
            e,
            InteractionState {
                flags: InteractionFlags::HOVERED,
            },
        );
        assert_eq!(tracker.apply(&mut world), 1);
        assert_eq!(world.get::<Drawable>(e).unwrap().color, colors().hovered);
        assert_eq!(tracker.state_of(e), Some(VisualState::Hovered));
    }

    #[test]
    fn test_recolors_target_drawable() {
        let mut world = World::new();
        let button = world.spawn();
        let background = world.spawn();
        world.insert(background, Drawable::new(Color::WHITE));
        world.insert(button, colors().target(background));
        world.insert(button, Interactable::default().enabled(false));

        let mut tracker = VisualStateTracker::default();
        tracker.apply(&mut world);
        assert_eq!(world.get::<Drawable>(background).unwrap().color, colors().disabled);
    }
}
