//! Pointer hit testing and the hover / press / click state machine.
//!
//! Once per frame the dispatcher projects the pointer into world space, picks
//! the topmost enabled raycast target under it and diffs the result against the
//! previous frame. Press, release, click and scroll events bubble from the hit
//! entity to its ancestors; hover, motion, drag and focus changes stay on the
//! entity.
//!
//! # Example
//! ```
//! use anchorkit::prelude::*;
//!
//! let mut world = World::new();
//! let root = world.spawn();
//! world.insert(root, ScreenSpaceRoot);
//! world.insert(root, UiRect::stretch());
//! let button = world.spawn();
//! world.insert(button, UiRect::fixed(100.0, 40.0));
//! world.insert(button, Interactable::default());
//! world.set_parent(button, root);
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! engine.runtime_mut().set_camera(CameraInfo::orthographic(800.0, 600.0));
//! engine.runtime_mut().set_pointer(PointerInput::at(400.0, 300.0));
//! engine.frame(&mut world);
//!
//! assert_eq!(engine.runtime().hovered(), Some(button));
//! ```

pub mod events;
pub mod visual;

pub use events::{EventKinds, EventPhase, EventQueue, UiEvent, UiEventKind};
pub use visual::{StateColors, VisualState, VisualStateTracker};

use std::collections::HashSet;

use bitflags::bitflags;

use crate::EngineConfig;
use crate::camera::CameraInfo;
use crate::components::{UiRect, WorldTransform};
use crate::geometry::Vec2;
use crate::input::PointerInput;
use crate::mask::ClipRegistry;
use crate::render_order::RenderOrder;
use crate::transform::point_in_obb;
use crate::world::{Entity, World};

/// Pointer policy of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interactable {
    pub enabled: bool,
    /// Stops bubbling at this entity when it is an ancestor of the hit.
    pub blocks_lower: bool,
    /// Whether the entity can be hit at all.
    pub raycast_target: bool,
    /// Bubbling events of these kinds go no further than this entity.
    pub stop_propagation: EventKinds,
    /// Takes focus when pressed.
    pub focusable: bool,
    /// Receives drag events while pressed.
    pub draggable: bool,
    /// Receives `Move` events while hovered or pressed.
    pub tracks_motion: bool,
}

impl Default for Interactable {
    fn default() -> Self {
        Self {
            enabled: true,
            blocks_lower: false,
            raycast_target: true,
            stop_propagation: EventKinds::empty(),
            focusable: false,
            draggable: false,
            tracks_motion: false,
        }
    }
}

impl Interactable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn blocks_lower(mut self, blocks: bool) -> Self {
        self.blocks_lower = blocks;
        self
    }

    pub fn raycast_target(mut self, target: bool) -> Self {
        self.raycast_target = target;
        self
    }

    pub fn stop_propagation(mut self, kinds: EventKinds) -> Self {
        self.stop_propagation = kinds;
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn tracks_motion(mut self, tracks: bool) -> Self {
        self.tracks_motion = tracks;
        self
    }

    fn accepts_hits(&self) -> bool {
        self.enabled && self.raycast_target
    }
}

bitflags! {
    /// Pointer state bits of an interactable entity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct InteractionFlags: u8 {
        const HOVERED       = 0b0_0001;
        const PRESSED       = 0b0_0010;
        /// Set for the frame the press started.
        const JUST_PRESSED  = 0b0_0100;
        /// Set for the frame the press ended.
        const JUST_RELEASED = 0b0_1000;
        const FOCUSED       = 0b1_0000;
    }
}

/// Per-entity pointer state written by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub flags: InteractionFlags,
}

impl InteractionState {
    pub fn hovered(&self) -> bool {
        self.flags.contains(InteractionFlags::HOVERED)
    }

    pub fn pressed(&self) -> bool {
        self.flags.contains(InteractionFlags::PRESSED)
    }

    pub fn just_pressed(&self) -> bool {
        self.flags.contains(InteractionFlags::JUST_PRESSED)
    }

    pub fn just_released(&self) -> bool {
        self.flags.contains(InteractionFlags::JUST_RELEASED)
    }

    pub fn focused(&self) -> bool {
        self.flags.contains(InteractionFlags::FOCUSED)
    }
}

/// Hover, press, focus and drag tracking plus the frame's event queue.
#[derive(Debug, Default)]
pub struct InteractionDispatcher {
    hovered: Option<Entity>,
    pressed: Option<Entity>,
    focused: Option<Entity>,
    /// Viewport position seen by the previous dispatch.
    last_pointer: Option<Vec2>,
    /// Viewport position of the current press.
    press_origin: Vec2,
    dragging: bool,
    events: EventQueue,
}

impl InteractionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<Entity> {
        self.hovered
    }

    pub fn pressed(&self) -> Option<Entity> {
        self.pressed
    }

    pub fn focused(&self) -> Option<Entity> {
        self.focused
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Run one frame of hit testing and event dispatch.
    ///
    /// `order` provides the scan order and layers, `clips` the propagated clip
    /// rects. Updates `camera.mouse_world`.
    pub fn dispatch(
        &mut self,
        world: &mut World,
        camera: &mut CameraInfo,
        input: &PointerInput,
        order: &RenderOrder,
        clips: &ClipRegistry,
        config: &EngineConfig,
    ) {
        let primary = config.primary_button;
        let max_depth = config.max_depth;

        if self.hovered.is_some_and(|e| !world.contains(e)) {
            self.hovered = None;
        }
        if self.pressed.is_some_and(|e| !world.contains(e)) {
            self.pressed = None;
            self.dragging = false;
        }
        if self.focused.is_some_and(|e| !world.contains(e)) {
            self.focused = None;
        }

        clear_just_flags(world);

        let screen = input.physical_position();
        let motion = self.last_pointer.map_or(Vec2::ZERO, |last| screen - last);
        self.last_pointer = Some(screen);

        camera.mouse_world = camera.screen_to_world(screen);
        let hit = if camera.is_degenerate() {
            None
        } else {
            hit_test(world, camera.mouse_world, screen, order, clips)
        };

        if hit != self.hovered {
            if let Some(old) = self.hovered {
                update_flags(world, old, |f| f.remove(InteractionFlags::HOVERED));
                self.events.push(UiEvent::new(UiEventKind::HoverExit, old));
            }
            if let Some(new) = hit {
                update_flags(world, new, |f| f.insert(InteractionFlags::HOVERED));
                self.events.push(UiEvent::new(UiEventKind::HoverEnter, new));
            }
            self.hovered = hit;
        }

        if input.just_pressed(primary) {
            match hit {
                Some(target) => {
                    self.pressed = Some(target);
                    self.press_origin = screen;
                    self.dragging = false;
                    update_flags(world, target, |f| {
                        f.insert(InteractionFlags::PRESSED | InteractionFlags::JUST_PRESSED)
                    });
                    if policy(world, target).is_some_and(|p| p.focusable) {
                        self.set_focus(world, Some(target));
                    }
                    self.emit(world, UiEventKind::Press, target, max_depth);
                }
                None => self.set_focus(world, None),
            }
        }

        if motion != Vec2::ZERO {
            self.dispatch_motion(world, input, config, screen, motion);
        }

        if input.just_released(primary)
            && let Some(target) = self.pressed.take()
        {
            update_flags(world, target, |f| {
                f.remove(InteractionFlags::PRESSED);
                f.insert(InteractionFlags::JUST_RELEASED);
            });
            self.emit(world, UiEventKind::Release, target, max_depth);
            if std::mem::take(&mut self.dragging) {
                self.events.push(UiEvent::new(UiEventKind::DragEnd, target));
            }
            if hit == Some(target) {
                self.emit(world, UiEventKind::Click, target, max_depth);
            }
        }

        if input.scroll_delta != Vec2::ZERO
            && let Some(target) = self.hovered
        {
            self.emit(world, UiEventKind::Scroll(input.scroll_delta), target, max_depth);
        }
    }

    /// `Move` to the pressed (else hovered) entity, and drag tracking for a
    /// held press.
    fn dispatch_motion(
        &mut self,
        world: &World,
        input: &PointerInput,
        config: &EngineConfig,
        screen: Vec2,
        motion: Vec2,
    ) {
        if let Some(receiver) = self.pressed.or(self.hovered)
            && policy(world, receiver).is_some_and(|p| p.tracks_motion)
        {
            self.events.push(UiEvent::new(UiEventKind::Move(motion), receiver));
        }

        let Some(target) = self.pressed else {
            return;
        };
        if !input.is_held(config.primary_button)
            || !policy(world, target).is_some_and(|p| p.draggable)
        {
            return;
        }
        if self.dragging {
            self.events.push(UiEvent::new(UiEventKind::Drag(motion), target));
        } else if (screen - self.press_origin).length() >= config.drag_threshold {
            log::trace!("drag started on {target:?}");
            self.dragging = true;
            self.events.push(UiEvent::new(UiEventKind::DragStart, target));
        }
    }

    /// Move focus, emitting `Blur` on the old holder and `Focus` on the new one.
    fn set_focus(&mut self, world: &mut World, focus: Option<Entity>) {
        if self.focused == focus {
            return;
        }
        if let Some(old) = self.focused.take() {
            update_flags(world, old, |f| f.remove(InteractionFlags::FOCUSED));
            self.events.push(UiEvent::new(UiEventKind::Blur, old));
        }
        if let Some(new) = focus {
            update_flags(world, new, |f| f.insert(InteractionFlags::FOCUSED));
            self.events.push(UiEvent::new(UiEventKind::Focus, new));
        }
        self.focused = focus;
    }

    /// Queue `kind` for `target`, then, for kinds that bubble, for each
    /// enabled interactable ancestor.
    ///
    /// Propagation ends after an entity whose `stop_propagation` covers the
    /// kind, or after the first ancestor that blocks lower raycasts.
    fn emit(&mut self, world: &World, kind: UiEventKind, target: Entity, max_depth: usize) {
        self.events.push(UiEvent::new(kind, target));
        if !kind.bubbles() || stops(policy(world, target), kind) {
            return;
        }

        let mut current = world.parent(target);
        let mut depth = 0;
        while let Some(ancestor) = current {
            if !world.contains(ancestor) {
                break;
            }
            if depth >= max_depth {
                log::warn!("{kind:?} from {target:?} stopped bubbling at depth {depth}");
                break;
            }
            if let Some(policy) = world.get::<Interactable>(ancestor)
                && policy.enabled
            {
                self.events
                    .push(UiEvent::bubbled_to(kind, target, ancestor));
                if policy.blocks_lower || stops(Some(policy), kind) {
                    break;
                }
            }
            current = world.parent(ancestor);
            depth += 1;
        }
    }
}

fn policy(world: &World, entity: Entity) -> Option<Interactable> {
    world.get::<Interactable>(entity)
}

fn stops(policy: Option<Interactable>, kind: UiEventKind) -> bool {
    policy.is_some_and(|p| p.stop_propagation.contains(kind.as_flag()))
}

/// Topmost hit under the pointer.
///
/// Candidates are scanned in render traversal order, then any interactable
/// outside a screen-space tree in slot order. The highest layer wins; on equal
/// layers the later candidate wins.
pub fn hit_test(
    world: &World,
    mouse_world: Vec2,
    screen: Vec2,
    order: &RenderOrder,
    clips: &ClipRegistry,
) -> Option<Entity> {
    let visited: HashSet<Entity> = order.traversal().iter().copied().collect();
    let strays = world
        .entities_with::<Interactable>()
        .into_iter()
        .filter(|e| !visited.contains(e));

    let mut best: Option<(Entity, Option<u32>)> = None;
    for entity in order.traversal().iter().copied().chain(strays) {
        if !world
            .get::<Interactable>(entity)
            .is_some_and(|i| i.accepts_hits())
        {
            continue;
        }
        if let Some(clip) = clips.clip_for(entity)
            && !clip.contains(screen.x, screen.y)
        {
            continue;
        }
        let (Some(rect), Some(transform)) = (
            world.get::<UiRect>(entity),
            world.get::<WorldTransform>(entity),
        ) else {
            continue;
        };
        if !point_in_obb(mouse_world, &transform.oriented_rect(&rect)) {
            continue;
        }

        let layer = order.layer_of(entity);
        match best {
            Some((_, best_layer)) if layer < best_layer => {}
            _ => best = Some((entity, layer)),
        }
    }
    best.map(|(entity, _)| entity)
}

fn clear_just_flags(world: &mut World) {
    let just = InteractionFlags::JUST_PRESSED | InteractionFlags::JUST_RELEASED;
    for entity in world.entities_with::<InteractionState>() {
        if let Some(mut state) = world.get::<InteractionState>(entity)
            && state.flags.intersects(just)
        {
            state.flags.remove(just);
            world.insert(entity, state);
        }
    }
}

fn update_flags(world: &mut World, entity: Entity, f: impl FnOnce(&mut InteractionFlags)) {
    let mut state = world.get::<InteractionState>(entity).unwrap_or_default();
    f(&mut state.flags);
    world.insert(entity, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Drawable, ScreenSpaceRoot};
    use crate::input::MouseButton;
    use crate::render_order::assign_render_order;

    /// Root covering the screen with two overlapping 100x100 buttons at the
    /// world origin, `a` drawn before `b`.
    fn scene() -> (World, Entity, Entity, Entity) {
        let mut world = World::new();
        let root = world.spawn();
        world.insert(root, ScreenSpaceRoot);
        world.insert(root, UiRect::stretch());
        let a = world.spawn();
        let b = world.spawn();
        for e in [root, a, b] {
            let mut rect = if e == root {
                UiRect::stretch()
            } else {
                UiRect::fixed(100.0, 100.0)
            };
            rect.width = if e == root { 800.0 } else { 100.0 };
            rect.height = if e == root { 600.0 } else { 100.0 };
            world.insert(e, rect);
            world.insert(e, WorldTransform::default());
        }
        for e in [a, b] {
            world.insert(e, Interactable::default());
            world.insert(e, Drawable::default());
            world.set_parent(e, root);
        }
        (world, root, a, b)
    }

    fn order(world: &mut World) -> RenderOrder {
        let mut order = RenderOrder::default();
        assign_render_order(world, &mut order, 64);
        order
    }

    #[test]
    fn test_hit_prefers_higher_layer() {
        let (mut world, _, a, b) = scene();
        let order = order(&mut world);
        let hit = hit_test(&world, Vec2::ZERO, Vec2::new(400.0, 300.0), &order, &ClipRegistry::default());
        assert_eq!(hit, Some(b));

        world.insert(b, Interactable::default().raycast_target(false));
        let hit = hit_test(&world, Vec2::ZERO, Vec2::new(400.0, 300.0), &order, &ClipRegistry::default());
        assert_eq!(hit, Some(a));
    }

    #[test]
    fn test_equal_layers_go_to_later_entity() {
        let (mut world, _, a, b) = scene();
        world.remove::<Drawable>(a);
        world.remove::<Drawable>(b);
        let order = order(&mut world);
        assert_eq!(order.layer_of(a), order.layer_of(b));

        let hit = hit_test(&world, Vec2::ZERO, Vec2::new(400.0, 300.0), &order, &ClipRegistry::default());
        assert_eq!(hit, Some(b));
    }

    #[test]
    fn test_miss_outside_rect() {
        let (mut world, _, _, _) = scene();
        let order = order(&mut world);
        let hit = hit_test(
            &world,
            Vec2::new(60.0, 0.0),
            Vec2::new(460.0, 300.0),
            &order,
            &ClipRegistry::default(),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_disabled_ancestor_is_skipped_when_bubbling() {
        let (mut world, root, a, _) = scene();
        let middle = world.spawn();
        world.set_parent(middle, root);
        world.set_parent(a, middle);
        world.insert(middle, Interactable::default().enabled(false));
        world.insert(root, Interactable::default());

        let mut dispatcher = InteractionDispatcher::new();
        dispatcher.emit(&world, UiEventKind::Press, a, 64);

        let receivers: Vec<Entity> = dispatcher.events().iter().map(|e| e.current_target).collect();
        assert_eq!(receivers, vec![a, root]);
    }

    #[test]
    fn test_stop_propagation_is_per_kind() {
        let (mut world, root, a, _) = scene();
        let middle = world.spawn();
        world.set_parent(middle, root);
        world.set_parent(a, middle);
        world.insert(
            middle,
            Interactable::default().stop_propagation(EventKinds::SCROLL),
        );
        world.insert(root, Interactable::default());

        let mut dispatcher = InteractionDispatcher::new();
        dispatcher.emit(&world, UiEventKind::Scroll(Vec2::new(0.0, -1.0)), a, 64);
        let receivers: Vec<Entity> = dispatcher.events().iter().map(|e| e.current_target).collect();
        assert_eq!(receivers, vec![a, middle]);

        dispatcher.events_mut().clear();
        dispatcher.emit(&world, UiEventKind::Click, a, 64);
        let phases: Vec<(Entity, EventPhase)> = dispatcher
            .events()
            .iter()
            .map(|e| (e.current_target, e.phase))
            .collect();
        assert_eq!(
            phases,
            vec![
                (a, EventPhase::Target),
                (middle, EventPhase::Bubble),
                (root, EventPhase::Bubble)
            ]
        );
    }

    #[test]
    fn test_target_can_keep_its_events() {
        let (mut world, root, a, _) = scene();
        world.insert(root, Interactable::default());
        world.insert(a, Interactable::default().stop_propagation(EventKinds::BUTTON));

        let mut dispatcher = InteractionDispatcher::new();
        dispatcher.emit(&world, UiEventKind::Press, a, 64);
        dispatcher.emit(&world, UiEventKind::Scroll(Vec2::new(0.0, 1.0)), a, 64);
        let receivers: Vec<Entity> = dispatcher.events().iter().map(|e| e.current_target).collect();
        assert_eq!(receivers, vec![a, a, root]);
    }

    #[test]
    fn test_hover_events_never_climb() {
        let (mut world, root, a, _) = scene();
        world.insert(root, Interactable::default());

        let mut dispatcher = InteractionDispatcher::new();
        dispatcher.emit(&world, UiEventKind::HoverEnter, a, 64);
        assert_eq!(dispatcher.events().len(), 1);
    }

    fn step(
        dispatcher: &mut InteractionDispatcher,
        world: &mut World,
        input: &PointerInput,
    ) -> Vec<UiEventKind> {
        let mut camera = CameraInfo::orthographic(800.0, 600.0);
        let ord = order(world);
        let config = EngineConfig::default();
        dispatcher.dispatch(world, &mut camera, input, &ord, &ClipRegistry::default(), &config);
        dispatcher.events_mut().drain().map(|e| e.kind).collect()
    }

    #[test]
    fn test_drag_needs_threshold_and_ends_on_release() {
        let (mut world, _, _, b) = scene();
        world.insert(b, Interactable::default().draggable(true));
        let mut dispatcher = InteractionDispatcher::new();

        let mut input = PointerInput::at(400.0, 300.0);
        input.press(MouseButton::Left);
        assert_eq!(
            step(&mut dispatcher, &mut world, &input),
            vec![UiEventKind::HoverEnter, UiEventKind::Press]
        );

        input.move_to(402.0, 300.0);
        assert!(step(&mut dispatcher, &mut world, &input).is_empty());
        assert!(!dispatcher.is_dragging());

        input.move_to(410.0, 300.0);
        assert_eq!(step(&mut dispatcher, &mut world, &input), vec![UiEventKind::DragStart]);

        input.move_to(420.0, 300.0);
        assert_eq!(
            step(&mut dispatcher, &mut world, &input),
            vec![UiEventKind::Drag(Vec2::new(10.0, 0.0))]
        );

        input.move_to(420.0, 300.0);
        input.release(MouseButton::Left);
        assert_eq!(
            step(&mut dispatcher, &mut world, &input),
            vec![UiEventKind::Release, UiEventKind::DragEnd, UiEventKind::Click]
        );
        assert!(!dispatcher.is_dragging());
    }

    #[test]
    fn test_undraggable_press_emits_no_drag() {
        let (mut world, _, _, _) = scene();
        let mut dispatcher = InteractionDispatcher::new();

        let mut input = PointerInput::at(400.0, 300.0);
        input.press(MouseButton::Left);
        step(&mut dispatcher, &mut world, &input);

        input.move_to(430.0, 300.0);
        assert!(step(&mut dispatcher, &mut world, &input).is_empty());
    }

    #[test]
    fn test_motion_goes_to_tracking_hovered_entity() {
        let (mut world, _, _, b) = scene();
        world.insert(b, Interactable::default().tracks_motion(true));
        let mut dispatcher = InteractionDispatcher::new();

        let mut input = PointerInput::at(400.0, 300.0);
        assert_eq!(step(&mut dispatcher, &mut world, &input), vec![UiEventKind::HoverEnter]);

        input.move_to(405.0, 297.0);
        assert_eq!(
            step(&mut dispatcher, &mut world, &input),
            vec![UiEventKind::Move(Vec2::new(5.0, -3.0))]
        );

        assert!(step(&mut dispatcher, &mut world, &input).is_empty());
    }

    #[test]
    fn test_focus_follows_press_and_blurs_on_empty_space() {
        let (mut world, _, a, b) = scene();
        world.insert(b, Interactable::default().focusable(true));
        let mut dispatcher = InteractionDispatcher::new();

        let mut input = PointerInput::at(400.0, 300.0);
        input.press(MouseButton::Left);
        assert_eq!(
            step(&mut dispatcher, &mut world, &input),
            vec![UiEventKind::HoverEnter, UiEventKind::Focus, UiEventKind::Press]
        );
        assert_eq!(dispatcher.focused(), Some(b));
        assert!(world.get::<InteractionState>(b).unwrap().focused());

        input.move_to(400.0, 300.0);
        input.release(MouseButton::Left);
        step(&mut dispatcher, &mut world, &input);
        assert_eq!(dispatcher.focused(), Some(b));

        // A press on something unfocusable leaves focus alone.
        world.remove::<Interactable>(b);
        input.move_to(400.0, 300.0);
        input.press(MouseButton::Left);
        let kinds = step(&mut dispatcher, &mut world, &input);
        assert!(!kinds.contains(&UiEventKind::Blur));
        assert_eq!(dispatcher.pressed(), Some(a));
        world.insert(b, Interactable::default().focusable(true));

        input.move_to(10.0, 10.0);
        input.release(MouseButton::Left);
        step(&mut dispatcher, &mut world, &input);
        input.move_to(10.0, 10.0);
        input.press(MouseButton::Left);
        let kinds = step(&mut dispatcher, &mut world, &input);
        assert!(kinds.contains(&UiEventKind::Blur));
        assert_eq!(dispatcher.focused(), None);
        assert!(!world.get::<InteractionState>(b).unwrap().focused());
    }

    #[test]
    fn test_despawned_hover_is_dropped_silently() {
        let (mut world, _, _, b) = scene();
        let mut camera = CameraInfo::orthographic(800.0, 600.0);
        let mut dispatcher = InteractionDispatcher::new();
        let config = EngineConfig::default();
        let input = PointerInput::at(400.0, 300.0);

        let ord = order(&mut world);
        dispatcher.dispatch(&mut world, &mut camera, &input, &ord, &ClipRegistry::default(), &config);
        assert_eq!(dispatcher.hovered(), Some(b));
        dispatcher.events_mut().clear();

        world.despawn(b);
        let ord = order(&mut world);
        let far = PointerInput::at(0.0, 0.0);
        dispatcher.dispatch(&mut world, &mut camera, &far, &ord, &ClipRegistry::default(), &config);
        assert_eq!(dispatcher.hovered(), None);
        assert!(dispatcher.events().is_empty());
    }

    #[test]
    fn test_just_flags_last_one_frame() {
        let (mut world, _, _, b) = scene();
        let mut camera = CameraInfo::orthographic(800.0, 600.0);
        let mut dispatcher = InteractionDispatcher::new();
        let ord = order(&mut world);
        let clips = ClipRegistry::default();
        let config = EngineConfig::default();

        let mut input = PointerInput::at(400.0, 300.0);
        input.press(MouseButton::Left);
        dispatcher.dispatch(&mut world, &mut camera, &input, &ord, &clips, &config);
        let state = world.get::<InteractionState>(b).unwrap();
        assert!(state.hovered() && state.pressed() && state.just_pressed());

        input.move_to(400.0, 300.0);
        dispatcher.dispatch(&mut world, &mut camera, &input, &ord, &clips, &config);
        let state = world.get::<InteractionState>(b).unwrap();
        assert!(state.pressed() && !state.just_pressed());

        input.release(MouseButton::Left);
        dispatcher.dispatch(&mut world, &mut camera, &input, &ord, &clips, &config);
        let state = world.get::<InteractionState>(b).unwrap();
        assert!(!state.pressed() && state.just_released());
    }

    #[test]
    fn test_secondary_button_does_not_press() {
        let (mut world, _, _, _) = scene();
        let mut camera = CameraInfo::orthographic(800.0, 600.0);
        let mut dispatcher = InteractionDispatcher::new();
        let ord = order(&mut world);
        let config = EngineConfig::default();

        let mut input = PointerInput::at(400.0, 300.0);
        input.press(MouseButton::Right);
        dispatcher.dispatch(&mut world, &mut camera, &input, &ord, &ClipRegistry::default(), &config);
        assert_eq!(dispatcher.pressed(), None);
    }
}
