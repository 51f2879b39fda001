//! Pointer events produced by the interaction pass.

use bitflags::bitflags;

use crate::geometry::Vec2;
use crate::world::Entity;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEventKind {
    HoverEnter,
    HoverExit,
    Press,
    Release,
    Click,
    /// Wheel or touchpad scroll, in logical pixels.
    Scroll(Vec2),
    /// Pointer motion since the previous frame, in viewport pixels.
    Move(Vec2),
    /// The pressed entity was dragged past the drag threshold.
    DragStart,
    /// Motion of an ongoing drag since the previous frame, in viewport pixels.
    Drag(Vec2),
    DragEnd,
    Focus,
    Blur,
}

impl UiEventKind {
    /// Only button and scroll events climb to ancestors. Everything else is
    /// delivered to its target alone.
    pub fn bubbles(&self) -> bool {
        matches!(
            self,
            UiEventKind::Press | UiEventKind::Release | UiEventKind::Click | UiEventKind::Scroll(_)
        )
    }

    /// The kind as a member of an [`EventKinds`] set.
    pub fn as_flag(&self) -> EventKinds {
        match self {
            UiEventKind::HoverEnter | UiEventKind::HoverExit => EventKinds::HOVER,
            UiEventKind::Press => EventKinds::PRESS,
            UiEventKind::Release => EventKinds::RELEASE,
            UiEventKind::Click => EventKinds::CLICK,
            UiEventKind::Scroll(_) => EventKinds::SCROLL,
            UiEventKind::Move(_) => EventKinds::MOVE,
            UiEventKind::DragStart | UiEventKind::Drag(_) | UiEventKind::DragEnd => {
                EventKinds::DRAG
            }
            UiEventKind::Focus | UiEventKind::Blur => EventKinds::FOCUS,
        }
    }
}

bitflags! {
    /// Set of event kinds, used by [`Interactable::stop_propagation`].
    ///
    /// [`Interactable::stop_propagation`]: super::Interactable::stop_propagation
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct EventKinds: u16 {
        const HOVER   = 1 << 0;
        const PRESS   = 1 << 1;
        const RELEASE = 1 << 2;
        const CLICK   = 1 << 3;
        const SCROLL  = 1 << 4;
        const MOVE    = 1 << 5;
        const DRAG    = 1 << 6;
        const FOCUS   = 1 << 7;
        /// Press, release and click.
        const BUTTON  = Self::PRESS.bits() | Self::RELEASE.bits() | Self::CLICK.bits();
    }
}

/// Where a delivered copy sits on the propagation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    /// Delivered to the entity the event is about.
    Target,
    /// Delivered to an ancestor of the target.
    Bubble,
}

/// One delivery of an event.
///
/// A bubbled event is queued once per receiving entity: `target` is the entity
/// that was hit, `current_target` the one receiving this copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiEvent {
    pub kind: UiEventKind,
    pub target: Entity,
    pub current_target: Entity,
    pub phase: EventPhase,
}

impl UiEvent {
    pub fn new(kind: UiEventKind, target: Entity) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            phase: EventPhase::Target,
        }
    }

    pub fn bubbled_to(kind: UiEventKind, target: Entity, ancestor: Entity) -> Self {
        Self {
            kind,
            target,
            current_target: ancestor,
            phase: EventPhase::Bubble,
        }
    }

    pub fn is_bubbled(&self) -> bool {
        self.phase == EventPhase::Bubble
    }
}

/// FIFO of events emitted this frame, drained by widget systems.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    events: Vec<UiEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: UiEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &UiEvent> {
        self.events.iter()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiEvent> {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
