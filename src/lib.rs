//! Anchor-based UI layout, hit testing and clip masking for entity scenes.
//!
//! An [`Engine`] runs a fixed set of passes over a [`World`] once per frame:
//!
//! 1. `ui_layout` solves anchored rects for dirty screen-space roots,
//! 2. `ui_transform_propagate` composes world transforms,
//! 3. `ui_render_order` assigns depth-first draw layers,
//! 4. `ui_mask` composes clip rects for masked subtrees,
//! 5. `ui_interaction` hit tests the pointer and queues events,
//! 6. `ui_visual_state` recolors drawables on interaction state changes.
//!
//! Ordering is declared through the [`Schedule`], so additional systems can be
//! slotted in with `before` / `after` constraints.
//!
//! # Example
//! ```
//! use anchorkit::prelude::*;
//!
//! let mut world = World::new();
//! let root = world.spawn();
//! world.insert(root, ScreenSpaceRoot);
//! world.insert(root, UiRect::stretch());
//! let panel = world.spawn();
//! world.insert(panel, UiRect::fixed(100.0, 50.0));
//! world.set_parent(panel, root);
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! engine.runtime_mut().set_camera(CameraInfo::orthographic(800.0, 600.0));
//! engine.frame(&mut world);
//!
//! assert_eq!(world.get::<UiRect>(panel).unwrap().width, 100.0);
//! ```

extern crate self as anchorkit;

pub mod camera;
pub mod change;
pub mod components;
pub mod error;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod mask;
pub mod propagate;
pub mod render_order;
pub mod runtime;
pub mod schedule;
pub mod transform;
pub mod world;

pub use anchorkit_macros::Tracked;
pub use change::Tracked;
pub use error::{MaskError, ScheduleError};
pub use runtime::UiRuntime;
pub use schedule::{Phase, Schedule, SystemDescriptor, SystemFn};
pub use world::{Entity, World};

use input::MouseButton;
use transform::DEFAULT_SINGULAR_EPSILON;

pub mod prelude {
    pub use crate::camera::CameraInfo;
    pub use crate::components::{
        Drawable, LocalTransform, Mask, MaskMode, ScreenSpaceRoot, UiRect, WorldTransform,
    };
    pub use crate::geometry::{Color, Rect, Vec2};
    pub use crate::input::{MouseButton, PointerInput};
    pub use crate::interaction::{
        EventKinds, EventPhase, Interactable, InteractionFlags, InteractionState, StateColors,
        UiEvent, UiEventKind, VisualState,
    };
    pub use crate::transform::{Mat4, Rotation2};
    pub use crate::{
        Engine, EngineConfig, Entity, Phase, SystemDescriptor, Tracked, UiRuntime, World,
    };
}

/// Pass names, usable as `before` / `after` targets.
pub mod systems {
    pub const LAYOUT: &str = "ui_layout";
    pub const TRANSFORM_PROPAGATE: &str = "ui_transform_propagate";
    pub const RENDER_ORDER: &str = "ui_render_order";
    pub const MASK: &str = "ui_mask";
    pub const INTERACTION: &str = "ui_interaction";
    pub const VISUAL_STATE: &str = "ui_visual_state";
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Deepest hierarchy level any walk descends to.
    pub max_depth: usize,
    /// Determinant magnitude below which a matrix counts as singular.
    pub singular_epsilon: f32,
    /// Button that presses and clicks.
    pub primary_button: MouseButton,
    /// Run the visual state pass every this many frames.
    pub visual_state_interval: u32,
    /// Viewport pixels a held press must travel before it becomes a drag.
    pub drag_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 128,
            singular_epsilon: DEFAULT_SINGULAR_EPSILON,
            primary_button: MouseButton::Left,
            visual_state_interval: 2,
            drag_threshold: 4.0,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn singular_epsilon(mut self, epsilon: f32) -> Self {
        self.singular_epsilon = epsilon;
        self
    }

    pub fn primary_button(mut self, button: MouseButton) -> Self {
        self.primary_button = button;
        self
    }

    /// Clamped to at least 1.
    pub fn visual_state_interval(mut self, frames: u32) -> Self {
        self.visual_state_interval = frames.max(1);
        self
    }

    /// Negative values are treated as zero.
    pub fn drag_threshold(mut self, pixels: f32) -> Self {
        self.drag_threshold = pixels.max(0.0);
        self
    }
}

/// Owns the schedule and the runtime of one UI instance.
pub struct Engine {
    schedule: Schedule,
    runtime: UiRuntime,
    started: bool,
}

impl Engine {
    /// Engine with the built-in passes registered and ordered.
    pub fn new(config: EngineConfig) -> Result<Self, ScheduleError> {
        let mut schedule = Schedule::new();
        for system in builtin_systems() {
            schedule.add_system(system)?;
        }
        schedule.build()?;
        Ok(Self {
            schedule,
            runtime: UiRuntime::new(config),
            started: false,
        })
    }

    /// Register an extra system and reorder. A system that cannot be ordered
    /// is not kept.
    pub fn add_system(&mut self, system: SystemDescriptor) -> Result<(), ScheduleError> {
        let name = system.name().to_string();
        self.schedule.add_system(system)?;
        if let Err(err) = self.schedule.build() {
            self.schedule.remove_system(&name);
            self.schedule.build()?;
            return Err(err);
        }
        Ok(())
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn runtime(&self) -> &UiRuntime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut UiRuntime {
        &mut self.runtime
    }

    /// Run one frame. The startup phase runs before the first one.
    pub fn frame(&mut self, world: &mut World) {
        if !self.started {
            self.schedule
                .run_phase(Phase::Startup, world, &mut self.runtime);
            self.started = true;
        }
        for phase in Phase::FRAME {
            self.schedule.run_phase(phase, world, &mut self.runtime);
        }
        self.runtime.frame += 1;
    }

    /// Tear down per-scene state. Startup runs again on the next frame.
    pub fn reset(&mut self) {
        self.runtime.reset();
        self.started = false;
    }
}

fn builtin_systems() -> Vec<SystemDescriptor> {
    use systems::*;

    vec![
        SystemDescriptor::new(LAYOUT, Phase::PreUpdate, ui_layout).before(RENDER_ORDER),
        SystemDescriptor::new(TRANSFORM_PROPAGATE, Phase::PreUpdate, ui_transform_propagate)
            .after(LAYOUT)
            .before(MASK),
        SystemDescriptor::new(RENDER_ORDER, Phase::PreUpdate, ui_render_order).before(MASK),
        SystemDescriptor::new(MASK, Phase::PreUpdate, ui_mask).before(INTERACTION),
        SystemDescriptor::new(INTERACTION, Phase::PreUpdate, ui_interaction),
        SystemDescriptor::new(VISUAL_STATE, Phase::Update, ui_visual_state),
    ]
}

fn ui_layout(world: &mut World, runtime: &mut UiRuntime) {
    runtime.layout_stats = layout::layout_pass(
        world,
        &mut runtime.change_cache,
        &runtime.camera,
        runtime.config.max_depth,
    );
}

fn ui_transform_propagate(world: &mut World, runtime: &mut UiRuntime) {
    propagate::propagate_world_transforms(world, runtime.config.max_depth);
}

fn ui_render_order(world: &mut World, runtime: &mut UiRuntime) {
    render_order::assign_render_order(world, &mut runtime.render_order, runtime.config.max_depth);
}

fn ui_mask(world: &mut World, runtime: &mut UiRuntime) {
    mask::mask_pass(
        world,
        &runtime.camera,
        &mut runtime.clips,
        runtime.config.max_depth,
    );
}

fn ui_interaction(world: &mut World, runtime: &mut UiRuntime) {
    let UiRuntime {
        config,
        camera,
        pointer,
        render_order,
        clips,
        dispatcher,
        ..
    } = runtime;
    dispatcher.dispatch(world, camera, pointer, render_order, clips, config);
}

fn ui_visual_state(world: &mut World, runtime: &mut UiRuntime) {
    let interval = u64::from(runtime.config.visual_state_interval.max(1));
    if runtime.frame % interval == 0 {
        runtime.visual_states.apply(world);
    }
}
