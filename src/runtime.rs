//! Per-UI-instance state shared by the passes.

use crate::EngineConfig;
use crate::camera::CameraInfo;
use crate::change::ChangeCache;
use crate::input::PointerInput;
use crate::interaction::{EventQueue, InteractionDispatcher, UiEvent, VisualStateTracker};
use crate::layout::LayoutStats;
use crate::mask::ClipRegistry;
use crate::render_order::RenderOrder;
use crate::world::Entity;

/// Everything the UI passes keep between frames.
///
/// Passes receive it explicitly; there is no global state. Dropping or
/// [`reset`](UiRuntime::reset)ting it forgets every cache, the hover and press
/// tracking, the clip rects and any undrained events.
pub struct UiRuntime {
    pub(crate) config: EngineConfig,
    pub(crate) camera: CameraInfo,
    pub(crate) pointer: PointerInput,
    pub(crate) change_cache: ChangeCache,
    pub(crate) layout_stats: LayoutStats,
    pub(crate) render_order: RenderOrder,
    pub(crate) clips: ClipRegistry,
    pub(crate) dispatcher: InteractionDispatcher,
    pub(crate) visual_states: VisualStateTracker,
    pub(crate) frame: u64,
}

impl UiRuntime {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            camera: CameraInfo::default(),
            pointer: PointerInput::default(),
            change_cache: ChangeCache::new(config.max_depth),
            layout_stats: LayoutStats::default(),
            render_order: RenderOrder::default(),
            clips: ClipRegistry::default(),
            dispatcher: InteractionDispatcher::new(),
            visual_states: VisualStateTracker::default(),
            frame: 0,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Set this frame's camera. Keeps the last pointer world position.
    pub fn set_camera(&mut self, camera: CameraInfo) {
        let mouse_world = self.camera.mouse_world;
        self.camera = CameraInfo::with_epsilon(
            camera.view_projection,
            camera.viewport,
            self.config.singular_epsilon,
        );
        self.camera.mouse_world = mouse_world;
    }

    pub fn camera(&self) -> &CameraInfo {
        &self.camera
    }

    pub fn set_pointer(&mut self, pointer: PointerInput) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> &PointerInput {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut PointerInput {
        &mut self.pointer
    }

    pub fn change_cache(&self) -> &ChangeCache {
        &self.change_cache
    }

    /// Force a relayout of the tree containing `entity` on the next frame.
    pub fn mark_dirty(&mut self, world: &crate::world::World, entity: Entity) {
        self.change_cache.mark_dirty(world, entity);
    }

    pub fn layout_stats(&self) -> &LayoutStats {
        &self.layout_stats
    }

    pub fn render_order(&self) -> &RenderOrder {
        &self.render_order
    }

    pub fn clips(&self) -> &ClipRegistry {
        &self.clips
    }

    pub fn clip_for(&self, entity: Entity) -> Option<crate::geometry::Rect> {
        self.clips.clip_for(entity)
    }

    pub fn hovered(&self) -> Option<Entity> {
        self.dispatcher.hovered()
    }

    pub fn pressed(&self) -> Option<Entity> {
        self.dispatcher.pressed()
    }

    pub fn focused(&self) -> Option<Entity> {
        self.dispatcher.focused()
    }

    pub fn is_dragging(&self) -> bool {
        self.dispatcher.is_dragging()
    }

    pub fn events(&self) -> &EventQueue {
        self.dispatcher.events()
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        self.dispatcher.events_mut().drain().collect()
    }

    pub fn visual_states(&self) -> &VisualStateTracker {
        &self.visual_states
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Clear all state at scene teardown. Config and camera are kept.
    pub fn reset(&mut self) {
        self.change_cache.clear();
        self.layout_stats = LayoutStats::default();
        self.render_order.clear();
        self.clips.clear();
        self.dispatcher.reset();
        self.visual_states.clear();
        self.pointer = PointerInput::default();
        self.frame = 0;
        log::debug!("ui runtime reset");
    }
}
