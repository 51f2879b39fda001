//! Headless walk-through: a masked scroll list with clickable rows.
//!
//! Run with `RUST_LOG=debug` to see the pass statistics.

use anchorkit::prelude::*;

const ROWS: usize = 12;
const ROW_HEIGHT: f32 = 40.0;

fn main() {
    env_logger::init();

    let mut world = World::new();
    let root = world.spawn();
    world.insert(root, ScreenSpaceRoot);
    world.insert(root, UiRect::stretch());

    let view = world.spawn();
    world.insert(view, UiRect::fixed(300.0, 200.0));
    world.insert(view, Mask::default());
    world.insert(
        view,
        Interactable::default()
            .raycast_target(false)
            .blocks_lower(true)
            .stop_propagation(EventKinds::SCROLL),
    );
    world.set_parent(view, root);

    let content = world.spawn();
    world.insert(
        content,
        UiRect::new()
            .anchors((0.0, 1.0), (1.0, 1.0))
            .size(0.0, ROWS as f32 * ROW_HEIGHT)
            .pivot((0.5, 1.0)),
    );
    world.set_parent(content, view);

    let colors = StateColors::new(
        Color::from_hex(0x2b2d3a),
        Color::from_hex(0x3a3d52),
        Color::from_hex(0x1e2029),
        Color::from_hex(0x555555),
    );
    let mut rows = Vec::with_capacity(ROWS);
    for i in 0..ROWS {
        let row = world.spawn();
        world.insert(
            row,
            UiRect::new()
                .anchors((0.0, 1.0), (1.0, 1.0))
                .offsets((4.0, -(i as f32) * ROW_HEIGHT), (-4.0, 0.0))
                .size(0.0, ROW_HEIGHT - 2.0)
                .pivot((0.5, 1.0)),
        );
        world.insert(row, Drawable::new(colors.normal));
        world.insert(row, Interactable::default());
        world.insert(row, colors);
        world.set_parent(row, content);
        rows.push(row);
    }

    let mut engine = match Engine::new(EngineConfig::default().visual_state_interval(1)) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("failed to build the schedule: {err}");
            return;
        }
    };
    engine
        .runtime_mut()
        .set_camera(CameraInfo::orthographic(800.0, 600.0));

    // Hover the second row, click it, then scroll.
    let mut pointer = PointerInput::at(400.0, 200.0 + ROW_HEIGHT * 1.5);
    engine.runtime_mut().set_pointer(pointer);
    engine.frame(&mut world);

    for step in 0..3 {
        pointer.move_to(pointer.position.x, pointer.position.y);
        match step {
            0 => pointer.press(MouseButton::Left),
            1 => pointer.release(MouseButton::Left),
            _ => pointer.scroll(0.0, -ROW_HEIGHT),
        }
        engine.runtime_mut().set_pointer(pointer);
        engine.frame(&mut world);
    }

    for event in engine.runtime_mut().drain_events() {
        let row = rows.iter().position(|&r| r == event.current_target);
        println!(
            "{:?} {:?} target={:?} current={:?} row={:?}",
            event.kind, event.phase, event.target, event.current_target, row
        );
    }

    // Rows below the view are clipped out of hit testing.
    let last = rows[ROWS - 1];
    println!(
        "last row clip: {:?}, layer: {:?}",
        engine.runtime().clip_for(last),
        world.get::<Drawable>(last).map(|d| d.layer)
    );
}
