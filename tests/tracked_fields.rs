use anchorkit::Tracked;
use anchorkit::change::{FieldTracker, FieldValue};
use anchorkit::components::UiRect;
use anchorkit::geometry::Vec2;

#[derive(Clone, Tracked)]
struct SliderFill {
    #[track]
    value: f32,
    #[track]
    vertical: bool,
    label: String,
}

fn fill() -> SliderFill {
    SliderFill {
        value: 0.25,
        vertical: false,
        label: "volume".into(),
    }
}

#[test]
fn test_derived_field_names() {
    let tracker = FieldTracker::<SliderFill>::derived();
    let names: Vec<_> = tracker.field_names().collect();
    assert_eq!(names, vec!["value", "vertical"]);
}

#[test]
fn test_snapshot_values() {
    let tracker = FieldTracker::<SliderFill>::derived();
    let snapshot = tracker.take(&fill());
    assert_eq!(
        snapshot.values(),
        &[FieldValue::Number(0.25), FieldValue::Flag(false)]
    );
}

#[test]
fn test_untracked_field_does_not_count() {
    let tracker = FieldTracker::<SliderFill>::derived();
    let mut source = fill();
    let snapshot = tracker.take(&source);

    source.label = "balance".into();
    assert!(!tracker.changed(&snapshot, &source));
    assert_eq!(source.label, "balance");
}

#[test]
fn test_tracked_field_change_is_reported() {
    let tracker = FieldTracker::<SliderFill>::derived();
    let mut source = fill();
    let mut snapshot = tracker.take(&source);

    source.value = 0.75;
    assert!(tracker.changed(&snapshot, &source));
    assert_eq!(tracker.changed_fields(&snapshot, &source), vec!["value"]);

    tracker.update(&mut snapshot, &source);
    assert!(!tracker.changed(&snapshot, &source));
}

// Generic and pub structs derive too.
#[derive(Clone, Tracked)]
pub struct Tagged<T: Clone> {
    #[track]
    pub offset: Vec2,
    pub tag: T,
}

#[test]
fn test_generic_struct() {
    let tracker = FieldTracker::<Tagged<&'static str>>::derived();
    let mut source = Tagged {
        offset: Vec2::new(1.0, 2.0),
        tag: "a",
    };
    let snapshot = tracker.take(&source);
    source.tag = "b";
    assert!(!tracker.changed(&snapshot, &source));
    source.offset.y = 3.0;
    assert!(tracker.changed(&snapshot, &source));
}

#[test]
fn test_ui_rect_tracks_inputs_only() {
    let tracker = FieldTracker::<UiRect>::derived();
    let names: Vec<_> = tracker.field_names().collect();
    assert_eq!(
        names,
        vec![
            "anchor_min",
            "anchor_max",
            "offset_min",
            "offset_max",
            "size",
            "pivot",
            "layout_managed"
        ]
    );

    let mut rect = UiRect::stretch();
    let snapshot = tracker.take(&rect);
    rect.width = 640.0;
    rect.height = 480.0;
    assert!(!tracker.changed(&snapshot, &rect));
}
