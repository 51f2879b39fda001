//! Field snapshots for cheap "did anything observable change" checks.
//!
//! A [`FieldTracker`] holds a fixed list of named extractors. `take` captures
//! the current values of a source, `changed` compares a snapshot against the
//! source in O(fields) and `update` refreshes a snapshot in place.

use crate::geometry::Vec2;

/// A single extracted value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Number(f32),
    Flag(bool),
    Pair(f32, f32),
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f32)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value as f32)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec2> for FieldValue {
    fn from(value: Vec2) -> Self {
        FieldValue::Pair(value.x, value.y)
    }
}

/// A named extractor over a source type.
pub struct Field<T> {
    pub name: &'static str,
    extract: fn(&T) -> FieldValue,
}

impl<T> Field<T> {
    pub const fn new(name: &'static str, extract: fn(&T) -> FieldValue) -> Self {
        Self { name, extract }
    }

    pub fn read(&self, source: &T) -> FieldValue {
        (self.extract)(source)
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            extract: self.extract,
        }
    }
}

/// Types with a derived extractor list. Use `#[derive(Tracked)]` with `#[track]`
/// on the fields that should participate.
pub trait Tracked: Sized {
    fn tracked_fields() -> Vec<Field<Self>>;
}

/// Values captured by [`FieldTracker::take`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    values: Vec<FieldValue>,
}

impl Snapshot {
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }
}

pub struct FieldTracker<T> {
    fields: Vec<Field<T>>,
}

impl<T> FieldTracker<T> {
    pub fn new(fields: Vec<Field<T>>) -> Self {
        Self { fields }
    }

    pub fn take(&self, source: &T) -> Snapshot {
        Snapshot {
            values: self.fields.iter().map(|f| f.read(source)).collect(),
        }
    }

    /// True if any tracked field differs from the snapshot.
    pub fn changed(&self, snapshot: &Snapshot, source: &T) -> bool {
        if snapshot.values.len() != self.fields.len() {
            return true;
        }
        self.fields
            .iter()
            .zip(&snapshot.values)
            .any(|(field, old)| field.read(source) != *old)
    }

    /// Names of the fields that differ from the snapshot.
    pub fn changed_fields(&self, snapshot: &Snapshot, source: &T) -> Vec<&'static str> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(i, field)| snapshot.values.get(*i) != Some(&field.read(source)))
            .map(|(_, field)| field.name)
            .collect()
    }

    pub fn update(&self, snapshot: &mut Snapshot, source: &T) {
        snapshot.values.clear();
        snapshot
            .values
            .extend(self.fields.iter().map(|f| f.read(source)));
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

impl<T: Tracked> FieldTracker<T> {
    /// Tracker over the fields marked `#[track]`.
    pub fn derived() -> Self {
        Self::new(T::tracked_fields())
    }
}
