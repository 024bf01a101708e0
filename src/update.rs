//! Translation of a partial update into field-level store instructions.
//!
//! A naive merge would replace a nested object wholesale, silently erasing
//! sibling fields the caller never mentioned. Instead, every explicitly-set
//! leaf is flattened into a dotted field path (`sepal.width`) so the store
//! only ever touches what the request supplied.

use serde_json::Value;

use crate::models::FlowerUpdate;

/// Ordered mapping from fully-qualified field path to new value.
///
/// Contains only paths that were explicitly set in the input. The producible
/// paths form a closed set: `species`, `sepal.length`, `sepal.width`,
/// `petal.length`, `petal.width`. An empty set means "nothing to change" and
/// callers must skip the store call rather than issue a no-op update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSet {
    entries: Vec<(String, Value)>,
}

impl UpdateSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Path/value pairs in the order they were collected.
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(path, _)| path.as_str())
    }

    fn push(&mut self, path: &str, value: Value) {
        self.entries.push((path.to_string(), value));
    }
}

/// Flatten a [`FlowerUpdate`] into its explicitly-set leaf fields.
///
/// Top-level scalars keep their name; nested measurements become dotted
/// paths. A nested object that is present but has no set sub-fields
/// contributes zero paths, so `{"sepal": {}}` never means "clear sepal".
pub fn build_update_set(update: &FlowerUpdate) -> UpdateSet {
    let mut set = UpdateSet::default();

    if let Some(ref species) = update.species {
        set.push("species", Value::String(species.clone()));
    }

    if let Some(ref sepal) = update.sepal {
        if let Some(length) = sepal.length {
            set.push("sepal.length", Value::from(length));
        }
        if let Some(width) = sepal.width {
            set.push("sepal.width", Value::from(width));
        }
    }

    if let Some(ref petal) = update.petal {
        if let Some(length) = petal.length {
            set.push("petal.length", Value::from(length));
        }
        if let Some(width) = petal.width {
            set.push("petal.width", Value::from(width));
        }
    }

    set
}
