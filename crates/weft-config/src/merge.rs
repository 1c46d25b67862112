//! Structural merging of configuration overrides onto defaults.
//!
//! Mappings merge per key with the override winning for each present leaf.
//! Sequences merge per index: override entries replace the defaults at the
//! same position and extend past them, while default entries beyond the
//! override's length survive. A missing override (`None`, or JSON `null` for
//! the open-ended [`merge_json`]) never replaces a present default.

use serde_json::Value;

/// Applies a partial override onto a complete value without mutating either.
pub trait Merge: Clone {
    /// Partial form of `Self` where every field is optional.
    type Overrides;

    /// Returns a new value with `overrides` layered over `self`.
    #[must_use]
    fn merge(&self, overrides: &Self::Overrides) -> Self;
}

/// Layers two partial overrides, `later` taking precedence over `self`.
///
/// For any base `b`, `b.merge(&x).merge(&y) == b.merge(&x.combine(&y))`.
pub trait Combine {
    /// Returns the overrides obtained by applying `later` after `self`.
    #[must_use]
    fn combine(&self, later: &Self) -> Self;
}

pub(crate) fn merge_leaf<T: Clone>(base: &T, overrides: Option<&T>) -> T {
    overrides.unwrap_or(base).clone()
}

pub(crate) fn merge_nested<T: Merge>(base: &T, overrides: Option<&T::Overrides>) -> T {
    overrides.map_or_else(|| base.clone(), |patch| base.merge(patch))
}

pub(crate) fn merge_sequence<T: Clone>(base: &[T], overrides: Option<&Vec<T>>) -> Vec<T> {
    overrides.map_or_else(|| base.to_vec(), |patch| merge_by_index(base, patch))
}

pub(crate) fn combine_leaf<T: Clone>(earlier: Option<&T>, later: Option<&T>) -> Option<T> {
    later.or(earlier).cloned()
}

pub(crate) fn combine_nested<T: Combine + Clone>(
    earlier: Option<&T>,
    later: Option<&T>,
) -> Option<T> {
    match (earlier, later) {
        (Some(first), Some(second)) => Some(first.combine(second)),
        (first, second) => second.or(first).cloned(),
    }
}

pub(crate) fn combine_sequence<T: Clone>(
    earlier: Option<&Vec<T>>,
    later: Option<&Vec<T>>,
) -> Option<Vec<T>> {
    match (earlier, later) {
        (Some(first), Some(second)) => Some(merge_by_index(first, second)),
        (first, second) => second.or(first).cloned(),
    }
}

pub(crate) fn merge_by_index<T: Clone>(base: &[T], overrides: &[T]) -> Vec<T> {
    let len = base.len().max(overrides.len());
    (0..len)
        .filter_map(|index| overrides.get(index).or_else(|| base.get(index)).cloned())
        .collect()
}

/// Recursively merges two JSON values.
///
/// Objects merge per key, arrays merge per index, `null` in `overrides` keeps
/// whatever `base` holds, and any other override value replaces the base.
/// `null`s nested inside values the base lacks are dropped as well.
#[must_use]
pub fn merge_json(base: &Value, overrides: &Value) -> Value {
    match (base, overrides) {
        (_, Value::Null) => base.clone(),
        (Value::Object(defaults), Value::Object(patch)) => {
            let mut merged = defaults.clone();
            for (key, value) in patch {
                let next = match defaults.get(key) {
                    Some(existing) => merge_json(existing, value),
                    None if value.is_null() => continue,
                    None => without_nulls(value),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (Value::Array(defaults), Value::Array(patch)) => {
            let len = defaults.len().max(patch.len());
            let merged = (0..len)
                .filter_map(|index| match (defaults.get(index), patch.get(index)) {
                    (Some(existing), Some(value)) => Some(merge_json(existing, value)),
                    (None, Some(value)) if !value.is_null() => Some(without_nulls(value)),
                    (existing, _) => existing.cloned(),
                })
                .collect();
            Value::Array(merged)
        }
        _ => without_nulls(overrides),
    }
}

fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .filter(|(_, entry)| !entry.is_null())
                .map(|(key, entry)| (key.clone(), without_nulls(entry)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(without_nulls)
                .collect(),
        ),
        _ => value.clone(),
    }
}
