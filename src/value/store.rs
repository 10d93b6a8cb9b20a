//! A plain JSON document edited through string paths.
//!
//! This is the simpler editing model next to the field tree: members are
//! addressed by their names and indices rather than by ids, and setting a
//! path creates whatever containers are missing on the way.
//!
//! # Example
//!
//! ```
//! use fieldquill::value::store::JsonStore;
//! use serde_json::json;
//!
//! let mut store = JsonStore::new();
//! store.add_key("user.tags[1]", json!("admin")).unwrap();
//! assert_eq!(store.json(), &json!({"user": {"tags": [null, "admin"]}}));
//! ```

use super::path::{parse_value_path, PathSegment, ValuePathError};
use serde_json::{Map, Value};
use tracing::debug;

/// How far past the end of an array a set may reach; the gap is padded with
/// `null`.
pub const MAX_INDEX_GAP: usize = 4096;

/// Owns one JSON value, an empty object by default.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonStore {
    json: Value,
}

impl Default for JsonStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonStore {
    pub fn new() -> Self {
        Self {
            json: Value::Object(Map::new()),
        }
    }

    pub fn from_value(json: Value) -> Self {
        Self { json }
    }

    pub fn json(&self) -> &Value {
        &self.json
    }

    pub fn into_value(self) -> Value {
        self.json
    }

    /// Sets the value at `path`, creating missing containers: an array when
    /// the following segment is an index, an object otherwise. Scalars in the
    /// way are replaced.
    pub fn add_key(&mut self, path: &str, value: Value) -> Result<(), ValuePathError> {
        let segments = parse_value_path(path)?;
        // A failure halfway must not leave created containers behind.
        let mut next = self.json.clone();
        set_at(&mut next, &segments, value)?;
        self.json = next;
        debug!(path, "set value");
        Ok(())
    }

    /// Same as `add_key`; kept separate to mirror how edits are issued.
    pub fn update_value(&mut self, path: &str, value: Value) -> Result<(), ValuePathError> {
        self.add_key(path, value)
    }

    /// Removes the member or element at `path` and returns it. Array elements
    /// after it shift down. Nothing there is not an error.
    pub fn remove_key(&mut self, path: &str) -> Result<Option<Value>, ValuePathError> {
        let segments = parse_value_path(path)?;
        let removed = unset_at(&mut self.json, &segments);
        debug!(path, removed = removed.is_some(), "removed value");
        Ok(removed)
    }

    /// Moves a member: removes `old_path`, then sets `new_path` to `value`.
    pub fn update_key(
        &mut self,
        old_path: &str,
        new_path: &str,
        value: Value,
    ) -> Result<(), ValuePathError> {
        // Parse both first so a bad new path leaves the old member in place.
        let old_segments = parse_value_path(old_path)?;
        let new_segments = parse_value_path(new_path)?;
        let mut next = self.json.clone();
        unset_at(&mut next, &old_segments);
        set_at(&mut next, &new_segments, value)?;
        self.json = next;
        Ok(())
    }

    pub fn get_value(&self, path: &str) -> Result<Option<&Value>, ValuePathError> {
        let segments = parse_value_path(path)?;
        Ok(get_at(&self.json, &segments))
    }
}

fn get_at<'a>(root: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(root, |current, segment| match (current, segment) {
            (Value::Object(map), segment) => map.get(segment.to_key().as_str()),
            (Value::Array(items), PathSegment::Index(index)) => items.get(*index),
            _ => None,
        })
}

fn set_at(root: &mut Value, segments: &[PathSegment], value: Value) -> Result<(), ValuePathError> {
    let Some((last, parents)) = segments.split_last() else {
        return Err(ValuePathError::Empty);
    };

    let mut current = root;
    for segment in parents {
        current = slot(current, segment)?;
    }
    *slot(current, last)? = value;
    Ok(())
}

/// The child slot `segment` names in `container`, created as `null` if absent.
fn slot<'a>(container: &'a mut Value, segment: &PathSegment) -> Result<&'a mut Value, ValuePathError> {
    match container {
        Value::Object(map) => Ok(map.entry(segment.to_key()).or_insert(Value::Null)),
        Value::Array(items) => match segment {
            PathSegment::Index(index) => {
                let index = *index;
                let len = items.len();
                if index >= len {
                    if index - len > MAX_INDEX_GAP {
                        return Err(ValuePathError::IndexTooLarge { index, len });
                    }
                    items.resize(index + 1, Value::Null);
                }
                Ok(&mut items[index])
            }
            PathSegment::Key(key) => Err(ValuePathError::KeyOnArray { key: key.clone() }),
        },
        other => {
            *other = match segment {
                PathSegment::Index(_) => Value::Array(Vec::new()),
                PathSegment::Key(_) => Value::Object(Map::new()),
            };
            slot(other, segment)
        }
    }
}

fn unset_at(root: &mut Value, segments: &[PathSegment]) -> Option<Value> {
    let (last, parents) = segments.split_last()?;
    let parent = parents
        .iter()
        .try_fold(root, |current, segment| match (current, segment) {
            (Value::Object(map), segment) => map.get_mut(segment.to_key().as_str()),
            (Value::Array(items), PathSegment::Index(index)) => items.get_mut(*index),
            _ => None,
        })?;

    match (parent, last) {
        (Value::Object(map), segment) => map.shift_remove(segment.to_key().as_str()),
        (Value::Array(items), PathSegment::Index(index)) if *index < items.len() => {
            Some(items.remove(*index))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_through_existing_array() {
        let mut store = JsonStore::from_value(json!([{"b": {"c": [1]}}]));
        store.add_key("0.b.123", json!(10)).unwrap();
        assert_eq!(store.get_value("0.b.123").unwrap(), Some(&json!(10)));
        assert_eq!(store.get_value("0.b.c[0]").unwrap(), Some(&json!(1)));
    }

    #[test]
    fn test_set_replaces_scalar_in_the_way() {
        let mut store = JsonStore::from_value(json!({"a": 1}));
        store.add_key("a.b", json!(true)).unwrap();
        assert_eq!(store.json(), &json!({"a": {"b": true}}));
    }

    #[test]
    fn test_named_member_on_array_fails() {
        let mut store = JsonStore::from_value(json!({"a": []}));
        assert_eq!(
            store.add_key("a.b", json!(1)),
            Err(ValuePathError::KeyOnArray {
                key: "b".to_string()
            })
        );
        assert_eq!(store.json(), &json!({"a": []}));
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut store = JsonStore::new();
        assert_eq!(store.remove_key("nope.deeper").unwrap(), None);
    }

    #[test]
    fn test_update_key_moves_member() {
        let mut store = JsonStore::from_value(json!({"old": 1, "keep": 2}));
        store.update_key("old", "new", json!(1)).unwrap();
        assert_eq!(store.json(), &json!({"keep": 2, "new": 1}));
    }
}
