//! Conversion between field trees and plain JSON values.
//!
//! Importing gives every field a fresh id from an `IdSource`; exporting drops
//! ids and comments. A field tree has no null type, so nulls cannot be
//! imported.

use crate::document::field::{Children, Field, FieldValue};
use crate::document::tree::FieldTree;
use crate::editor::ids::IdSource;
use anyhow::{anyhow, bail, Result};
use serde_json::{Map, Number, Value};

/// Largest magnitude below which every integral f64 is an exact i64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Builds a field tree from a JSON object, one top-level field per member.
///
/// # Errors
///
/// Fails if `value` is not an object or if it contains a `null` anywhere.
///
/// # Example
///
/// ```
/// use fieldquill::editor::ids::SequentialIds;
/// use fieldquill::file::convert::import_value;
/// use serde_json::json;
///
/// let tree = import_value(&json!({"name": "hi", "items": [5]}), &mut SequentialIds::new("x")).unwrap();
/// assert_eq!(tree.len(), 2);
/// ```
pub fn import_value(value: &Value, ids: &mut dyn IdSource) -> Result<FieldTree> {
    let Value::Object(members) = value else {
        bail!("Top-level JSON value must be an object");
    };

    let mut fields = Vec::with_capacity(members.len());
    for (key, member) in members {
        fields.push(import_field(member, Some(key.as_str()), &format!("/{}", key), ids)?);
    }
    Ok(FieldTree::from_fields(fields))
}

fn import_field(
    value: &Value,
    key: Option<&str>,
    location: &str,
    ids: &mut dyn IdSource,
) -> Result<Field> {
    let id = ids.fresh_id();
    let field = match value {
        Value::Null => bail!("Null value at {} has no field type", location),
        Value::Bool(b) => Field::boolean(id, key, *b),
        Value::Number(n) => {
            let n = n
                .as_f64()
                .ok_or_else(|| anyhow!("Number at {} does not fit a double", location))?;
            Field::number(id, key, n)
        }
        Value::String(s) => Field::string(id, key, s.as_str()),
        Value::Array(items) => {
            let mut children = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                children.push(import_field(item, None, &format!("{}/{}", location, index), ids)?);
            }
            Field::array(id, key, children)
        }
        Value::Object(members) => {
            let mut children = Vec::with_capacity(members.len());
            for (name, member) in members {
                children.push(import_field(
                    member,
                    Some(name.as_str()),
                    &format!("{}/{}", location, name),
                    ids,
                )?);
            }
            Field::object(id, key, children)
        }
    };
    Ok(field)
}

/// Converts a field tree to a JSON object. Comments are dropped, missing
/// keys become `""`, and a repeated key keeps the last member's value.
pub fn export_tree(tree: &FieldTree) -> Value {
    Value::Object(export_members(tree.get_fields()))
}

fn export_members(children: &Children) -> Map<String, Value> {
    children
        .iter()
        .map(|field| (field.key().unwrap_or_default().to_string(), export_field(field)))
        .collect()
}

fn export_field(field: &Field) -> Value {
    match field.value() {
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Number(n) => export_number(*n),
        FieldValue::Boolean(b) => Value::Bool(*b),
        FieldValue::Array(children) => Value::Array(children.iter().map(export_field).collect()),
        FieldValue::Object(children) => Value::Object(export_members(children)),
    }
}

// JSON has no NaN or Infinity; those become null.
fn export_number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ids::SequentialIds;
    use serde_json::json;

    #[test]
    fn test_import_assigns_ids_depth_first() {
        let tree = import_value(
            &json!({"name": "hi", "items": [5]}),
            &mut SequentialIds::new("x"),
        )
        .unwrap();
        let ids: Vec<_> = tree.get_fields().ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["x1", "x2"]);
        let items = tree.get_fields().get("x2").unwrap();
        assert_eq!(items.children().unwrap().ids().next().unwrap().as_str(), "x3");
        assert_eq!(items.children().unwrap().get("x3").unwrap().key(), None);
    }

    #[test]
    fn test_import_rejects_null_with_location() {
        let err = import_value(&json!({"a": {"b": [null]}}), &mut SequentialIds::default())
            .unwrap_err();
        assert!(err.to_string().contains("/a/b/0"));
    }

    #[test]
    fn test_import_rejects_non_object() {
        assert!(import_value(&json!([1, 2]), &mut SequentialIds::default()).is_err());
    }

    #[test]
    fn test_export_numbers() {
        assert_eq!(export_number(5.0), json!(5));
        assert_eq!(export_number(2.5), json!(2.5));
        assert_eq!(export_number(f64::NAN), Value::Null);
    }

    #[test]
    fn test_export_round_trips_import() {
        let value = json!({"name": "hi", "nested": {"flag": true, "list": [1, "two", []]}});
        let tree = import_value(&value, &mut SequentialIds::default()).unwrap();
        assert_eq!(export_tree(&tree), value);
    }
}
