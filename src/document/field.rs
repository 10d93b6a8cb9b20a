//! Field representation for the editable document tree.
//!
//! A `Field` is one node of the document: either a scalar carrying a value or a
//! container carrying ordered children. The shape is encoded in `FieldValue`, so
//! a field can never hold both a value and children at once.
//!
//! # Example
//!
//! ```
//! use fieldquill::document::field::{Field, FieldType};
//!
//! let items = Field::array("x2", Some("items"), vec![Field::number("x3", None, 5.0)]);
//! assert_eq!(items.field_type(), FieldType::Array);
//! assert_eq!(items.children().map(|c| c.len()), Some(1));
//! ```

use super::error::UnknownFieldType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Opaque identifier of a field, unique among its siblings.
///
/// Ids are handed in by whoever builds the field; the tree only stores and
/// indexes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FieldId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&FieldId> for FieldId {
    fn from(id: &FieldId) -> Self {
        id.clone()
    }
}

/// The five field types a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Array,
        FieldType::Object,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Array => "array",
            FieldType::Object => "object",
        }
    }

    /// Returns true for `array` and `object`.
    pub fn is_container(&self) -> bool {
        matches!(self, FieldType::Array | FieldType::Object)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownFieldType(s.to_string()))
    }
}

/// A scalar payload, as carried by value patches.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl Scalar {
    pub fn field_type(&self) -> FieldType {
        match self {
            Scalar::String(_) => FieldType::String,
            Scalar::Number(_) => FieldType::Number,
            Scalar::Boolean(_) => FieldType::Boolean,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

/// The payload of a field: a scalar value or an ordered set of children.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Array(Children),
    Object(Children),
}

impl FieldValue {
    /// Returns the zero value of a type: `""`, `0`, `false`, or an empty container.
    pub fn zero(field_type: FieldType) -> Self {
        match field_type {
            FieldType::String => FieldValue::String(String::new()),
            FieldType::Number => FieldValue::Number(0.0),
            FieldType::Boolean => FieldValue::Boolean(false),
            FieldType::Array => FieldValue::Array(Children::new()),
            FieldType::Object => FieldValue::Object(Children::new()),
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::String(_) => FieldType::String,
            FieldValue::Number(_) => FieldType::Number,
            FieldValue::Boolean(_) => FieldType::Boolean,
            FieldValue::Array(_) => FieldType::Array,
            FieldValue::Object(_) => FieldType::Object,
        }
    }

    pub fn is_container(&self) -> bool {
        self.field_type().is_container()
    }

    pub fn children(&self) -> Option<&Children> {
        match self {
            FieldValue::Array(children) | FieldValue::Object(children) => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Children> {
        match self {
            FieldValue::Array(children) | FieldValue::Object(children) => Some(children),
            _ => None,
        }
    }

    pub fn scalar(&self) -> Option<Scalar> {
        match self {
            FieldValue::String(s) => Some(Scalar::String(s.clone())),
            FieldValue::Number(n) => Some(Scalar::Number(*n)),
            FieldValue::Boolean(b) => Some(Scalar::Boolean(*b)),
            FieldValue::Array(_) | FieldValue::Object(_) => None,
        }
    }

    /// Replaces the scalar value when `scalar` has this value's type.
    ///
    /// Returns false and leaves the value untouched for containers and for
    /// scalars of another type.
    pub(crate) fn assign(&mut self, scalar: &Scalar) -> bool {
        match (self, scalar) {
            (FieldValue::String(current), Scalar::String(s)) => *current = s.clone(),
            (FieldValue::Number(current), Scalar::Number(n)) => *current = *n,
            (FieldValue::Boolean(current), Scalar::Boolean(b)) => *current = *b,
            _ => return false,
        }
        true
    }
}

impl From<Scalar> for FieldValue {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::String(s) => FieldValue::String(s),
            Scalar::Number(n) => FieldValue::Number(n),
            Scalar::Boolean(b) => FieldValue::Boolean(b),
        }
    }
}

/// Ordered siblings indexed by id.
///
/// Lookup by id is O(1) and insertion order is the rendering order. Each child
/// sits behind an `Arc`, so cloning a `Children` copies only this level and
/// shares every subtree below it.
#[derive(Debug, Clone, Default)]
pub struct Children(IndexMap<FieldId, Arc<Field>>);

impl Children {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Field> {
        self.0.get(id).map(Arc::as_ref)
    }

    /// Returns the shared handle of a child, for checking structural sharing.
    pub fn get_shared(&self, id: &str) -> Option<&Arc<Field>> {
        self.0.get(id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Field> {
        self.0.get_index(index).map(|(_, field)| field.as_ref())
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.get_index_of(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.0.values().map(Arc::as_ref)
    }

    pub fn ids(&self) -> impl Iterator<Item = &FieldId> {
        self.0.keys()
    }

    /// Copy-on-write access to a child: the child is cloned first if another
    /// tree version still shares it.
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.0.get_mut(id).map(Arc::make_mut)
    }

    /// Appends a child. Returns false, and drops nothing, when a sibling with
    /// the same id is already present.
    pub(crate) fn push(&mut self, field: Field) -> bool {
        if self.0.contains_key(field.id.as_str()) {
            return false;
        }
        self.0.insert(field.id.clone(), Arc::new(field));
        true
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Arc<Field>> {
        self.0.shift_remove(id)
    }
}

// IndexMap equality ignores order; sibling order is significant here.
impl PartialEq for Children {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|((a_id, a), (b_id, b))| a_id == b_id && (Arc::ptr_eq(a, b) || a == b))
    }
}

/// Builds siblings in iteration order. As with `FieldTree::create`, a field
/// whose id is already taken is left out; the first one stays.
impl FromIterator<Field> for Children {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut children = Children::new();
        for field in iter {
            if !children.push(field) {
                debug!("skipping field with repeated id");
            }
        }
        children
    }
}

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) id: FieldId,
    pub(crate) key: Option<String>,
    pub(crate) value: FieldValue,
    pub(crate) comment: Option<String>,
}

impl Field {
    pub fn new(id: impl Into<FieldId>, key: Option<&str>, value: FieldValue) -> Self {
        Self {
            id: id.into(),
            key: key.map(str::to_string),
            value,
            comment: None,
        }
    }

    /// Creates a field of the given type holding that type's zero value.
    pub fn with_type(id: impl Into<FieldId>, key: Option<&str>, field_type: FieldType) -> Self {
        Self::new(id, key, FieldValue::zero(field_type))
    }

    pub fn string(id: impl Into<FieldId>, key: Option<&str>, value: impl Into<String>) -> Self {
        Self::new(id, key, FieldValue::String(value.into()))
    }

    pub fn number(id: impl Into<FieldId>, key: Option<&str>, value: f64) -> Self {
        Self::new(id, key, FieldValue::Number(value))
    }

    pub fn boolean(id: impl Into<FieldId>, key: Option<&str>, value: bool) -> Self {
        Self::new(id, key, FieldValue::Boolean(value))
    }

    /// Creates an array field. Elements are addressed by position, so any
    /// keys they carry are dropped.
    pub fn array(id: impl Into<FieldId>, key: Option<&str>, children: Vec<Field>) -> Self {
        let elements = children.into_iter().map(|mut field| {
            field.key = None;
            field
        });
        Self::new(id, key, FieldValue::Array(elements.collect()))
    }

    pub fn object(id: impl Into<FieldId>, key: Option<&str>, children: Vec<Field>) -> Self {
        Self::new(id, key, FieldValue::Object(children.into_iter().collect()))
    }

    /// Attaches a trailing comment. An empty comment means no comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.set_comment(comment.into());
        self
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn field_type(&self) -> FieldType {
        self.value.field_type()
    }

    pub fn is_container(&self) -> bool {
        self.value.is_container()
    }

    pub fn children(&self) -> Option<&Children> {
        self.value.children()
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Children> {
        self.value.children_mut()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub(crate) fn set_comment(&mut self, comment: String) {
        self.comment = if comment.is_empty() {
            None
        } else {
            Some(comment)
        };
    }

    /// Number of fields in this subtree, the field itself included.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .map(|children| children.iter().map(Field::subtree_len).sum())
            .unwrap_or(0)
    }
}
