//! The path-addressed field tree.
//!
//! `FieldTree` is a persistent value: every mutation returns a new tree and
//! leaves the receiver untouched. Only the fields along the edited path are
//! copied; every other subtree is shared between the old and new versions.
//!
//! # Example
//!
//! ```
//! use fieldquill::document::field::Field;
//! use fieldquill::document::patch::FieldPatch;
//! use fieldquill::document::path::{FieldPath, PlacedField};
//! use fieldquill::document::tree::FieldTree;
//!
//! let tree = FieldTree::new()
//!     .create(PlacedField::top_level(Field::string("x1", Some("name"), "hi")))
//!     .unwrap();
//! let renamed = tree
//!     .update(&FieldPath::from(["x1"]), &FieldPatch::new().key("title"))
//!     .unwrap();
//!
//! assert_eq!(tree.get_field(&FieldPath::from(["x1"])).unwrap().key(), Some("name"));
//! assert_eq!(renamed.get_field(&FieldPath::from(["x1"])).unwrap().key(), Some("title"));
//! ```

use super::error::BrokenPathError;
use super::field::{Children, Field, FieldId, FieldType, FieldValue};
use super::patch::FieldPatch;
use super::path::{FieldPath, PlacedField};
use tracing::{debug, warn};

/// The siblings a path's final segment lives among.
#[derive(Debug, Clone, Copy)]
pub struct Siblings<'a> {
    /// The sibling sequence, target included if it exists
    pub fields: &'a Children,
    /// Type of the owning field, `None` at the top level
    pub parent: Option<FieldType>,
}

struct SiblingsMut<'t, 'p> {
    fields: &'t mut Children,
    parent: Option<FieldType>,
    target: &'p FieldId,
}

/// The document: an ordered sequence of top-level fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldTree {
    fields: Children,
}

impl FieldTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from ready-made top-level fields.
    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Returns the top-level fields.
    pub fn get_fields(&self) -> &Children {
        &self.fields
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields at every depth.
    pub fn field_count(&self) -> usize {
        self.fields.iter().map(Field::subtree_len).sum()
    }

    /// Resolves `path` to a field.
    ///
    /// Fails if any segment, the last one included, names no existing field,
    /// or if a non-final segment names a scalar.
    pub fn get_field(&self, path: &FieldPath) -> Result<&Field, BrokenPathError> {
        let siblings = self.siblings(path)?;
        let depth = path.len() - 1;
        siblings
            .fields
            .get(path.segments()[depth].as_str())
            .ok_or_else(|| BrokenPathError::unresolved(path, depth))
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.get_field(path).is_ok()
    }

    /// Resolves every segment but the last and returns the sequence the last
    /// segment is looked up in.
    pub fn siblings(&self, path: &FieldPath) -> Result<Siblings<'_>, BrokenPathError> {
        let Some((_, parents)) = path.segments().split_last() else {
            return Err(BrokenPathError::EmptyPath);
        };

        let mut current = Siblings {
            fields: &self.fields,
            parent: None,
        };
        for (depth, segment) in parents.iter().enumerate() {
            let field = current
                .fields
                .get(segment.as_str())
                .ok_or_else(|| BrokenPathError::unresolved(path, depth))?;
            let fields = field.children().ok_or_else(|| {
                BrokenPathError::not_a_container(path, depth, field.field_type())
            })?;
            current = Siblings {
                fields,
                parent: Some(field.field_type()),
            };
        }
        Ok(current)
    }

    /// Appends `placed` to the children of its parent, or to the top level
    /// when its path has length 1.
    ///
    /// Fields created under an array lose their key: array elements are
    /// addressed by position.
    pub fn create(&self, placed: PlacedField) -> Result<Self, BrokenPathError> {
        let path = placed.path();
        let mut next = self.clone();
        let mut siblings = siblings_mut(&mut next.fields, &path)?;
        if siblings.fields.contains(siblings.target.as_str()) {
            return Err(BrokenPathError::DuplicateId { path: path.clone() });
        }

        let mut field = placed.into_field();
        if siblings.parent == Some(FieldType::Array) && field.key.is_some() {
            debug!(path = %path, "dropping key of array element");
            field.key = None;
        }
        siblings.fields.push(field);
        debug!(path = %path, "created field");
        Ok(next)
    }

    /// Applies `patch` to the field at `path`, which must exist.
    pub fn update(&self, path: &FieldPath, patch: &FieldPatch) -> Result<Self, BrokenPathError> {
        let mut next = self.clone();
        let mut siblings = siblings_mut(&mut next.fields, path)?;
        let parent = siblings.parent;
        let field = siblings
            .fields
            .get_mut(siblings.target.as_str())
            .ok_or_else(|| BrokenPathError::unresolved(path, path.len() - 1))?;
        apply_patch(field, patch, parent, path);
        debug!(path = %path, ?patch, "updated field");
        Ok(next)
    }

    /// Like `update`, but inserts a field built from `patch` when nothing
    /// exists at the final segment yet. Intermediate segments must still
    /// resolve.
    pub fn update_or_insert(
        &self,
        path: &FieldPath,
        patch: &FieldPatch,
    ) -> Result<Self, BrokenPathError> {
        let mut next = self.clone();
        let mut siblings = siblings_mut(&mut next.fields, path)?;
        let parent = siblings.parent;
        match siblings.fields.get_mut(siblings.target.as_str()) {
            Some(field) => {
                apply_patch(field, patch, parent, path);
                debug!(path = %path, ?patch, "updated field");
            }
            None => {
                warn!(path = %path, "update before create, inserting field");
                let field = field_from_patch(siblings.target.clone(), patch, parent);
                siblings.fields.push(field);
            }
        }
        Ok(next)
    }

    /// Deletes the field at `path` with its whole subtree.
    ///
    /// A missing final segment is a no-op; the parent path must still resolve.
    pub fn remove(&self, path: &FieldPath) -> Result<Self, BrokenPathError> {
        let siblings = self.siblings(path)?;
        let depth = path.len() - 1;
        let target = path.segments()[depth].as_str();
        if !siblings.fields.contains(target) {
            debug!(path = %path, "nothing to remove");
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let mut siblings = siblings_mut(&mut next.fields, path)?;
        siblings.fields.remove(target);
        debug!(path = %path, "removed field");
        Ok(next)
    }
}

/// Mutable counterpart of `FieldTree::siblings`. Every field along the way is
/// made unique first, so the edit never shows through to other versions.
fn siblings_mut<'t, 'p>(
    fields: &'t mut Children,
    path: &'p FieldPath,
) -> Result<SiblingsMut<'t, 'p>, BrokenPathError> {
    let Some((target, parents)) = path.segments().split_last() else {
        return Err(BrokenPathError::EmptyPath);
    };

    let mut current = fields;
    let mut parent = None;
    for (depth, segment) in parents.iter().enumerate() {
        // Check the shape before `get_mut`, which copies shared fields.
        match current.get(segment.as_str()) {
            None => return Err(BrokenPathError::unresolved(path, depth)),
            Some(field) if !field.is_container() => {
                return Err(BrokenPathError::not_a_container(
                    path,
                    depth,
                    field.field_type(),
                ))
            }
            Some(field) => parent = Some(field.field_type()),
        }
        current = match current
            .get_mut(segment.as_str())
            .and_then(Field::children_mut)
        {
            Some(children) => children,
            None => return Err(BrokenPathError::unresolved(path, depth)),
        };
    }

    Ok(SiblingsMut {
        fields: current,
        parent,
        target,
    })
}

fn apply_patch(field: &mut Field, patch: &FieldPatch, parent: Option<FieldType>, path: &FieldPath) {
    if let Some(key) = &patch.key {
        if parent == Some(FieldType::Array) {
            debug!(path = %path, "ignoring key on array element");
        } else {
            field.key = Some(key.clone());
        }
    }

    if let Some(comment) = &patch.comment {
        field.set_comment(comment.clone());
    }

    match patch.field_type {
        Some(field_type) if field_type != field.field_type() => {
            field.value = FieldValue::zero(field_type);
        }
        _ => {
            if let Some(scalar) = &patch.value {
                if !field.value.assign(scalar) {
                    warn!(
                        path = %path,
                        field_type = %field.field_type(),
                        value_type = %scalar.field_type(),
                        "ignoring value of another type"
                    );
                }
            }
        }
    }
}

/// Builds the field a lenient update inserts: the patch's type, else the
/// type of its value, else `string`.
fn field_from_patch(id: FieldId, patch: &FieldPatch, parent: Option<FieldType>) -> Field {
    let field_type = patch
        .field_type
        .or_else(|| patch.value.as_ref().map(|v| v.field_type()))
        .unwrap_or(FieldType::String);
    let value = match &patch.value {
        Some(scalar) if scalar.field_type() == field_type => FieldValue::from(scalar.clone()),
        _ => FieldValue::zero(field_type),
    };

    let mut field = Field::new(id, None, value);
    if parent != Some(FieldType::Array) {
        field.key = patch.key.clone();
    }
    if let Some(comment) = &patch.comment {
        field.set_comment(comment.clone());
    }
    field
}
