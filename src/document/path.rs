//! Id paths addressing fields in the tree.

use super::field::{Field, FieldId};
use std::fmt;

/// Ordered ids from a top-level field down to, and including, the target.
///
/// A path of length 1 addresses a top-level field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<FieldId>);

impl FieldPath {
    /// The empty path, which addresses the document root sequence itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn new(segments: Vec<FieldId>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[FieldId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&FieldId> {
        self.0.last()
    }

    /// Returns the path of a child of the addressed field.
    pub fn child(&self, id: impl Into<FieldId>) -> Self {
        let mut segments = self.0.clone();
        segments.push(id.into());
        Self(segments)
    }

    /// Returns the path of the parent, or `None` for a top-level path.
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, parents)) if !parents.is_empty() => Some(Self(parents.to_vec())),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<FieldId>> for FieldPath {
    fn from(segments: Vec<FieldId>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for FieldPath {
    fn from(segments: &[&str]) -> Self {
        segments.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for FieldPath {
    fn from(segments: [&str; N]) -> Self {
        segments.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for FieldPath {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(FieldId::from).collect())
    }
}

impl FromIterator<FieldId> for FieldPath {
    fn from_iter<I: IntoIterator<Item = FieldId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A field together with the place it is to be created at.
///
/// The path always ends in the field's own id: it is built from the parent
/// path, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedField {
    parent: FieldPath,
    field: Field,
}

impl PlacedField {
    /// Places `field` as the last child of the field at `parent`. An empty
    /// parent places it at the top level.
    pub fn new(parent: FieldPath, field: Field) -> Self {
        Self { parent, field }
    }

    pub fn top_level(field: Field) -> Self {
        Self::new(FieldPath::root(), field)
    }

    pub fn path(&self) -> FieldPath {
        self.parent.child(self.field.id())
    }

    pub fn parent(&self) -> &FieldPath {
        &self.parent
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn into_field(self) -> Field {
        self.field
    }
}
