//! Error types for field tree operations.

use super::field::{FieldId, FieldType};
use super::path::FieldPath;
use thiserror::Error;

/// A path that does not resolve through existing fields of the right shape.
///
/// Under correct use this never happens: it means the caller's view of the
/// tree and the tree itself have drifted apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrokenPathError {
    /// The path has no segments
    #[error("path is empty")]
    EmptyPath,

    /// A segment names no existing sibling
    #[error("no field `{segment}` at depth {depth} of path `{path}`")]
    Unresolved {
        path: FieldPath,
        segment: FieldId,
        depth: usize,
    },

    /// A non-final segment names a scalar field, which has no children
    #[error("field `{segment}` at depth {depth} of path `{path}` is a {field_type} and has no children")]
    NotAContainer {
        path: FieldPath,
        segment: FieldId,
        depth: usize,
        field_type: FieldType,
    },

    /// Creating would give two siblings the same id
    #[error("a field already exists at `{path}`")]
    DuplicateId { path: FieldPath },
}

impl BrokenPathError {
    pub(crate) fn unresolved(path: &FieldPath, depth: usize) -> Self {
        BrokenPathError::Unresolved {
            path: path.clone(),
            segment: path.segments()[depth].clone(),
            depth,
        }
    }

    pub(crate) fn not_a_container(path: &FieldPath, depth: usize, field_type: FieldType) -> Self {
        BrokenPathError::NotAContainer {
            path: path.clone(),
            segment: path.segments()[depth].clone(),
            depth,
            field_type,
        }
    }
}

/// A type name outside `string | number | boolean | array | object`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field type `{0}`")]
pub struct UnknownFieldType(pub String);
