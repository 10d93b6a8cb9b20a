//! Field tree data model and path-addressed operations.
//!
//! This module provides the core data structures for the document a user
//! builds: typed fields, id paths addressing them, update patches, and the
//! persistent `FieldTree` every edit is applied to.
//!
//! # Modules
//!
//! - `field`: `Field`, its typed payload and ordered children
//! - `path`: `FieldPath` and `PlacedField`
//! - `patch`: `FieldPatch` update descriptors
//! - `tree`: `FieldTree` with create/update/remove/lookup
//! - `error`: `BrokenPathError`

pub mod error;
pub mod field;
pub mod patch;
pub mod path;
pub mod tree;

pub use error::BrokenPathError;
pub use field::{Children, Field, FieldId, FieldType, FieldValue, Scalar};
pub use patch::FieldPatch;
pub use path::{FieldPath, PlacedField};
pub use tree::FieldTree;
