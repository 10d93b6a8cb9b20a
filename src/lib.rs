//! FieldQuill builds nested JSON documents out of typed, id-addressed fields
//! and renders them as commented JSON5-style text.
//!
//! - [`document`]: the field tree and its path-addressed operations
//! - [`serializer`]: tree-to-text rendering
//! - [`editor`]: per-document editing sessions and id sources
//! - [`value`]: plain JSON values edited through string paths
//! - [`file`]: loading seed documents, JSON import/export
//! - [`config`], [`logging`]: ambient setup

pub mod config;
pub mod document;
pub mod editor;
pub mod file;
pub mod logging;
pub mod serializer;
pub mod value;
