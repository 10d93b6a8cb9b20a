//! Editing layer over the field tree.
//!
//! # Modules
//!
//! - `session`: `EditorSession`, one open document and its rendered text
//! - `ids`: fresh field id sources for newly added fields
//!
//! # Example
//!
//! ```
//! use fieldquill::document::{FieldPath, FieldType};
//! use fieldquill::editor::{EditorSession, SequentialIds};
//! use fieldquill::serializer::RenderOptions;
//!
//! let mut session = EditorSession::new(RenderOptions::default(), Box::new(SequentialIds::default()));
//! let path = session.add_child(&FieldPath::root()).unwrap();
//! session.change_type(&path, FieldType::Array).unwrap();
//! assert_eq!(session.tree().field_count(), 2);
//! ```

pub mod ids;
pub mod session;

pub use ids::{IdSource, RandomIds, SequentialIds};
pub use session::EditorSession;
