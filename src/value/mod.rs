//! Plain JSON values addressed by string paths.
//!
//! - `path`: `a.b[0].c` style path parsing
//! - `store`: `JsonStore`, a JSON document edited through such paths

pub mod path;
pub mod store;

pub use path::{parse_value_path, PathSegment, ValuePathError};
pub use store::JsonStore;
