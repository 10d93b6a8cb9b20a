//! Reading seed documents and converting between fields and JSON.
//!
//! This module loads JSON documents from disk or stdin and converts them to
//! and from field trees.

pub mod convert;
pub mod loader;
