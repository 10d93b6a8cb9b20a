//! Fresh field identifiers for the editing layer.
//!
//! The tree never invents ids; whoever creates fields draws them from an
//! `IdSource`.

use crate::document::field::FieldId;
use std::fmt;

/// A supply of ids, each distinct from every id it handed out before.
pub trait IdSource: fmt::Debug {
    fn fresh_id(&mut self) -> FieldId;
}

/// Deterministic ids: `prefix` followed by an increasing counter.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("f")
    }
}

impl IdSource for SequentialIds {
    fn fresh_id(&mut self) -> FieldId {
        let id = FieldId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Random v4 UUID ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn fresh_id(&mut self) -> FieldId {
        FieldId::new(uuid::Uuid::new_v4().simple().to_string())
    }
}
