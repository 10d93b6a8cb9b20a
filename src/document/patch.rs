//! Update descriptors applied to a single field.

use super::field::{FieldType, Scalar};

/// The attributes an update may change. `None` always means "leave as is";
/// `Some(String::new())` for `key` sets an empty key.
///
/// # Example
///
/// ```
/// use fieldquill::document::patch::FieldPatch;
/// use fieldquill::document::field::FieldType;
///
/// let patch = FieldPatch::new().key("items").field_type(FieldType::Array);
/// assert_eq!(patch.key.as_deref(), Some("items"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub key: Option<String>,
    pub value: Option<Scalar>,
    pub field_type: Option<FieldType>,
    pub comment: Option<String>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn value(mut self, value: impl Into<Scalar>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none()
            && self.value.is_none()
            && self.field_type.is_none()
            && self.comment.is_none()
    }
}
