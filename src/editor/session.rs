//! Editing session state.
//!
//! This module provides `EditorSession`, the per-document container that the
//! form layer talks to. It owns the current `FieldTree`, applies each edit as
//! a path plus a patch, and re-renders the document after every successful
//! edit so readers always see text matching the current tree.
//!
//! There is no shared or global session: each document gets its own, built
//! explicitly and passed to whoever edits it.
//!
//! # Example
//!
//! ```
//! use fieldquill::document::{FieldPatch, FieldPath, FieldType};
//! use fieldquill::editor::ids::SequentialIds;
//! use fieldquill::editor::session::EditorSession;
//! use fieldquill::serializer::RenderOptions;
//!
//! let mut session = EditorSession::new(RenderOptions::default(), Box::new(SequentialIds::new("x")));
//! let path = session.add_child(&FieldPath::root()).unwrap();
//! session.update(&path, &FieldPatch::new().key("name").value("hi")).unwrap();
//!
//! assert_eq!(session.rendered(), "{\n  \"name\":\"hi\"\n}");
//! ```

use super::ids::IdSource;
use crate::config::Config;
use crate::document::error::BrokenPathError;
use crate::document::field::{Children, Field, FieldType};
use crate::document::patch::FieldPatch;
use crate::document::path::{FieldPath, PlacedField};
use crate::document::tree::FieldTree;
use crate::serializer::{render_document, RenderOptions};
use tracing::debug;

/// One open document: its tree, the rendered text, and where new ids come from.
#[derive(Debug)]
pub struct EditorSession {
    tree: FieldTree,
    rendered: String,
    options: RenderOptions,
    lenient_updates: bool,
    ids: Box<dyn IdSource>,
}

impl EditorSession {
    /// Creates a session over an empty document.
    pub fn new(options: RenderOptions, ids: Box<dyn IdSource>) -> Self {
        Self::with_tree(FieldTree::new(), options, ids)
    }

    /// Creates a session over an existing tree.
    pub fn with_tree(tree: FieldTree, options: RenderOptions, ids: Box<dyn IdSource>) -> Self {
        let rendered = render_document(&tree, &options);
        Self {
            tree,
            rendered,
            options,
            lenient_updates: false,
            ids,
        }
    }

    /// Creates a session laid out and behaving as `config` says.
    pub fn from_config(tree: FieldTree, config: &Config, ids: Box<dyn IdSource>) -> Self {
        let mut session = Self::with_tree(tree, RenderOptions::from(config), ids);
        session.lenient_updates = config.lenient_updates;
        session
    }

    /// Returns the current tree.
    pub fn tree(&self) -> &FieldTree {
        &self.tree
    }

    /// Returns the document text for the current tree.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
        self.refresh();
    }

    pub fn lenient_updates(&self) -> bool {
        self.lenient_updates
    }

    pub fn set_lenient_updates(&mut self, lenient: bool) {
        self.lenient_updates = lenient;
    }

    /// Replaces the whole tree, e.g. after loading a different document.
    pub fn reload_tree(&mut self, tree: FieldTree) {
        self.tree = tree;
        self.refresh();
    }

    pub fn get_field(&self, path: &FieldPath) -> Result<&Field, BrokenPathError> {
        self.tree.get_field(path)
    }

    pub fn get_fields(&self) -> &Children {
        self.tree.get_fields()
    }

    pub fn create(&mut self, placed: PlacedField) -> Result<(), BrokenPathError> {
        let tree = self.tree.create(placed)?;
        self.commit(tree);
        Ok(())
    }

    /// Applies `patch` at `path`. With lenient updates on, a missing target
    /// field is inserted instead of failing.
    pub fn update(&mut self, path: &FieldPath, patch: &FieldPatch) -> Result<(), BrokenPathError> {
        let tree = if self.lenient_updates {
            self.tree.update_or_insert(path, patch)?
        } else {
            self.tree.update(path, patch)?
        };
        self.commit(tree);
        Ok(())
    }

    pub fn remove(&mut self, path: &FieldPath) -> Result<(), BrokenPathError> {
        let tree = self.tree.remove(path)?;
        self.commit(tree);
        Ok(())
    }

    /// Appends an empty string field with a fresh id under `parent`, or at the
    /// top level when `parent` is empty. Returns the new field's path.
    pub fn add_child(&mut self, parent: &FieldPath) -> Result<FieldPath, BrokenPathError> {
        let field = Field::with_type(self.ids.fresh_id(), None, FieldType::String);
        let placed = PlacedField::new(parent.clone(), field);
        let path = placed.path();
        self.create(placed)?;
        Ok(path)
    }

    /// Whether a sibling may be added next to the field at `path`.
    ///
    /// Object members (top-level fields included) must all have a non-empty
    /// key before another member joins them. Array elements have no keys, so
    /// adding next to them is always allowed.
    pub fn can_add_sibling(&self, path: &FieldPath) -> Result<bool, BrokenPathError> {
        let siblings = self.tree.siblings(path)?;
        if siblings.parent == Some(FieldType::Array) {
            return Ok(true);
        }
        Ok(siblings
            .fields
            .iter()
            .all(|field| field.key().is_some_and(|key| !key.is_empty())))
    }

    /// Adds an empty string field next to the field at `path`.
    ///
    /// Returns `None`, changing nothing, while an object member among the
    /// siblings still has an empty key. The new field goes last among its
    /// siblings; placing it elsewhere is up to the caller's view.
    pub fn add_sibling(&mut self, path: &FieldPath) -> Result<Option<FieldPath>, BrokenPathError> {
        if !self.can_add_sibling(path)? {
            debug!(path = %path, "sibling withheld until keys are filled in");
            return Ok(None);
        }
        let parent = path.parent().unwrap_or_default();
        self.add_child(&parent).map(Some)
    }

    /// Changes the type of the field at `path`. A field turned into a
    /// container gets one empty string child so there is something to edit.
    ///
    /// Returns the new child's path, if one was added.
    pub fn change_type(
        &mut self,
        path: &FieldPath,
        field_type: FieldType,
    ) -> Result<Option<FieldPath>, BrokenPathError> {
        let current = self.tree.get_field(path)?.field_type();
        self.update(path, &FieldPatch::new().field_type(field_type))?;
        if field_type.is_container() && current != field_type {
            return self.add_child(path).map(Some);
        }
        Ok(None)
    }

    fn commit(&mut self, tree: FieldTree) {
        self.tree = tree;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.rendered = render_document(&self.tree, &self.options);
    }
}
