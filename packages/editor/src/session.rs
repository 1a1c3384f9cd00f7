//! # Edit Session
//!
//! The single owner of a project's live editing state: the current document,
//! its undo/redo history and the element selection. Every change to the
//! document goes through [`EditSession::apply`], [`EditSession::apply_with`],
//! [`EditSession::undo`] or [`EditSession::redo`].

use crate::undo_stack::UndoStack;
use crate::{EditorError, Mutation, MutationError, MutationResult};
use pagecraft_model::{Element, ElementPatch, Page, ProjectDocument};

/// Editing state for one open project
#[derive(Debug)]
pub struct EditSession {
    document: ProjectDocument,

    history: UndoStack,

    /// Selected element on the current page
    selected_element: Option<String>,

    /// Increments on every document change, including undo/redo
    version: u64,
}

impl EditSession {
    /// Open a document for editing; history starts empty
    pub fn new(mut document: ProjectDocument) -> Self {
        document.normalize();
        Self {
            document,
            history: UndoStack::new(),
            selected_element: None,
            version: 0,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(Self::new(ProjectDocument::from_json(json)?))
    }

    pub fn document(&self) -> &ProjectDocument {
        &self.document
    }

    /// Close the session, keeping the document
    pub fn into_document(self) -> ProjectDocument {
        self.document
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.document.current_page()
    }

    /// Apply a mutation
    ///
    /// The mutation runs against a copy of the current document. If it fails,
    /// the document, selection and both history stacks stay exactly as they
    /// were and the error is returned for the caller to ignore or report.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        let mut draft = self.document.clone();
        let created_id = match mutation.apply(&mut draft) {
            Ok(created_id) => created_id,
            Err(err) => {
                tracing::debug!(mutation = mutation.label(), error = %err, "mutation skipped");
                return Err(err);
            }
        };

        let record = mutation.records_history();
        self.commit(draft, record, Some(mutation.label()));
        tracing::trace!(mutation = mutation.label(), version = self.version, "mutation applied");

        Ok(MutationResult {
            version: self.version,
            created_id,
        })
    }

    /// Apply an arbitrary document transformation
    ///
    /// `f` receives an owned copy of the current document and returns the new
    /// one. When `record_history` is false the undo/redo stacks are untouched.
    pub fn apply_with<F>(&mut self, description: &str, record_history: bool, f: F) -> MutationResult
    where
        F: FnOnce(ProjectDocument) -> ProjectDocument,
    {
        let mut next = f(self.document.clone());
        next.normalize();
        self.commit(next, record_history, Some(description));

        MutationResult {
            version: self.version,
            created_id: None,
        }
    }

    fn commit(&mut self, next: ProjectDocument, record_history: bool, description: Option<&str>) {
        let previous = std::mem::replace(&mut self.document, next);
        if record_history {
            self.history.record(previous, description);
        }
        self.version += 1;
        self.sync_selection();
    }

    /// Revert the most recent recorded mutation. No-op on empty history.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.document) {
            return false;
        }
        self.version += 1;
        self.sync_selection();
        tracing::debug!(version = self.version, "undo");
        true
    }

    /// Reapply the most recently undone mutation. No-op if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.history.redo(&mut self.document) {
            return false;
        }
        self.version += 1;
        self.sync_selection();
        tracing::debug!(version = self.version, "redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Group the following mutations into one undo step
    pub fn begin_batch(&mut self, description: &str) {
        self.history.begin_batch(Some(description));
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    // ---- selection ----------------------------------------------------

    /// Select an element of the current page
    pub fn select(&mut self, element_id: &str) -> Result<(), MutationError> {
        let exists = self
            .current_page()
            .map(|page| page.element(element_id).is_some())
            .unwrap_or(false);
        if !exists {
            return Err(MutationError::ElementNotFound(element_id.to_string()));
        }
        self.selected_element = Some(element_id.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_element = None;
    }

    pub fn selected_element_id(&self) -> Option<&str> {
        self.selected_element.as_deref()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        let id = self.selected_element.as_deref()?;
        self.current_page()?.element(id)
    }

    /// Drop the selection if its element is no longer on the current page
    fn sync_selection(&mut self) {
        if self.selected_element.is_some() && self.selected_element().is_none() {
            self.selected_element = None;
        }
    }

    fn require_selection(&self) -> Result<String, MutationError> {
        self.selected_element
            .clone()
            .ok_or(MutationError::NoSelection)
    }

    /// Merge fields into the selected element
    pub fn patch_selected(&mut self, patch: ElementPatch) -> Result<MutationResult, MutationError> {
        let element_id = self.require_selection()?;
        self.apply(Mutation::PatchElement { element_id, patch })
    }

    /// Set one style property on the selected element
    pub fn patch_selected_style(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<MutationResult, MutationError> {
        self.patch_selected(ElementPatch::style(key, value))
    }

    /// Save the selected element into the reusable catalog
    pub fn make_selected_reusable(&mut self, name: &str) -> Result<MutationResult, MutationError> {
        let element_id = self.require_selection()?;
        self.apply(Mutation::MakeReusable {
            element_id,
            name: name.to_string(),
        })
    }

    /// Point the selected element's `src` at an uploaded asset
    pub fn apply_asset_to_selected(
        &mut self,
        asset_id: &str,
    ) -> Result<MutationResult, MutationError> {
        let element_id = self.require_selection()?;
        let url = self
            .document
            .asset(asset_id)
            .map(|asset| asset.url.clone())
            .ok_or_else(|| MutationError::AssetNotFound(asset_id.to_string()))?;
        self.apply(Mutation::PatchElement {
            element_id,
            patch: ElementPatch::src(url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{ComponentTemplate, ElementKind};

    fn session() -> EditSession {
        EditSession::new(ProjectDocument::new("Site"))
    }

    fn add(session: &mut EditSession, kind: ElementKind) -> String {
        session
            .apply(Mutation::AddElement {
                template: ComponentTemplate::base(&kind).unwrap(),
            })
            .unwrap()
            .created_id
            .unwrap()
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.version(), 0);
        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert!(session.selected_element_id().is_none());
    }

    #[test]
    fn test_failed_mutation_leaves_state_untouched() {
        let mut session = session();
        add(&mut session, ElementKind::Text);
        let before = session.document().clone();
        let version = session.version();

        let result = session.apply(Mutation::RemoveElement {
            element_id: "missing".to_string(),
        });

        assert!(result.is_err());
        assert_eq!(session.document(), &before);
        assert_eq!(session.version(), version);
        assert_eq!(session.history().undo_levels(), 1);
    }

    #[test]
    fn test_select_page_bypasses_history() {
        let mut session = session();
        let home = session.document().pages[0].id.clone();
        session
            .apply(Mutation::AddPage { name: "About".to_string() })
            .unwrap();
        assert_eq!(session.history().undo_levels(), 1);

        session
            .apply(Mutation::SelectPage { page_id: home.clone() })
            .unwrap();
        assert_eq!(session.history().undo_levels(), 1);
        assert_eq!(session.current_page().unwrap().id, home);
    }

    #[test]
    fn test_patch_selected_requires_selection() {
        let mut session = session();
        let result = session.patch_selected_style("color", "red");
        assert_eq!(result, Err(MutationError::NoSelection));
        assert!(!session.can_undo());
    }

    #[test]
    fn test_selection_cleared_when_element_disappears() {
        let mut session = session();
        let id = add(&mut session, ElementKind::Button);
        session.select(&id).unwrap();

        session.undo();
        assert!(session.selected_element_id().is_none());
    }

    #[test]
    fn test_apply_asset_to_selected() {
        let mut session = session();
        let image = add(&mut session, ElementKind::Image);
        let asset = session
            .apply(Mutation::AddAsset {
                name: "logo.png".to_string(),
                url: "data:image/png;base64,AAAA".to_string(),
            })
            .unwrap()
            .created_id
            .unwrap();

        session.select(&image).unwrap();
        session.apply_asset_to_selected(&asset).unwrap();
        assert_eq!(
            session.selected_element().unwrap().src.as_deref(),
            Some("data:image/png;base64,AAAA")
        );

        let missing = session.apply_asset_to_selected("nope");
        assert_eq!(missing, Err(MutationError::AssetNotFound("nope".to_string())));
    }

    #[test]
    fn test_apply_with_closure() {
        let mut session = session();
        session.apply_with("Clear pages", true, |mut doc| {
            doc.pages.clear();
            doc
        });

        // normalize keeps at least one page
        assert_eq!(session.document().pages.len(), 1);
        assert_eq!(session.history().undo_description(), Some("Clear pages"));

        session.apply_with("Peek", false, |doc| doc);
        assert_eq!(session.history().undo_levels(), 1);
    }

    #[test]
    fn test_from_json_normalizes() {
        let session = EditSession::from_json(
            r#"{"name":"Old","pages":[{"id":"a","name":"Home","elements":[]}],"currentPageId":"stale"}"#,
        )
        .unwrap();
        assert_eq!(session.current_page().unwrap().id, "a");
        assert_eq!(session.document().current_page_id.as_deref(), Some("a"));
    }
}
