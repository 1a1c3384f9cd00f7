//! # Document Mutations
//!
//! High-level intents applied to a [`ProjectDocument`].
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each variant is one user action
//! 2. **All-or-nothing**: a mutation either applies fully or returns an error
//!    and leaves the document untouched
//! 3. **Replayable**: mutations serialize to tagged JSON
//!
//! ## Semantics
//!
//! ### Element operations
//! - Always target the current page (falling back to the first page)
//! - `PatchElement` merges fields; style entries merge into the existing map
//! - `id` and `type` of an element never change
//!
//! ### Reusable components
//! - `MakeReusable` stores a detached copy with a fresh id
//! - `InstantiateReusable` places another detached copy on the current page
//!
//! ### Navigation
//! - `SelectPage` is the only mutation that does not record history

use pagecraft_model::{
    Asset, ComponentTemplate, ElementPatch, GlobalStylesPatch, Page, ProjectDocument, ThemePatch,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Append an element built from a template to the current page
    AddElement { template: ComponentTemplate },

    /// Merge fields into an element on the current page
    PatchElement {
        element_id: String,
        patch: ElementPatch,
    },

    RemoveElement { element_id: String },

    /// Reorder an element within the current page
    MoveElement { element_id: String, index: usize },

    /// Append an empty page and make it current
    AddPage { name: String },

    /// Switch the current page (navigation, not recorded in history)
    SelectPage { page_id: String },

    RenamePage { page_id: String, name: String },

    MovePage { page_id: String, index: usize },

    /// Remove a page; the last remaining page cannot be removed
    RemovePage { page_id: String },

    /// Copy an element of the current page into the reusable catalog
    MakeReusable { element_id: String, name: String },

    /// Place a copy of a catalog entry on the current page
    InstantiateReusable { reusable_id: String },

    AddAsset { name: String, url: String },

    PatchTheme { patch: ThemePatch },

    PatchGlobalStyles { patch: GlobalStylesPatch },

    RenameProject { name: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Reusable component not found: {0}")]
    ReusableNotFound(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Document has no current page")]
    NoCurrentPage,

    #[error("No element selected")]
    NoSelection,

    #[error("Cannot remove the last page")]
    LastPage,
}

/// Result of a successfully applied mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Session version after the mutation
    pub version: u64,

    /// Id of the element, page, catalog entry or asset the mutation created
    pub created_id: Option<String>,
}

impl Mutation {
    /// Whether applying this mutation pushes an undo snapshot
    pub fn records_history(&self) -> bool {
        !matches!(self, Mutation::SelectPage { .. })
    }

    /// Short human-readable label, used as the undo entry description
    pub fn label(&self) -> &'static str {
        match self {
            Mutation::AddElement { .. } => "Add element",
            Mutation::PatchElement { .. } => "Edit element",
            Mutation::RemoveElement { .. } => "Remove element",
            Mutation::MoveElement { .. } => "Move element",
            Mutation::AddPage { .. } => "Add page",
            Mutation::SelectPage { .. } => "Select page",
            Mutation::RenamePage { .. } => "Rename page",
            Mutation::MovePage { .. } => "Move page",
            Mutation::RemovePage { .. } => "Remove page",
            Mutation::MakeReusable { .. } => "Make reusable",
            Mutation::InstantiateReusable { .. } => "Insert reusable",
            Mutation::AddAsset { .. } => "Add asset",
            Mutation::PatchTheme { .. } => "Edit theme",
            Mutation::PatchGlobalStyles { .. } => "Edit global styles",
            Mutation::RenameProject { .. } => "Rename project",
        }
    }

    /// Apply the mutation in place
    ///
    /// Returns the id of whatever the mutation created, if anything. On error
    /// the document may be partially modified, so callers apply to a scratch
    /// copy (see `EditSession::apply`).
    pub fn apply(&self, doc: &mut ProjectDocument) -> Result<Option<String>, MutationError> {
        match self {
            Mutation::AddElement { template } => Self::apply_add_element(doc, template),

            Mutation::PatchElement { element_id, patch } => {
                let element = current_page_mut(doc)?
                    .element_mut(element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                element.merge(patch);
                Ok(None)
            }

            Mutation::RemoveElement { element_id } => {
                let page = current_page_mut(doc)?;
                let index = page
                    .element_index(element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                page.elements.remove(index);
                Ok(None)
            }

            Mutation::MoveElement { element_id, index } => {
                let page = current_page_mut(doc)?;
                let from = page
                    .element_index(element_id)
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                let element = page.elements.remove(from);
                let to = (*index).min(page.elements.len());
                page.elements.insert(to, element);
                Ok(None)
            }

            Mutation::AddPage { name } => {
                let id = doc.page_id_generator().new_id();
                doc.pages.push(Page::new(id.clone(), name.clone()));
                doc.current_page_id = Some(id.clone());
                Ok(Some(id))
            }

            Mutation::SelectPage { page_id } => {
                require_page(doc, page_id)?;
                doc.current_page_id = Some(page_id.clone());
                Ok(None)
            }

            Mutation::RenamePage { page_id, name } => {
                let page = doc
                    .page_mut(page_id)
                    .ok_or_else(|| MutationError::PageNotFound(page_id.clone()))?;
                page.name = name.clone();
                Ok(None)
            }

            Mutation::MovePage { page_id, index } => {
                let from = require_page(doc, page_id)?;
                let page = doc.pages.remove(from);
                let to = (*index).min(doc.pages.len());
                doc.pages.insert(to, page);
                Ok(None)
            }

            Mutation::RemovePage { page_id } => Self::apply_remove_page(doc, page_id),

            Mutation::MakeReusable { element_id, name } => {
                let mut snapshot = current_page_mut(doc)?
                    .element(element_id)
                    .cloned()
                    .ok_or_else(|| MutationError::ElementNotFound(element_id.clone()))?;
                snapshot.id = doc.reusable_id_generator().new_id();
                snapshot.name = Some(name.clone());

                let id = snapshot.id.clone();
                doc.reusable_components.push(snapshot);
                Ok(Some(id))
            }

            Mutation::InstantiateReusable { reusable_id } => {
                let template = doc
                    .reusable(reusable_id)
                    .cloned()
                    .ok_or_else(|| MutationError::ReusableNotFound(reusable_id.clone()))?;
                let page = current_page_mut(doc)?;
                let id = page.id_generator().new_id();
                page.elements.push(template.duplicate(id.clone()));
                Ok(Some(id))
            }

            Mutation::AddAsset { name, url } => {
                let id = doc.asset_id_generator().new_id();
                doc.assets.push(Asset::new(id.clone(), name.clone(), url.clone()));
                Ok(Some(id))
            }

            Mutation::PatchTheme { patch } => {
                doc.theme.merge(patch);
                Ok(None)
            }

            Mutation::PatchGlobalStyles { patch } => {
                doc.global_styles.merge(patch);
                Ok(None)
            }

            Mutation::RenameProject { name } => {
                doc.name = name.clone();
                Ok(None)
            }
        }
    }

    fn apply_add_element(
        doc: &mut ProjectDocument,
        template: &ComponentTemplate,
    ) -> Result<Option<String>, MutationError> {
        let page = current_page_mut(doc)?;
        let id = page.id_generator().new_id();
        page.elements.push(template.instantiate(id.clone()));
        Ok(Some(id))
    }

    fn apply_remove_page(
        doc: &mut ProjectDocument,
        page_id: &str,
    ) -> Result<Option<String>, MutationError> {
        let index = require_page(doc, page_id)?;
        if doc.pages.len() <= 1 {
            return Err(MutationError::LastPage);
        }
        doc.pages.remove(index);
        doc.normalize();
        Ok(None)
    }

    /// Parse a JSON array of mutations
    pub fn parse_script(json: &str) -> Result<Vec<Mutation>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn current_page_mut(doc: &mut ProjectDocument) -> Result<&mut Page, MutationError> {
    doc.current_page_mut().ok_or(MutationError::NoCurrentPage)
}

fn require_page(doc: &ProjectDocument, page_id: &str) -> Result<usize, MutationError> {
    doc.page_index(page_id)
        .ok_or_else(|| MutationError::PageNotFound(page_id.to_string()))
}
