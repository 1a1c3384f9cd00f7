//! # Editing Pipeline
//!
//! Coordinates the edit → preview loop: Mutate → Render.
//!
//! The preview is the exact markup an export of the current page would
//! produce; it is re-derived after every change and cached until the next one.

use crate::{EditSession, Mutation, MutationError};
use pagecraft_compiler_html::{render_page, render_project};
use pagecraft_model::ProjectDocument;

/// Render the live preview of a document's current page
pub fn render_preview(document: &ProjectDocument) -> String {
    match document.current_page() {
        Some(page) => render_page(document, page),
        None => render_project(document),
    }
}

/// Manages the full edit → render pipeline
#[derive(Debug)]
pub struct Pipeline {
    session: EditSession,
    last_preview: Option<String>,
}

impl Pipeline {
    pub fn new(session: EditSession) -> Self {
        Self {
            session,
            last_preview: None,
        }
    }

    /// Apply a mutation and re-render the preview
    ///
    /// A rejected mutation leaves the cached preview as it was.
    pub fn apply_mutation(&mut self, mutation: Mutation) -> Result<PipelineResult, MutationError> {
        let result = self.session.apply(mutation)?;
        let html = self.full_render();
        Ok(PipelineResult {
            version: result.version,
            created_id: result.created_id,
            html,
        })
    }

    /// Undo and re-render; `None` if there was nothing to undo
    pub fn undo(&mut self) -> Option<PipelineResult> {
        if !self.session.undo() {
            return None;
        }
        Some(self.rendered())
    }

    /// Redo and re-render; `None` if there was nothing to redo
    pub fn redo(&mut self) -> Option<PipelineResult> {
        if !self.session.redo() {
            return None;
        }
        Some(self.rendered())
    }

    fn rendered(&mut self) -> PipelineResult {
        let html = self.full_render();
        PipelineResult {
            version: self.session.version(),
            created_id: None,
            html,
        }
    }

    /// Render from scratch and refresh the cache
    pub fn full_render(&mut self) -> String {
        let html = render_preview(self.session.document());
        self.last_preview = Some(html.clone());
        html
    }

    /// Cached preview, rendering it first if needed
    pub fn preview(&mut self) -> &str {
        if self.last_preview.is_none() {
            self.full_render();
        }
        self.last_preview.as_deref().unwrap_or_default()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Direct session access; the cached preview is dropped
    pub fn session_mut(&mut self) -> &mut EditSession {
        self.last_preview = None;
        &mut self.session
    }

    pub fn into_session(self) -> EditSession {
        self.session
    }

    pub fn last_preview(&self) -> Option<&str> {
        self.last_preview.as_deref()
    }

    pub fn clear_cache(&mut self) {
        self.last_preview = None;
    }
}

/// Result of pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub version: u64,

    /// Id created by the mutation, if any
    pub created_id: Option<String>,

    /// Full preview markup
    pub html: String,
}
