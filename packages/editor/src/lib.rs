//! # Pagecraft Editor
//!
//! Mutation and history engine for project documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: ProjectDocument / Page / Element     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - Apply mutations on a scratch copy        │
//! │  - Snapshot undo/redo (40 levels)           │
//! │  - Selection tracking                       │
//! │  - Pipeline: mutate → render preview        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: document → HTML              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: preview markup is a derived view
//! 2. **One entry point**: all edits go through `EditSession`
//! 3. **Failed edits are no-ops**: a rejected mutation never touches the
//!    document or the history
//! 4. **Navigation is not history**: switching pages is not undoable
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{EditSession, Mutation};
//! use pagecraft_model::{ComponentTemplate, ElementKind, ElementPatch, ProjectDocument};
//!
//! let mut session = EditSession::new(ProjectDocument::new("Landing"));
//!
//! let id = session
//!     .apply(Mutation::AddElement {
//!         template: ComponentTemplate::base(&ElementKind::Button).unwrap(),
//!     })?
//!     .created_id
//!     .unwrap();
//!
//! session.apply(Mutation::PatchElement {
//!     element_id: id,
//!     patch: ElementPatch::content("Buy now"),
//! })?;
//!
//! session.undo();
//! session.redo();
//! ```

mod errors;
mod mutations;
mod pipeline;
mod session;
mod undo_stack;

pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use pipeline::{render_preview, Pipeline, PipelineResult};
pub use session::EditSession;
pub use undo_stack::{Snapshot, UndoStack, MAX_HISTORY};
