//! # Pagecraft Workspace
//!
//! Everything around a document that lives outside the editor: project
//! storage, debounced autosave, publishing, export and asset uploads.

pub mod assets;
pub mod autosave;
pub mod publish;
pub mod store;

pub use assets::{encode_data_url, mime_for};
pub use autosave::{AutosaveError, Autosaver, SaveStatus, DEFAULT_AUTOSAVE_DELAY};
pub use publish::{export, publish, render_shared, ExportBundle, SHARE_TOKEN_LENGTH};
pub use store::{
    open_document, FileStore, MemoryStore, ProjectRecord, ProjectStore, ProjectSummary,
    StoreError, StoreResult, PROJECT_ID_LENGTH,
};
