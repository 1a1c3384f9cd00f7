//! # Pagecraft Model
//!
//! The project document that the editor mutates and the renderer reads.
//!
//! ```text
//! ProjectDocument
//! ├── pages[]              (ordered, never empty)
//! │   └── elements[]       (ordered: visual order on the page)
//! ├── currentPageId        (falls back to pages[0])
//! ├── theme / globalStyles
//! ├── reusableComponents[] (detached element snapshots)
//! └── assets[]
//! ```
//!
//! All types derive `Clone`; a clone is a full structural copy, which is what
//! the undo history stores.

mod document;
mod element;
mod id_generator;
mod template;

pub use document::{
    Asset, GlobalStyles, GlobalStylesPatch, Page, ProjectDocument, Theme, ThemePatch,
    DEFAULT_PROJECT_NAME, HOME_PAGE_NAME,
};
pub use element::{base_style, Element, ElementKind, ElementPatch, StyleMap};
pub use id_generator::{random_id, IDGenerator, ID_LENGTH};
pub use template::{base_components, ComponentTemplate};
