pub mod apply;
pub mod init;
pub mod project;
pub mod publish;
pub mod render;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use project::{delete, list, new, show, DeleteArgs, NewArgs, ShowArgs};
pub use publish::{publish, PublishArgs};
pub use render::{export, render, ExportArgs, RenderArgs};
