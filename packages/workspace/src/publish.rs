//! Sharing and export
//!
//! Both render the project's first page through the same renderer the live
//! preview uses.

use crate::store::{ProjectStore, StoreError, StoreResult};
use chrono::{SecondsFormat, Utc};
use pagecraft_compiler_html::render_project;
use pagecraft_model::random_id;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Length of share tokens
pub const SHARE_TOKEN_LENGTH: usize = 10;

/// Publish a project and return its share url
///
/// A project keeps the token it was first published under.
pub fn publish(store: &dyn ProjectStore, id: &str, base_url: &str) -> StoreResult<String> {
    let record = store.load(id)?;
    let token = record
        .published_token
        .unwrap_or_else(|| random_id(SHARE_TOKEN_LENGTH));
    store.set_published_token(id, &token)?;

    let url = format!("{}/share/{}", base_url.trim_end_matches('/'), token);
    tracing::info!(project = %id, %url, "project published");
    Ok(url)
}

/// Render the project published under `token`
pub fn render_shared(store: &dyn ProjectStore, token: &str) -> StoreResult<String> {
    let record = store
        .find_by_token(token)?
        .ok_or_else(|| StoreError::NotFound(format!("share token {}", token)))?;
    Ok(render_project(&record.document()))
}

/// Files produced by an export, keyed by file name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportBundle {
    pub files: BTreeMap<String, String>,
}

impl ExportBundle {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// Write every file into `dir`, creating it if needed
    pub fn write_to(&self, dir: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(dir)?;
        for (name, contents) in &self.files {
            std::fs::write(dir.join(name), contents)?;
        }
        Ok(())
    }
}

/// Export a project as static files
pub fn export(store: &dyn ProjectStore, id: &str) -> StoreResult<ExportBundle> {
    let record = store.load(id)?;
    let html = render_project(&record.document());
    let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut files = BTreeMap::new();
    files.insert("index.html".to_string(), html);
    files.insert(
        "README.txt".to_string(),
        format!("Export generated at {}", generated_at),
    );

    tracing::info!(project = %id, files = files.len(), "project exported");
    Ok(ExportBundle { files })
}
