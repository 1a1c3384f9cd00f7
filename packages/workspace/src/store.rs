//! Project persistence
//!
//! A project record is the stored form of one project: its name, the full
//! document and the share token, if it was ever published.

use chrono::{DateTime, Utc};
use pagecraft_model::{random_id, ProjectDocument, DEFAULT_PROJECT_NAME};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Length of generated project ids
pub const PROJECT_ID_LENGTH: usize = 21;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Invalid project id: {0:?}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    pub data: ProjectDocument,
    #[serde(default)]
    pub published_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRecord {
    fn new(id: String, name: String) -> Self {
        let now = Utc::now();
        let data = ProjectDocument::new(name.clone()).with_id(id.clone());
        Self {
            id,
            name,
            data,
            published_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The stored document carrying the record's id and name
    pub fn document(&self) -> ProjectDocument {
        let mut document = self.data.clone();
        document.id = self.id.clone();
        document.name = self.name.clone();
        document.normalize();
        document
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            published_token: self.published_token.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing entry (a record without its document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub published_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage backend for projects
pub trait ProjectStore: Send + Sync {
    /// All projects, most recently updated first
    fn list(&self) -> StoreResult<Vec<ProjectSummary>>;

    /// Create a project holding a fresh document; returns its id
    fn create(&self, name: &str) -> StoreResult<String>;

    fn load(&self, id: &str) -> StoreResult<ProjectRecord>;

    /// Overwrite a project's name and document
    fn save(&self, id: &str, name: &str, document: &ProjectDocument) -> StoreResult<()>;

    /// Remove a project. Deleting a missing project is not an error.
    fn delete(&self, id: &str) -> StoreResult<()>;

    fn set_published_token(&self, id: &str, token: &str) -> StoreResult<()>;

    fn find_by_token(&self, token: &str) -> StoreResult<Option<ProjectRecord>>;
}

/// Load a project as an editable document
pub fn open_document(store: &dyn ProjectStore, id: &str) -> StoreResult<ProjectDocument> {
    Ok(store.load(id)?.document())
}

fn project_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_PROJECT_NAME.to_string()
    } else {
        name.to_string()
    }
}

fn sort_summaries(summaries: &mut [ProjectSummary]) {
    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

// ---- in-memory ---------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, ProjectRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn update<F>(&self, id: &str, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut ProjectRecord),
    {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let record = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        f(record);
        record.updated_at = Utc::now();
        Ok(())
    }
}

impl ProjectStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<ProjectSummary>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut summaries: Vec<_> = records.values().map(ProjectRecord::summary).collect();
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    fn create(&self, name: &str) -> StoreResult<String> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut id = random_id(PROJECT_ID_LENGTH);
        while records.contains_key(&id) {
            id = random_id(PROJECT_ID_LENGTH);
        }
        records.insert(id.clone(), ProjectRecord::new(id.clone(), project_name(name)));
        tracing::info!(project = %id, "project created");
        Ok(id)
    }

    fn load(&self, id: &str) -> StoreResult<ProjectRecord> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save(&self, id: &str, name: &str, document: &ProjectDocument) -> StoreResult<()> {
        self.update(id, |record| {
            record.name = name.to_string();
            record.data = document.clone();
        })
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.remove(id);
        Ok(())
    }

    fn set_published_token(&self, id: &str, token: &str) -> StoreResult<()> {
        self.update(id, |record| record.published_token = Some(token.to_string()))
    }

    fn find_by_token(&self, token: &str) -> StoreResult<Option<ProjectRecord>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records
            .values()
            .find(|record| record.published_token.as_deref() == Some(token))
            .cloned())
    }
}

// ---- on disk -------------------------------------------------------------

/// One pretty-printed JSON file per project, `<data dir>/<id>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> StoreResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }

    fn read(&self, path: &Path) -> StoreResult<ProjectRecord> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write(&self, record: &ProjectRecord) -> StoreResult<()> {
        let path = self.path_for(&record.id)?;
        let json = serde_json::to_string_pretty(record)?;
        // Write then rename so a crash never leaves a half-written project
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn records(&self) -> StoreResult<Vec<ProjectRecord>> {
        let mut records = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read(&path) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "skipping unreadable project");
                }
            }
        }
        Ok(records)
    }

    fn update<F>(&self, id: &str, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut ProjectRecord),
    {
        let mut record = self.load(id)?;
        f(&mut record);
        record.updated_at = Utc::now();
        self.write(&record)
    }
}

impl ProjectStore for FileStore {
    fn list(&self) -> StoreResult<Vec<ProjectSummary>> {
        let mut summaries: Vec<_> = self.records()?.iter().map(ProjectRecord::summary).collect();
        sort_summaries(&mut summaries);
        Ok(summaries)
    }

    fn create(&self, name: &str) -> StoreResult<String> {
        let mut id = random_id(PROJECT_ID_LENGTH);
        while self.path_for(&id)?.exists() {
            id = random_id(PROJECT_ID_LENGTH);
        }
        self.write(&ProjectRecord::new(id.clone(), project_name(name)))?;
        tracing::info!(project = %id, root = %self.root.display(), "project created");
        Ok(id)
    }

    fn load(&self, id: &str) -> StoreResult<ProjectRecord> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.read(&path)
    }

    fn save(&self, id: &str, name: &str, document: &ProjectDocument) -> StoreResult<()> {
        self.update(id, |record| {
            record.name = name.to_string();
            record.data = document.clone();
        })
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let path = self.path_for(id)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn set_published_token(&self, id: &str, token: &str) -> StoreResult<()> {
        self.update(id, |record| record.published_token = Some(token.to_string()))
    }

    fn find_by_token(&self, token: &str) -> StoreResult<Option<ProjectRecord>> {
        Ok(self
            .records()?
            .into_iter()
            .find(|record| record.published_token.as_deref() == Some(token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn ProjectStore) {
        let id = store.create("Landing").unwrap();
        let record = store.load(&id).unwrap();
        assert_eq!(record.name, "Landing");
        assert_eq!(record.data.pages.len(), 1);
        assert_eq!(record.data.pages[0].name, "Home");
        assert!(record.published_token.is_none());

        let mut document = record.document();
        document.pages[0].name = "Start".to_string();
        store.save(&id, "Renamed", &document).unwrap();

        let reloaded = store.load(&id).unwrap();
        assert_eq!(reloaded.name, "Renamed");
        assert_eq!(reloaded.data.pages[0].name, "Start");
        assert!(reloaded.updated_at >= reloaded.created_at);

        store.set_published_token(&id, "tok").unwrap();
        assert_eq!(store.find_by_token("tok").unwrap().unwrap().id, id);
        assert!(store.find_by_token("other").unwrap().is_none());

        assert_eq!(store.list().unwrap().len(), 1);
        store.delete(&id).unwrap();
        store.delete(&id).unwrap();
        assert!(matches!(store.load(&id), Err(StoreError::NotFound(_))));
        assert!(matches!(
            store.save(&id, "x", &document),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&FileStore::open(dir.path()).unwrap());
    }

    #[test]
    fn test_blank_name_gets_default() {
        let store = MemoryStore::new();
        let id = store.create("  ").unwrap();
        assert_eq!(store.load(&id).unwrap().name, DEFAULT_PROJECT_NAME);
    }

    #[test]
    fn test_file_store_rejects_path_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.load("../escape"),
            Err(StoreError::InvalidId(_))
        ));
    }

    #[test]
    fn test_open_document_uses_record_identity() {
        let store = MemoryStore::new();
        let id = store.create("Landing").unwrap();
        let mut stale = store.load(&id).unwrap().data;
        stale.name = "Stale".to_string();
        stale.current_page_id = Some("gone".to_string());
        store.save(&id, "Fresh", &stale).unwrap();

        let document = open_document(&store, &id).unwrap();
        assert_eq!(document.name, "Fresh");
        assert_eq!(document.id, id);
        assert_eq!(
            document.current_page_id.as_deref(),
            Some(document.pages[0].id.as_str())
        );
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let id = FileStore::open(dir.path()).unwrap().create("Kept").unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load(&id).unwrap().name, "Kept");
        assert_eq!(reopened.list().unwrap()[0].id, id);
    }
}
