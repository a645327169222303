//! Diagram persistence.
//!
//! The editor never talks to storage directly; embedders hand it a
//! [`DiagramStore`]. Two implementations ship with the crate: an in-memory
//! map and a directory of JSON files.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use whiteboard_core::{Result, StoreError};

use crate::model::{Diagram, DiagramId};
use crate::serialization::{DiagramFile, FILE_EXTENSION};

/// Persistence collaborator for diagrams
///
/// Implement this trait to back the editor with a database, a remote
/// service or any other storage.
#[async_trait]
pub trait DiagramStore: Send + Sync {
    /// Load a diagram by id. A missing diagram is `Ok(None)`.
    async fn load(&self, id: DiagramId) -> Result<Option<Diagram>>;

    /// Insert or replace a diagram, stamping `updated_at` with the current
    /// time. Returns the copy that was stored.
    async fn save(&self, diagram: &Diagram) -> Result<Diagram>;

    /// Delete a diagram. Fails with [`StoreError::NotFound`] if it does not
    /// exist.
    async fn delete(&self, id: DiagramId) -> Result<()>;

    /// All diagrams, most recently updated first.
    async fn list(&self) -> Result<Vec<Diagram>>;

    /// Number of stored diagrams
    async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }
}

fn stamped(diagram: &Diagram) -> Diagram {
    let mut stored = diagram.clone();
    stored.touch();
    stored
}

fn sort_by_recency(diagrams: &mut [Diagram]) {
    diagrams.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// Store keeping diagrams in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    diagrams: RwLock<HashMap<DiagramId, Diagram>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DiagramStore for MemoryStore {
    async fn load(&self, id: DiagramId) -> Result<Option<Diagram>> {
        Ok(self.diagrams.read().get(&id).cloned())
    }

    async fn save(&self, diagram: &Diagram) -> Result<Diagram> {
        let stored = stamped(diagram);
        self.diagrams.write().insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: DiagramId) -> Result<()> {
        match self.diagrams.write().remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound { id: id.to_string() }.into()),
        }
    }

    async fn list(&self) -> Result<Vec<Diagram>> {
        let mut diagrams: Vec<Diagram> = self.diagrams.read().values().cloned().collect();
        sort_by_recency(&mut diagrams);
        Ok(diagrams)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.diagrams.read().len())
    }
}

/// Store writing one `<id>.json` file per diagram into a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!("Diagram store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: DiagramId) -> PathBuf {
        self.root.join(format!("{}.{}", id, FILE_EXTENSION))
    }

    async fn read_file(path: &Path) -> Result<Diagram> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(DiagramFile::from_json(&content)?.into_diagram())
    }
}

#[async_trait]
impl DiagramStore for JsonFileStore {
    async fn load(&self, id: DiagramId) -> Result<Option<Diagram>> {
        let path = self.path_for(id);
        if !tokio::fs::try_exists(&path).await? {
            return Ok(None);
        }
        Ok(Some(Self::read_file(&path).await?))
    }

    async fn save(&self, diagram: &Diagram) -> Result<Diagram> {
        let stored = stamped(diagram);
        let json = DiagramFile::new(stored.clone()).to_json()?;
        tokio::fs::write(self.path_for(stored.id), json).await?;
        tracing::info!("Saved diagram '{}' ({})", stored.name, stored.id);
        Ok(stored)
    }

    async fn delete(&self, id: DiagramId) -> Result<()> {
        let path = self.path_for(id);
        if !tokio::fs::try_exists(&path).await? {
            return Err(StoreError::NotFound { id: id.to_string() }.into());
        }
        tokio::fs::remove_file(&path).await?;
        tracing::info!("Deleted diagram {}", id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Diagram>> {
        let mut diagrams = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            match Self::read_file(&path).await {
                Ok(diagram) => diagrams.push(diagram),
                Err(e) => tracing::warn!("Skipping unreadable diagram {}: {}", path.display(), e),
            }
        }
        sort_by_recency(&mut diagrams);
        Ok(diagrams)
    }
}
