use crate::{upsert, ProjectStore, StorageError, StorageResult};
use pamphlet_schema::Project;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory store
///
/// Clones share the same contents. A failing store rejects writes, which
/// lets callers exercise their degraded paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    projects: Arc<RwLock<Vec<Project>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes fail until `set_failing(false)`
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store is in failing mode".into()));
        }
        Ok(())
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("memory store lock poisoned".into())
    }
}

impl ProjectStore for MemoryStore {
    fn list(&self) -> StorageResult<Vec<Project>> {
        let projects = self.projects.read().map_err(|_| Self::poisoned())?;
        Ok(projects.clone())
    }

    fn get(&self, id: &str) -> StorageResult<Option<Project>> {
        let projects = self.projects.read().map_err(|_| Self::poisoned())?;
        Ok(projects.iter().find(|p| p.id == id).cloned())
    }

    fn put(&self, project: &Project) -> StorageResult<()> {
        self.check_writable()?;
        let mut projects = self.projects.write().map_err(|_| Self::poisoned())?;
        upsert(&mut projects, project);
        Ok(())
    }

    fn delete(&self, id: &str) -> StorageResult<bool> {
        self.check_writable()?;
        let mut projects = self.projects.write().map_err(|_| Self::poisoned())?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        Ok(projects.len() != before)
    }
}
