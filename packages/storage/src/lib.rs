//! Project persistence.
//!
//! Stores hold whole projects keyed by id. `put` is an upsert and keeps
//! the position of an existing entry.

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use pamphlet_schema::Project;

/// Persistence abstraction for projects
pub trait ProjectStore: Send + Sync {
    /// All projects in storage order
    fn list(&self) -> StorageResult<Vec<Project>>;

    fn get(&self, id: &str) -> StorageResult<Option<Project>>;

    /// Insert or replace by id
    fn put(&self, project: &Project) -> StorageResult<()>;

    /// Remove by id; `false` if nothing was stored under `id`
    fn delete(&self, id: &str) -> StorageResult<bool>;
}

pub(crate) fn upsert(projects: &mut Vec<Project>, project: &Project) {
    match projects.iter_mut().find(|p| p.id == project.id) {
        Some(existing) => *existing = project.clone(),
        None => projects.push(project.clone()),
    }
}
