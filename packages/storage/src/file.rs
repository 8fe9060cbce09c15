use crate::{upsert, ProjectStore, StorageError, StorageResult};
use pamphlet_schema::Project;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// All projects in a single JSON array file
///
/// A missing file reads as an empty store. Writes go to a sibling
/// temporary file first and are renamed into place.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StorageResult<Vec<Project>> {
        Ok(self.read_entries()?.projects)
    }

    /// Decode the file one project at a time
    ///
    /// Entries that fail to decode are skipped with a warning and kept
    /// for the next write.
    fn read_entries(&self) -> StorageResult<Entries> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::default()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Entries::default());
        }

        let raw: Vec<Value> = serde_json::from_str(&content)?;
        let mut entries = Entries::default();
        for value in raw {
            match serde_json::from_value::<Project>(value.clone()) {
                Ok(project) => entries.projects.push(project),
                Err(e) => {
                    tracing::warn!(
                        "Skipping undecodable project {} in {}: {}",
                        value.get("id").unwrap_or(&serde_json::Value::Null),
                        self.path.display(),
                        e
                    );
                    entries.undecodable.push(value);
                }
            }
        }
        Ok(entries)
    }

    fn write_all(&self, entries: &Entries) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut values = Vec::with_capacity(entries.projects.len() + entries.undecodable.len());
        for project in &entries.projects {
            values.push(serde_json::to_value(project)?);
        }
        values.extend(entries.undecodable.iter().cloned());

        let json = serde_json::to_string_pretty(&values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!("Wrote {} project(s) to {}", values.len(), self.path.display());
        Ok(())
    }

    fn modify<T>(&self, f: impl FnOnce(&mut Entries) -> T) -> StorageResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("file store lock poisoned".into()))?;

        let mut entries = self.read_entries()?;
        let result = f(&mut entries);
        self.write_all(&entries)?;
        Ok(result)
    }
}

/// Decoded projects plus the raw entries that did not decode
#[derive(Debug, Default)]
struct Entries {
    projects: Vec<Project>,
    undecodable: Vec<Value>,
}

impl Entries {
    /// Drop undecodable entries stored under `id`
    fn forget_raw(&mut self, id: &str) -> bool {
        let before = self.undecodable.len();
        self.undecodable
            .retain(|v| v.get("id").and_then(Value::as_str) != Some(id));
        self.undecodable.len() != before
    }
}

impl ProjectStore for JsonFileStore {
    fn list(&self) -> StorageResult<Vec<Project>> {
        self.read_all()
    }

    fn get(&self, id: &str) -> StorageResult<Option<Project>> {
        Ok(self.read_all()?.into_iter().find(|p| p.id == id))
    }

    fn put(&self, project: &Project) -> StorageResult<()> {
        self.modify(|entries| {
            entries.forget_raw(&project.id);
            upsert(&mut entries.projects, project)
        })
    }

    fn delete(&self, id: &str) -> StorageResult<bool> {
        self.modify(|entries| {
            let before = entries.projects.len();
            entries.projects.retain(|p| p.id != id);
            let removed_raw = entries.forget_raw(id);
            entries.projects.len() != before || removed_raw
        })
    }
}
