//! JSON file repository
//!
//! The whole collection lives in one JSON array file. Every operation
//! reads the file, and every mutation rewrites it through a uniquely named
//! temp file in the same directory that is fsynced and renamed into place,
//! so a reader never sees a partial write. A missing file is an empty
//! collection.
//!
//! Mutations are load-modify-save with no lock: concurrent writers never
//! corrupt the file, but the last one to finish wins.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::errors::RepositoryResult;
use super::memory::MemoryRepository;
use super::ExpedienteRepository;
use crate::model::{Expediente, ExpedientePatch, NewExpediente};

/// Repository persisted as a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Opens a repository at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the backing file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes an empty collection, creating parent directories
    pub fn initialize(&self) -> RepositoryResult<()> {
        self.save(&[])
    }

    fn load(&self) -> RepositoryResult<MemoryRepository> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(MemoryRepository::new()),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(MemoryRepository::new());
        }

        let records: Vec<Expediente> = serde_json::from_str(&content)?;
        Ok(MemoryRepository::from_records(records))
    }

    fn save(&self, records: &[Expediente]) -> RepositoryResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let json = serde_json::to_string_pretty(records)?;

        // Unique name per writer; dropped (and removed) if anything below fails
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;

        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Loads, applies `op`, and saves the result
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut MemoryRepository) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut memory = self.load()?;
        let value = op(&mut memory)?;
        self.save(memory.records())?;
        Ok(value)
    }
}

impl ExpedienteRepository for JsonFileRepository {
    fn list(&self) -> RepositoryResult<Vec<Expediente>> {
        Ok(self.load()?.into_records())
    }

    fn get(&self, id: &str) -> RepositoryResult<Option<Expediente>> {
        self.load()?.get(id)
    }

    fn create(&mut self, input: NewExpediente) -> RepositoryResult<Expediente> {
        self.mutate(|memory| memory.create(input))
    }

    fn update(&mut self, id: &str, patch: ExpedientePatch) -> RepositoryResult<Expediente> {
        self.mutate(|memory| memory.update(id, patch))
    }

    fn delete(&mut self, id: &str) -> RepositoryResult<()> {
        self.mutate(|memory| memory.delete(id))
    }
}
