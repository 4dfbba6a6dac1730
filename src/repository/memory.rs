//! In-memory repository

use chrono::Utc;
use uuid::Uuid;

use super::errors::{RepositoryError, RepositoryResult};
use super::ExpedienteRepository;
use crate::model::{Expediente, ExpedientePatch, NewExpediente};

/// Repository over an owned `Vec`
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    records: Vec<Expediente>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing collection, keeping its order
    pub fn from_records(records: Vec<Expediente>) -> Self {
        Self { records }
    }

    /// Borrows the collection without cloning
    pub fn records(&self) -> &[Expediente] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Expediente> {
        self.records
    }

    fn position(&self, id: &str) -> RepositoryResult<usize> {
        self.records
            .iter()
            .position(|r| r.id_expediente == id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

impl ExpedienteRepository for MemoryRepository {
    fn list(&self) -> RepositoryResult<Vec<Expediente>> {
        Ok(self.records.clone())
    }

    fn get(&self, id: &str) -> RepositoryResult<Option<Expediente>> {
        Ok(self.records.iter().find(|r| r.id_expediente == id).cloned())
    }

    fn create(&mut self, input: NewExpediente) -> RepositoryResult<Expediente> {
        let record = input.into_expediente(Uuid::new_v4().to_string(), Utc::now());
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, id: &str, patch: ExpedientePatch) -> RepositoryResult<Expediente> {
        let index = self.position(id)?;
        let record = &mut self.records[index];
        patch.apply(record);
        Ok(record.clone())
    }

    fn delete(&mut self, id: &str) -> RepositoryResult<()> {
        let index = self.position(id)?;
        self.records.remove(index);
        Ok(())
    }
}
