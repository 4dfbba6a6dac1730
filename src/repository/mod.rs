//! Record repository
//!
//! Storage collaborator for the query engine. The engine never holds the
//! collection; callers `list()` a snapshot and pass it to
//! [`crate::executor::query`].

mod errors;
mod file;
mod memory;
mod seed;

pub use errors::{RepositoryError, RepositoryResult};
pub use file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use seed::{sample_expedientes, seed_if_empty};

use crate::model::{Expediente, ExpedientePatch, NewExpediente};

/// CRUD access to the stored case records
pub trait ExpedienteRepository {
    /// All records in insertion order
    fn list(&self) -> RepositoryResult<Vec<Expediente>>;

    /// Looks up a record by id
    fn get(&self, id: &str) -> RepositoryResult<Option<Expediente>>;

    /// Stores a new record under a freshly generated id
    fn create(&mut self, input: NewExpediente) -> RepositoryResult<Expediente>;

    /// Merges `patch` into the record with the given id
    fn update(&mut self, id: &str, patch: ExpedientePatch) -> RepositoryResult<Expediente>;

    /// Removes the record with the given id
    fn delete(&mut self, id: &str) -> RepositoryResult<()>;
}
