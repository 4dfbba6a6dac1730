//! Observable events
//!
//! Events are explicit and typed; the logger only ever receives one of
//! these names.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Store lifecycle
    /// Empty store written
    StoreInitialized,
    /// Sample records inserted
    SeedApplied,

    // Record mutations
    ExpedienteCreated,
    ExpedienteUpdated,
    ExpedienteDeleted,

    // Query processing
    /// Request value dropped during normalization
    QueryPredicateIgnored,
    /// Query executed
    QueryExecuted,
    /// Request rejected before execution
    QueryRejected,

    /// Command failed
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::StoreInitialized => "STORE_INITIALIZED",
            Event::SeedApplied => "SEED_APPLIED",

            Event::ExpedienteCreated => "EXPEDIENTE_CREATED",
            Event::ExpedienteUpdated => "EXPEDIENTE_UPDATED",
            Event::ExpedienteDeleted => "EXPEDIENTE_DELETED",

            Event::QueryPredicateIgnored => "QUERY_PREDICATE_IGNORED",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",

            Event::CommandFailed => "COMMAND_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
