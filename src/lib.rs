//! expedientes - municipal case-record store and query engine
//!
//! The core is [`executor::query`]: a pure function from a record
//! collection and a [`query::QuerySpec`] to one page of matches plus
//! totals and aggregates. Storage lives behind
//! [`repository::ExpedienteRepository`] and is never touched by the engine.

pub mod cli;
pub mod config;
pub mod executor;
pub mod model;
pub mod observability;
pub mod query;
pub mod repository;
