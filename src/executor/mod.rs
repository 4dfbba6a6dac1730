//! Record query engine
//!
//! Consumes a record collection and a `QuerySpec`, produces one page of
//! matches plus totals and aggregates.
//!
//! # Execution Flow (strict order)
//!
//! 1. Filter records strictly according to the active predicates
//! 2. Compute aggregates over the full matched set
//! 3. Apply the stable sort
//! 4. Slice the requested page
//!
//! # Invariants
//!
//! - Deterministic execution: no hidden state, no input mutation
//! - Aggregates never depend on `page` or `items_per_page`
//! - Concatenating pages 1..=total_pages reproduces the sorted matched set

mod engine;
mod filters;
mod paginator;
mod result;
mod sorter;

pub use engine::{query, QueryEngine};
pub use filters::RecordFilter;
pub use paginator::Page;
pub use result::{Aggregates, QueryResult};
pub use sorter::RecordSorter;
