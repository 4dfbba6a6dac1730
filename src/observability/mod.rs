//! Observability
//!
//! Structured logging only: one JSON object per line on stderr, keys in
//! deterministic order. Logging is synchronous and never affects query
//! results.
//!
//! # Usage
//!
//! ```ignore
//! use expedientes::observability::{Event, Logger};
//!
//! Logger::info(Event::QueryExecuted, &[("matches", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
