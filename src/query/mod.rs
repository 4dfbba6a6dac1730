//! Query specification for the record query engine
//!
//! Two shapes are accepted:
//!
//! - `QuerySpec`: typed, always well-formed, consumed by the executor
//! - `QueryRequest`: the loosely typed JSON shape collaborators send,
//!   normalized into a `QuerySpec` plus a list of ignored values
//!
//! # Malformed values
//!
//! A malformed predicate value never aborts a query. It is dropped, the
//! predicate becomes unconstrained on that side, and a `QueryWarning`
//! names the field. One bad filter must not hide every record.

mod errors;
mod request;
mod spec;

pub use errors::{RequestError, RequestErrorCode, RequestResult};
pub use request::{parse_date_bound, QueryRequest, QueryWarning};
pub use spec::{QuerySpec, SortDirection, SortField, SortSpec, DEFAULT_ITEMS_PER_PAGE};
