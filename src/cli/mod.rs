//! CLI module
//!
//! Provides command-line access to the record store and query engine:
//! - init: Create the data directory and store file
//! - seed: Insert sample records into an empty store
//! - list / get / create / update / delete: record lifecycle
//! - query: Filter, sort, paginate and aggregate

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{create, delete, get, init, list, query, run, run_command, seed, update};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
