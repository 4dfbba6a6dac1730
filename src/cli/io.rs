//! JSON I/O handling for CLI
//!
//! - Input: one JSON object via stdin
//! - Output: one JSON object via stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read a JSON request from stdin
pub fn read_request() -> CliResult<Value> {
    parse_request(&read_stdin()?)?.ok_or_else(|| CliError::invalid_request("Empty input"))
}

/// Read a JSON request from stdin, treating empty input as `{}`
pub fn read_request_or_empty() -> CliResult<Value> {
    Ok(parse_request(&read_stdin()?)?.unwrap_or_else(|| Value::Object(Default::default())))
}

fn read_stdin() -> CliResult<String> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    Ok(input)
}

fn parse_request(input: &str) -> CliResult<Option<Value>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(input)?))
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
