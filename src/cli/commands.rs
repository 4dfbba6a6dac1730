//! CLI command implementations
//!
//! Each command takes a loaded `Config` plus its stdin payload and returns
//! the `data` part of the response, so the commands can be driven without
//! a process boundary. `run_command` does the config loading and stdin and
//! stdout plumbing.

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use crate::config::Config;
use crate::executor::QueryEngine;
use crate::model::{ExpedientePatch, NewExpediente};
use crate::observability::{Event, Logger};
use crate::query::QueryRequest;
use crate::repository::{seed_if_empty, ExpedienteRepository, JsonFileRepository, RepositoryError};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, read_request_or_empty, write_error, write_response};

/// Parse arguments, run the command, report failures on stdout
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    let result = run_command(cli.command);

    if let Err(e) = &result {
        Logger::error(
            Event::CommandFailed,
            &[("code", e.code_str()), ("message", e.message())],
        );
        write_error(e.code_str(), e.message())?;
    }

    result
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let data = match cmd {
        Command::Init { config } => init(&load_config(&config)?)?,
        Command::Seed { config } => seed(&load_config(&config)?)?,
        Command::List { config } => list(&load_config(&config)?)?,
        Command::Get { config, id } => get(&load_config(&config)?, &id)?,
        Command::Create { config } => {
            let config = load_config(&config)?;
            create(&config, read_request()?)?
        }
        Command::Update { config, id } => {
            let config = load_config(&config)?;
            update(&config, &id, read_request()?)?
        }
        Command::Delete { config, id } => delete(&load_config(&config)?, &id)?,
        Command::Query { config } => {
            let config = load_config(&config)?;
            query(&config, read_request_or_empty()?)?
        }
    };

    write_response(data)
}

fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    let path = path.display().to_string();
    Logger::trace(
        Event::ConfigLoaded,
        &[("data_dir", config.data_dir.as_str()), ("path", path.as_str())],
    );
    Ok(config)
}

/// Opens the store, failing if `init` has not run
fn open_store(config: &Config) -> CliResult<JsonFileRepository> {
    let store = JsonFileRepository::new(config.store_path());
    if !store.exists() {
        return Err(CliError::not_initialized());
    }
    Ok(store)
}

/// Create the data directory and an empty store, seeding it if configured
pub fn init(config: &Config) -> CliResult<Value> {
    let mut store = JsonFileRepository::new(config.store_path());
    if store.exists() {
        return Err(CliError::already_initialized());
    }

    fs::create_dir_all(config.data_path()).map_err(|e| {
        CliError::config_error(format!(
            "Failed to create directory {}: {}",
            config.data_path().display(),
            e
        ))
    })?;

    store.initialize()?;
    let path = store.path().display().to_string();
    Logger::info(Event::StoreInitialized, &[("path", path.as_str())]);

    let seeded = if config.seed_on_init {
        apply_seed(&mut store)?
    } else {
        0
    };

    Ok(json!({"initialized": true, "seeded": seeded}))
}

/// Insert the sample records if the store is empty
pub fn seed(config: &Config) -> CliResult<Value> {
    let mut store = open_store(config)?;
    let seeded = apply_seed(&mut store)?;
    Ok(json!({"seeded": seeded}))
}

fn apply_seed(store: &mut JsonFileRepository) -> CliResult<usize> {
    let inserted = seed_if_empty(store)?;
    if inserted > 0 {
        let inserted_str = inserted.to_string();
        Logger::info(Event::SeedApplied, &[("inserted", inserted_str.as_str())]);
    }
    Ok(inserted)
}

/// Every stored record in insertion order
pub fn list(config: &Config) -> CliResult<Value> {
    let store = open_store(config)?;
    Ok(serde_json::to_value(store.list()?)?)
}

/// One record by id
pub fn get(config: &Config, id: &str) -> CliResult<Value> {
    let store = open_store(config)?;
    match store.get(id)? {
        Some(record) => Ok(serde_json::to_value(record)?),
        None => Err(RepositoryError::NotFound(id.to_string()).into()),
    }
}

/// Create a record from a `NewExpediente` JSON object
pub fn create(config: &Config, input: Value) -> CliResult<Value> {
    let mut store = open_store(config)?;
    let input: NewExpediente = serde_json::from_value(input)?;
    input.check_amounts().map_err(CliError::invalid_request)?;

    let record = store.create(input)?;
    Logger::info(
        Event::ExpedienteCreated,
        &[("id", record.id()), ("numero", record.numero_expediente.as_str())],
    );

    Ok(serde_json::to_value(record)?)
}

/// Merge an `ExpedientePatch` JSON object into a record
pub fn update(config: &Config, id: &str, patch: Value) -> CliResult<Value> {
    let mut store = open_store(config)?;
    let patch: ExpedientePatch = serde_json::from_value(patch)?;

    let mut preview = store
        .get(id)?
        .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
    patch.clone().apply(&mut preview);
    preview.check_amounts().map_err(CliError::invalid_request)?;

    let record = store.update(id, patch)?;
    Logger::info(Event::ExpedienteUpdated, &[("id", record.id())]);

    Ok(serde_json::to_value(record)?)
}

/// Delete a record by id
pub fn delete(config: &Config, id: &str) -> CliResult<Value> {
    let mut store = open_store(config)?;
    store.delete(id)?;
    Logger::info(Event::ExpedienteDeleted, &[("id", id)]);
    Ok(json!({"deleted": id}))
}

/// Run a query request against a snapshot of the store
pub fn query(config: &Config, request: Value) -> CliResult<Value> {
    let store = open_store(config)?;

    let request = QueryRequest::from_json(request).map_err(|e| {
        Logger::warn(Event::QueryRejected, &[("reason", e.message())]);
        e
    })?;
    let (spec, warnings) = request.normalize_with_page_size(config.default_items_per_page);

    for warning in &warnings {
        Logger::warn(
            Event::QueryPredicateIgnored,
            &[("field", warning.field), ("reason", warning.reason.as_str())],
        );
    }

    let records = store.list()?;
    let result = QueryEngine::query(&records, &spec);

    let matches = result.total_matches.to_string();
    let page = result.current_page.to_string();
    let pages = result.total_pages.to_string();
    let returned = result.len().to_string();
    let has_next = result.has_next_page().to_string();
    Logger::info(
        Event::QueryExecuted,
        &[
            ("has_next", has_next.as_str()),
            ("matches", matches.as_str()),
            ("page", page.as_str()),
            ("pages", pages.as_str()),
            ("returned", returned.as_str()),
        ],
    );

    let mut data = serde_json::to_value(&result)?;
    if let Some(obj) = data.as_object_mut() {
        obj.insert(
            "ignored".to_string(),
            Value::Array(
                warnings
                    .iter()
                    .map(|w| json!({"field": w.field, "reason": w.reason}))
                    .collect(),
            ),
        );
    }

    Ok(data)
}
