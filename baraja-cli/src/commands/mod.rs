pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod decks;
pub(crate) mod export;
pub(crate) mod remote;
pub(crate) mod verify;

use std::path::PathBuf;

use rusqlite::Connection;
use serde::Serialize;

use crate::CliError;

/// Resolve the database path: `--db`, then `BARAJA_DB`, the config file, and
/// the default data directory.
pub(crate) fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let settings = baraja_client::Settings::load()
        .map_err(|e| CliError::config(e.to_string()))?
        .with_database(db);
    settings
        .database_path
        .ok_or_else(|| CliError::config("Could not determine a database path; pass --db"))
}

/// Open the deck database, creating it if needed.
pub(crate) fn open_db(db: Option<PathBuf>) -> Result<Connection, CliError> {
    let path = resolve_db_path(db)?;
    log::debug!("Opening database {}", path.display());
    baraja_db::open_database(&path)
        .map_err(|e| CliError::database(format!("Failed to open {}: {}", path.display(), e)))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Truncate a string to a maximum width, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

pub(crate) fn not_found(entity: &str, id: i64) -> CliError {
    CliError::not_found(format!("{} {}", entity, id))
}
