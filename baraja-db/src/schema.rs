//! SQLite schema creation and version bookkeeping.
//!
//! Table and column names are the fixed contract shared with the rest of the
//! deck builder, so they keep their original (quoted, Spanish) spelling.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database schema version {found} is newer than supported version {expected}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Create all tables and indexes if they don't exist.
///
/// Idempotent: safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    if get_schema_version(conn)? < CURRENT_VERSION {
        set_schema_version(conn, CURRENT_VERSION)?;
    }
    Ok(())
}

/// Open or create a deck database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }
    if version < CURRENT_VERSION {
        log::debug!("Creating schema in {}", path.display());
        create_schema(&conn)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Cards and their one-to-zero-or-one image
CREATE TABLE IF NOT EXISTS "Carta" (
    "IdCarta" INTEGER PRIMARY KEY,
    "Nombre" TEXT NOT NULL,
    "Descripcion" TEXT
);

CREATE TABLE IF NOT EXISTS "Imagen" (
    "IdCarta" INTEGER PRIMARY KEY REFERENCES "Carta"("IdCarta"),
    "Ruta" TEXT NOT NULL
);

-- Subtype tables; a card should appear in at most one of them
CREATE TABLE IF NOT EXISTS "Hechizo" (
    "IdCarta" INTEGER PRIMARY KEY REFERENCES "Carta"("IdCarta"),
    "Costo" INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS "Aliado" (
    "IdCarta" INTEGER PRIMARY KEY REFERENCES "Carta"("IdCarta"),
    "Costo" INTEGER NOT NULL,
    "Ataque" INTEGER NOT NULL,
    "Vida" INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS "Personaje" (
    "IdCarta" INTEGER PRIMARY KEY REFERENCES "Carta"("IdCarta"),
    "Acciones" INTEGER NOT NULL,
    "Ataque" INTEGER NOT NULL,
    "Vida" INTEGER NOT NULL
);

-- Effects and card-effect bindings
CREATE TABLE IF NOT EXISTS "Efecto" (
    "IdEfecto" INTEGER PRIMARY KEY,
    "Nombre" TEXT NOT NULL,
    "Descripcion" TEXT,
    "EsBasico" BOOLEAN NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS "Tiene" (
    "IdCarta" INTEGER NOT NULL REFERENCES "Carta"("IdCarta"),
    "IdEfecto" INTEGER NOT NULL REFERENCES "Efecto"("IdEfecto"),
    "Cantidad" INTEGER,
    "Objetivo" TEXT,
    "Duracion" INTEGER,
    "Repetible" BOOLEAN NOT NULL DEFAULT 0,
    "Trigger" TEXT,
    "Flechas" TEXT
);
CREATE INDEX IF NOT EXISTS idx_tiene_carta ON "Tiene"("IdCarta");
CREATE INDEX IF NOT EXISTS idx_tiene_efecto ON "Tiene"("IdEfecto");

-- Decks and membership (a card may appear more than once in a deck)
CREATE TABLE IF NOT EXISTS "Baraja" (
    "IdBaraja" INTEGER PRIMARY KEY AUTOINCREMENT,
    "IdUsuario" INTEGER NOT NULL,
    "NombreBaraja" TEXT NOT NULL,
    "RutaSleeve" TEXT
);
CREATE INDEX IF NOT EXISTS idx_baraja_usuario ON "Baraja"("IdUsuario");

CREATE TABLE IF NOT EXISTS "Contiene" (
    "IdBaraja" INTEGER NOT NULL REFERENCES "Baraja"("IdBaraja"),
    "IdCarta" INTEGER NOT NULL REFERENCES "Carta"("IdCarta"),
    "VariacionImagen" TEXT
);
CREATE INDEX IF NOT EXISTS idx_contiene_baraja ON "Contiene"("IdBaraja");
"#;
