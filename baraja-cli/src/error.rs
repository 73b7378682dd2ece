use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database could not be opened or queried
    #[error("Database error: {0}")]
    Database(String),

    /// Deck service call failed
    #[error("Deck service error: {0}")]
    Remote(#[from] baraja_client::ClientError),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}

impl From<baraja_db::OperationError> for CliError {
    fn from(e: baraja_db::OperationError) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<baraja_db::SchemaError> for CliError {
    fn from(e: baraja_db::SchemaError) -> Self {
        Self::Database(e.to_string())
    }
}
