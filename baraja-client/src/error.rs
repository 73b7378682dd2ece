/// Errors that can occur talking to the deck service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Transport { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No deck selected")]
    NoDeckSelected,
}

impl ClientError {
    /// True for failures of the request itself: error statuses and network errors.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Http(_))
    }

    /// The service-provided message for an error status, if this is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Transport { message, .. } => Some(message),
            _ => None,
        }
    }
}
