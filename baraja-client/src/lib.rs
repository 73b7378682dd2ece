//! Client for the deck service: HTTP facade, settings, and a stateful session.

pub mod api;
pub mod client;
pub mod error;
pub mod session;
pub mod settings;

pub use api::DeckApi;
pub use client::{DeckClient, error_message};
pub use error::ClientError;
pub use session::{DeckSession, SessionEvent};
pub use settings::{
    ConfigFile, SettingSource, SettingSources, Settings, config_path, default_database_path,
    save_to_file, setting_sources,
};
