//! Card catalog data model, card normalization, YAML catalog I/O and the
//! game deck export format.
//!
//! This crate has no database dependency. `baraja-db` fills the raw row
//! types from SQLite and hands them to [`normalize_card`].

pub mod game;
pub mod normalize;
pub mod types;
pub mod yaml;

pub use game::{GameCard, GameDeck, GameDeckFile, GameEffect};
pub use normalize::{NormalizeError, arrows_for, normalize_card};
pub use types::*;
pub use yaml::{YamlError, load_catalog, parse_catalog};
