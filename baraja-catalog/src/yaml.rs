//! YAML loading for the curated card catalog.
//!
//! A catalog file holds an `effects:` list and a `cards:` list; see
//! [`Catalog`].

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;

use crate::types::Catalog;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Duplicate {kind} id {id} in {path}")]
    DuplicateId {
        kind: &'static str,
        id: i64,
        path: String,
    },
    #[error("Card {card} binds unknown effect {effect} in {path}")]
    UnknownEffect { card: i64, effect: i64, path: String },
}

/// Load a catalog file and check its ids.
///
/// Bindings must reference effects declared in the same file. Cards with
/// more than one subtype block are accepted here; they are reported by the
/// database integrity checks.
pub fn load_catalog(path: &Path) -> Result<Catalog, YamlError> {
    let content = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content, &path.display().to_string())
}

/// Parse catalog YAML text. `origin` is used in error messages.
pub fn parse_catalog(content: &str, origin: &str) -> Result<Catalog, YamlError> {
    let catalog: Catalog = serde_yml::from_str(content).map_err(|e| YamlError::Parse {
        path: origin.to_string(),
        source: e,
    })?;

    let mut effect_ids = HashSet::new();
    for effect in &catalog.effects {
        if !effect_ids.insert(effect.id) {
            return Err(YamlError::DuplicateId {
                kind: "effect",
                id: effect.id,
                path: origin.to_string(),
            });
        }
    }

    let mut card_ids = HashSet::new();
    for card in &catalog.cards {
        if !card_ids.insert(card.id) {
            return Err(YamlError::DuplicateId {
                kind: "card",
                id: card.id,
                path: origin.to_string(),
            });
        }
        if let Some(binding) = card.effects.iter().find(|b| !effect_ids.contains(&b.effect)) {
            return Err(YamlError::UnknownEffect {
                card: card.id,
                effect: binding.effect,
                path: origin.to_string(),
            });
        }
    }

    Ok(catalog)
}
