//! SQLite persistence layer for the card catalog and decks.
//!
//! Provides schema creation, deck CRUD, catalog seeding, and the read
//! queries that feed the card normalizer, backed by SQLite (via rusqlite
//! with bundled feature).

pub mod aggregate;
pub mod operations;
pub mod queries;
pub mod schema;

pub use aggregate::{decks_for_game, get_deck_with_cards};
pub use operations::{
    OperationError, SeedStats, add_card_to_deck, create_deck, delete_deck, remove_card_from_deck,
    seed_catalog, seed_from_catalog, update_deck, upsert_card, upsert_effect,
};
pub use queries::{
    SubtypeConflict, cards_of_subtype, get_all_cards, get_all_effects, get_card_by_id,
    get_cards_by_effect, get_cards_by_type, get_deck, list_cards_in_deck, list_decks,
    list_decks_by_owner, subtype_conflicts, untyped_cards,
};
pub use schema::{SchemaError, open_database, open_memory};
