//! Write operations: deck CRUD, deck membership, and catalog seeding.

use baraja_catalog::{
    CardId, Catalog, CatalogCard, Deck, DeckId, Effect, InvalidSubtype, Membership, NewDeck,
    NormalizeError, YamlError,
};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("Invalid card record: {0}")]
    Normalize(#[from] NormalizeError),
    #[error(transparent)]
    InvalidType(#[from] InvalidSubtype),
    #[error("Catalog error: {0}")]
    Catalog(#[from] YamlError),
}

// ── Deck Operations ─────────────────────────────────────────────────────────

/// Insert a new deck and return it as stored.
pub fn create_deck(conn: &Connection, deck: &NewDeck) -> Result<Deck, OperationError> {
    log::debug!("Creating deck '{}' for user {}", deck.name, deck.owner_id);
    let created = conn.query_row(
        r#"INSERT INTO "Baraja" ("IdUsuario", "NombreBaraja", "RutaSleeve")
           VALUES (?1, ?2, ?3)
           RETURNING "IdBaraja", "IdUsuario", "NombreBaraja", "RutaSleeve""#,
        params![deck.owner_id, deck.name, deck.sleeve_path],
        row_to_deck,
    )?;
    Ok(created)
}

/// Replace a deck's fields. Returns `None` if the deck does not exist.
pub fn update_deck(
    conn: &Connection,
    id: DeckId,
    deck: &NewDeck,
) -> Result<Option<Deck>, OperationError> {
    log::debug!("Updating deck {}", id);
    let updated = conn
        .query_row(
            r#"UPDATE "Baraja"
               SET "IdUsuario" = ?1, "NombreBaraja" = ?2, "RutaSleeve" = ?3
               WHERE "IdBaraja" = ?4
               RETURNING "IdBaraja", "IdUsuario", "NombreBaraja", "RutaSleeve""#,
            params![deck.owner_id, deck.name, deck.sleeve_path, id],
            row_to_deck,
        )
        .optional()?;
    Ok(updated)
}

/// Delete a deck and its membership rows. Returns whether the deck existed.
pub fn delete_deck(conn: &Connection, id: DeckId) -> Result<bool, OperationError> {
    log::debug!("Deleting deck {}", id);
    let tx = conn.unchecked_transaction()?;
    tx.execute(r#"DELETE FROM "Contiene" WHERE "IdBaraja" = ?1"#, params![id])?;
    let deleted = tx.execute(r#"DELETE FROM "Baraja" WHERE "IdBaraja" = ?1"#, params![id])?;
    tx.commit()?;
    Ok(deleted > 0)
}

/// Add one copy of a card to a deck.
pub fn add_card_to_deck(
    conn: &Connection,
    deck_id: DeckId,
    card_id: CardId,
    variation: Option<&str>,
) -> Result<Membership, OperationError> {
    log::debug!("Adding card {} to deck {}", card_id, deck_id);
    let membership = conn.query_row(
        r#"INSERT INTO "Contiene" ("IdBaraja", "IdCarta", "VariacionImagen")
           VALUES (?1, ?2, ?3)
           RETURNING "IdBaraja", "IdCarta", "VariacionImagen""#,
        params![deck_id, card_id, variation],
        |row| {
            Ok(Membership {
                deck_id: row.get(0)?,
                card_id: row.get(1)?,
                variation: row.get(2)?,
            })
        },
    )?;
    Ok(membership)
}

/// Remove every copy of a card from a deck. Returns whether anything was removed.
pub fn remove_card_from_deck(
    conn: &Connection,
    deck_id: DeckId,
    card_id: CardId,
) -> Result<bool, OperationError> {
    log::debug!("Removing card {} from deck {}", card_id, deck_id);
    let removed = conn.execute(
        r#"DELETE FROM "Contiene" WHERE "IdBaraja" = ?1 AND "IdCarta" = ?2"#,
        params![deck_id, card_id],
    )?;
    Ok(removed > 0)
}

// ── Catalog Seeding ─────────────────────────────────────────────────────────

/// Insert or update an effect definition.
pub fn upsert_effect(conn: &Connection, effect: &Effect) -> Result<(), OperationError> {
    conn.execute(
        r#"INSERT INTO "Efecto" ("IdEfecto", "Nombre", "Descripcion", "EsBasico")
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT("IdEfecto") DO UPDATE SET
               "Nombre" = excluded."Nombre",
               "Descripcion" = excluded."Descripcion",
               "EsBasico" = excluded."EsBasico""#,
        params![effect.id, effect.name, effect.description, effect.is_basic],
    )?;
    Ok(())
}

/// Insert or update a card, replacing its image, subtype rows and bindings.
///
/// Every subtype block present on the catalog card is written, so a
/// malformed catalog can produce the multi-subtype state that
/// [`crate::subtype_conflicts`] reports.
pub fn upsert_card(conn: &Connection, card: &CatalogCard) -> Result<usize, OperationError> {
    conn.execute(
        r#"INSERT INTO "Carta" ("IdCarta", "Nombre", "Descripcion")
           VALUES (?1, ?2, ?3)
           ON CONFLICT("IdCarta") DO UPDATE SET
               "Nombre" = excluded."Nombre",
               "Descripcion" = excluded."Descripcion""#,
        params![card.id, card.name, card.description],
    )?;

    for table in ["Imagen", "Hechizo", "Aliado", "Personaje", "Tiene"] {
        conn.execute(
            &format!(r#"DELETE FROM "{table}" WHERE "IdCarta" = ?1"#),
            params![card.id],
        )?;
    }

    if let Some(ref path) = card.image {
        conn.execute(
            r#"INSERT INTO "Imagen" ("IdCarta", "Ruta") VALUES (?1, ?2)"#,
            params![card.id, path],
        )?;
    }
    if let Some(spell) = card.spell {
        conn.execute(
            r#"INSERT INTO "Hechizo" ("IdCarta", "Costo") VALUES (?1, ?2)"#,
            params![card.id, spell.cost],
        )?;
    }
    if let Some(ally) = card.ally {
        conn.execute(
            r#"INSERT INTO "Aliado" ("IdCarta", "Costo", "Ataque", "Vida") VALUES (?1, ?2, ?3, ?4)"#,
            params![card.id, ally.cost, ally.attack, ally.health],
        )?;
    }
    if let Some(character) = card.character {
        conn.execute(
            r#"INSERT INTO "Personaje" ("IdCarta", "Acciones", "Ataque", "Vida") VALUES (?1, ?2, ?3, ?4)"#,
            params![card.id, character.actions, character.attack, character.health],
        )?;
    }

    for binding in &card.effects {
        conn.execute(
            r#"INSERT INTO "Tiene" ("IdCarta", "IdEfecto", "Cantidad", "Objetivo", "Duracion",
                   "Repetible", "Trigger", "Flechas")
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
            params![
                card.id,
                binding.effect,
                binding.amount,
                binding.target,
                binding.duration,
                binding.repeatable,
                binding.trigger,
                binding.arrows,
            ],
        )?;
    }

    Ok(card.effects.len())
}

/// Seed the database from a parsed catalog in one transaction.
pub fn seed_catalog(conn: &Connection, catalog: &Catalog) -> Result<SeedStats, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let mut stats = SeedStats::default();

    for effect in &catalog.effects {
        upsert_effect(&tx, effect)?;
        stats.effects += 1;
    }
    for card in &catalog.cards {
        stats.bindings += upsert_card(&tx, card)?;
        stats.cards += 1;
    }

    tx.commit()?;
    log::info!(
        "Seeded {} effects, {} cards, {} bindings",
        stats.effects,
        stats.cards,
        stats.bindings
    );
    Ok(stats)
}

/// Load a YAML catalog file and seed it.
pub fn seed_from_catalog(
    conn: &Connection,
    path: &std::path::Path,
) -> Result<SeedStats, OperationError> {
    let catalog = baraja_catalog::load_catalog(path)?;
    seed_catalog(conn, &catalog)
}

/// Statistics from seeding the database.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedStats {
    pub effects: usize,
    pub cards: usize,
    pub bindings: usize,
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Map `IdBaraja, IdUsuario, NombreBaraja, RutaSleeve` to a [`Deck`].
pub(crate) fn row_to_deck(row: &rusqlite::Row) -> rusqlite::Result<Deck> {
    Ok(Deck {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        sleeve_path: row.get(3)?,
        card_count: None,
    })
}

/// Like [`row_to_deck`], with the card count in the fifth column.
pub(crate) fn row_to_counted_deck(row: &rusqlite::Row) -> rusqlite::Result<Deck> {
    Ok(Deck {
        card_count: Some(row.get(4)?),
        ..row_to_deck(row)?
    })
}
