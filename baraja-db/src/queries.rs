//! Read queries: normalized cards, effects, decks and integrity checks.

use baraja_catalog::{
    AllyDetails, CardId, CardKind, CardView, CardWithBinding, CharacterDetails, Deck, DeckCardRow,
    DeckId, Effect, EffectBindingRow, EffectId, NormalizeError, RawCard, SpellDetails, Subtype,
    SubtypeRows, TypedCard, UserId, normalize_card,
};
use rusqlite::{Connection, OptionalExtension, params};

use crate::operations::{OperationError, row_to_counted_deck};

// ── Card Lookups ────────────────────────────────────────────────────────────

/// Fetch every card, normalized, ordered by card id.
///
/// Subtype and effect lookups are issued one card at a time.
pub fn get_all_cards(conn: &Connection) -> Result<Vec<CardView>, OperationError> {
    let mut stmt = conn.prepare(
        r#"SELECT c."IdCarta", c."Nombre", c."Descripcion", i."Ruta"
           FROM "Carta" c
           LEFT JOIN "Imagen" i ON c."IdCarta" = i."IdCarta"
           ORDER BY c."IdCarta""#,
    )?;
    let raws = stmt
        .query_map([], row_to_raw_card)?
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("Normalizing {} cards", raws.len());

    raws.iter().map(|raw| build_card_view(conn, raw)).collect()
}

/// Fetch one card by id, normalized. Returns `None` if it does not exist.
pub fn get_card_by_id(conn: &Connection, id: CardId) -> Result<Option<CardView>, OperationError> {
    let raw = conn
        .query_row(
            r#"SELECT c."IdCarta", c."Nombre", c."Descripcion", i."Ruta"
               FROM "Carta" c
               LEFT JOIN "Imagen" i ON c."IdCarta" = i."IdCarta"
               WHERE c."IdCarta" = ?1"#,
            params![id],
            row_to_raw_card,
        )
        .optional()?;

    match raw {
        Some(raw) => build_card_view(conn, &raw).map(Some),
        None => Ok(None),
    }
}

/// Fetch the cards of one subtype, named in Spanish or English
/// (`"Hechizo"`, `"ally"`, ...).
pub fn get_cards_by_type(
    conn: &Connection,
    type_name: &str,
) -> Result<Vec<TypedCard>, OperationError> {
    let subtype: Subtype = type_name.parse()?;
    cards_of_subtype(conn, subtype)
}

/// Fetch the cards that have a row in the given subtype table.
pub fn cards_of_subtype(
    conn: &Connection,
    subtype: Subtype,
) -> Result<Vec<TypedCard>, OperationError> {
    let sql = match subtype {
        Subtype::Spell => {
            r#"SELECT c."IdCarta", c."Nombre", c."Descripcion", i."Ruta", h."Costo"
               FROM "Carta" c
               JOIN "Hechizo" h ON c."IdCarta" = h."IdCarta"
               LEFT JOIN "Imagen" i ON c."IdCarta" = i."IdCarta"
               ORDER BY c."IdCarta""#
        }
        Subtype::Ally => {
            r#"SELECT c."IdCarta", c."Nombre", c."Descripcion", i."Ruta",
                      a."Costo", a."Ataque", a."Vida"
               FROM "Carta" c
               JOIN "Aliado" a ON c."IdCarta" = a."IdCarta"
               LEFT JOIN "Imagen" i ON c."IdCarta" = i."IdCarta"
               ORDER BY c."IdCarta""#
        }
        Subtype::Character => {
            r#"SELECT c."IdCarta", c."Nombre", c."Descripcion", i."Ruta",
                      p."Acciones", p."Ataque", p."Vida"
               FROM "Carta" c
               JOIN "Personaje" p ON c."IdCarta" = p."IdCarta"
               LEFT JOIN "Imagen" i ON c."IdCarta" = i."IdCarta"
               ORDER BY c."IdCarta""#
        }
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        let kind = match subtype {
            Subtype::Spell => CardKind::Spell(SpellDetails { cost: row.get(4)? }),
            Subtype::Ally => CardKind::Ally(AllyDetails {
                cost: row.get(4)?,
                attack: row.get(5)?,
                health: row.get(6)?,
            }),
            Subtype::Character => CardKind::Character(CharacterDetails {
                actions: row.get(4)?,
                attack: row.get(5)?,
                health: row.get(6)?,
            }),
        };
        Ok(TypedCard {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            image_path: row.get(3)?,
            kind,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Effect Lookups ──────────────────────────────────────────────────────────

/// List all effect definitions ordered by id.
pub fn get_all_effects(conn: &Connection) -> Result<Vec<Effect>, OperationError> {
    let mut stmt = conn.prepare(
        r#"SELECT "IdEfecto", "Nombre", "Descripcion", "EsBasico"
           FROM "Efecto" ORDER BY "IdEfecto""#,
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Effect {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            is_basic: row.get(3)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List the cards bound to an effect, with the binding parameters.
pub fn get_cards_by_effect(
    conn: &Connection,
    effect_id: EffectId,
) -> Result<Vec<CardWithBinding>, OperationError> {
    let mut stmt = conn.prepare(
        r#"SELECT c."IdCarta", c."Nombre", t."Cantidad", t."Objetivo", t."Duracion",
                  t."Repetible", t."Trigger", t."Flechas"
           FROM "Carta" c
           JOIN "Tiene" t ON c."IdCarta" = t."IdCarta"
           WHERE t."IdEfecto" = ?1
           ORDER BY c."IdCarta", t.rowid"#,
    )?;
    let rows = stmt.query_map(params![effect_id], |row| {
        Ok(CardWithBinding {
            card_id: row.get(0)?,
            name: row.get(1)?,
            amount: row.get(2)?,
            target: row.get(3)?,
            duration: row.get(4)?,
            repeatable: row.get(5)?,
            trigger: row.get(6)?,
            arrows: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Deck Lookups ────────────────────────────────────────────────────────────

const DECK_SUMMARY_SQL: &str = r#"
    SELECT b."IdBaraja", b."IdUsuario", b."NombreBaraja", b."RutaSleeve", COUNT(c."IdCarta")
    FROM "Baraja" b
    LEFT JOIN "Contiene" c ON b."IdBaraja" = c."IdBaraja""#;

/// List every deck with its card count, ordered by deck id.
pub fn list_decks(conn: &Connection) -> Result<Vec<Deck>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        r#"{DECK_SUMMARY_SQL}
           GROUP BY b."IdBaraja"
           ORDER BY b."IdBaraja""#
    ))?;
    let rows = stmt.query_map([], row_to_counted_deck)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List one user's decks with their card counts, ordered by deck id.
pub fn list_decks_by_owner(
    conn: &Connection,
    owner_id: UserId,
) -> Result<Vec<Deck>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        r#"{DECK_SUMMARY_SQL}
           WHERE b."IdUsuario" = ?1
           GROUP BY b."IdBaraja"
           ORDER BY b."IdBaraja""#
    ))?;
    let rows = stmt.query_map(params![owner_id], row_to_counted_deck)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Fetch one deck with its card count. Returns `None` if it does not exist.
pub fn get_deck(conn: &Connection, id: DeckId) -> Result<Option<Deck>, OperationError> {
    conn.query_row(
        &format!(
            r#"{DECK_SUMMARY_SQL}
               WHERE b."IdBaraja" = ?1
               GROUP BY b."IdBaraja""#
        ),
        params![id],
        row_to_counted_deck,
    )
    .optional()
    .map_err(Into::into)
}

/// List the member cards of a deck with their variation tag, ordered by card id.
pub fn list_cards_in_deck(
    conn: &Connection,
    deck_id: DeckId,
) -> Result<Vec<DeckCardRow>, OperationError> {
    let mut stmt = conn.prepare(
        r#"SELECT c."IdCarta", c."Nombre", c."Descripcion", co."VariacionImagen", i."Ruta"
           FROM "Contiene" co
           JOIN "Carta" c ON co."IdCarta" = c."IdCarta"
           LEFT JOIN "Imagen" i ON c."IdCarta" = i."IdCarta"
           WHERE co."IdBaraja" = ?1
           ORDER BY c."IdCarta", co.rowid"#,
    )?;
    let rows = stmt.query_map(params![deck_id], |row| {
        Ok(DeckCardRow {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            variation: row.get(3)?,
            image_path: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Integrity ───────────────────────────────────────────────────────────────

/// A card whose subtype rows break the one-subtype invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeConflict {
    pub card_id: CardId,
    /// Subtypes present, in precedence order; the first one wins.
    pub subtypes: Vec<Subtype>,
}

/// Cards with rows in more than one subtype table.
pub fn subtype_conflicts(conn: &Connection) -> Result<Vec<SubtypeConflict>, OperationError> {
    Ok(subtype_census(conn)?
        .into_iter()
        .filter(|(_, subtypes)| subtypes.len() > 1)
        .map(|(card_id, subtypes)| SubtypeConflict { card_id, subtypes })
        .collect())
}

/// Cards with no subtype row at all.
pub fn untyped_cards(conn: &Connection) -> Result<Vec<CardId>, OperationError> {
    Ok(subtype_census(conn)?
        .into_iter()
        .filter(|(_, subtypes)| subtypes.is_empty())
        .map(|(card_id, _)| card_id)
        .collect())
}

fn subtype_census(conn: &Connection) -> Result<Vec<(CardId, Vec<Subtype>)>, OperationError> {
    let mut stmt = conn.prepare(
        r#"SELECT c."IdCarta",
                  EXISTS(SELECT 1 FROM "Hechizo" h WHERE h."IdCarta" = c."IdCarta"),
                  EXISTS(SELECT 1 FROM "Aliado" a WHERE a."IdCarta" = c."IdCarta"),
                  EXISTS(SELECT 1 FROM "Personaje" p WHERE p."IdCarta" = c."IdCarta")
           FROM "Carta" c
           ORDER BY c."IdCarta""#,
    )?;
    let rows = stmt.query_map([], |row| {
        let mut present = Vec::new();
        for (column, subtype) in Subtype::ALL.into_iter().enumerate() {
            if row.get::<_, bool>(column + 1)? {
                present.push(subtype);
            }
        }
        Ok((row.get(0)?, present))
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn row_to_raw_card(row: &rusqlite::Row) -> rusqlite::Result<RawCard> {
    Ok(RawCard {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        image_path: row.get(3)?,
    })
}

/// Look up a card's subtype rows and bindings and normalize it.
fn build_card_view(conn: &Connection, raw: &RawCard) -> Result<CardView, OperationError> {
    let id = raw.id.ok_or(NormalizeError::MissingId)?;
    let subtypes = load_subtypes(conn, id)?;
    let bindings = load_bindings(conn, id)?;
    log::debug!(
        "Card {}: subtypes {:?}, {} bindings",
        id,
        subtypes.present(),
        bindings.len()
    );
    Ok(normalize_card(raw, &subtypes, &bindings)?)
}

fn load_subtypes(conn: &Connection, id: CardId) -> Result<SubtypeRows, OperationError> {
    let spell = conn
        .query_row(
            r#"SELECT "Costo" FROM "Hechizo" WHERE "IdCarta" = ?1"#,
            params![id],
            |row| Ok(SpellDetails { cost: row.get(0)? }),
        )
        .optional()?;
    let ally = conn
        .query_row(
            r#"SELECT "Costo", "Ataque", "Vida" FROM "Aliado" WHERE "IdCarta" = ?1"#,
            params![id],
            |row| {
                Ok(AllyDetails {
                    cost: row.get(0)?,
                    attack: row.get(1)?,
                    health: row.get(2)?,
                })
            },
        )
        .optional()?;
    let character = conn
        .query_row(
            r#"SELECT "Acciones", "Ataque", "Vida" FROM "Personaje" WHERE "IdCarta" = ?1"#,
            params![id],
            |row| {
                Ok(CharacterDetails {
                    actions: row.get(0)?,
                    attack: row.get(1)?,
                    health: row.get(2)?,
                })
            },
        )
        .optional()?;

    Ok(SubtypeRows {
        spell,
        ally,
        character,
    })
}

fn load_bindings(conn: &Connection, id: CardId) -> Result<Vec<EffectBindingRow>, OperationError> {
    let mut stmt = conn.prepare(
        r#"SELECT e."IdEfecto", e."Nombre", e."Descripcion", e."EsBasico",
                  t."Cantidad", t."Objetivo", t."Duracion", t."Repetible", t."Trigger", t."Flechas"
           FROM "Efecto" e
           JOIN "Tiene" t ON e."IdEfecto" = t."IdEfecto"
           WHERE t."IdCarta" = ?1
           ORDER BY t.rowid"#,
    )?;
    let rows = stmt.query_map(params![id], |row| {
        Ok(EffectBindingRow {
            effect_id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            is_basic: row.get(3)?,
            amount: row.get(4)?,
            target: row.get(5)?,
            duration: row.get(6)?,
            repeatable: row.get(7)?,
            trigger: row.get(8)?,
            arrows: row.get(9)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
