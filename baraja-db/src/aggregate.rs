//! Deck aggregation: decks composed with their normalized member cards.

use baraja_catalog::{DeckCard, DeckId, DeckWithCards, GameDeckFile};
use rusqlite::Connection;

use crate::operations::OperationError;
use crate::queries::{get_card_by_id, get_deck, list_cards_in_deck};

/// Fetch a deck with its member cards, each normalized, ordered by card id.
///
/// A card held twice appears twice, each copy with its own image variation.
/// Returns `None` if the deck does not exist.
pub fn get_deck_with_cards(
    conn: &Connection,
    deck_id: DeckId,
) -> Result<Option<DeckWithCards>, OperationError> {
    let Some(deck) = get_deck(conn, deck_id)? else {
        return Ok(None);
    };

    let members = list_cards_in_deck(conn, deck_id)?;
    let mut cards = Vec::with_capacity(members.len());
    for member in members {
        match get_card_by_id(conn, member.id)? {
            Some(card) => cards.push(DeckCard {
                card,
                image_variation: member.variation,
            }),
            None => log::warn!("Deck {} references missing card {}", deck_id, member.id),
        }
    }

    Ok(Some(DeckWithCards { deck, cards }))
}

/// Build the game engine's deck file from the given decks, in order.
pub fn decks_for_game(
    conn: &Connection,
    deck_ids: &[DeckId],
) -> Result<GameDeckFile, OperationError> {
    let mut decks = Vec::with_capacity(deck_ids.len());
    for &id in deck_ids {
        let deck = get_deck_with_cards(conn, id)?.ok_or_else(|| OperationError::NotFound {
            entity_type: "deck".to_string(),
            id: id.to_string(),
        })?;
        decks.push(deck);
    }
    Ok(GameDeckFile::from_decks(&decks))
}
