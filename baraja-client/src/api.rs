use baraja_catalog::{CardId, Deck, DeckCardRow, DeckId, NewDeck, UserId};

use crate::error::ClientError;

/// The deck service operations the session drives.
///
/// Confirmation bodies (deletes, membership changes) come back as raw JSON
/// since the service does not promise a shape for them.
#[allow(async_fn_in_trait)]
pub trait DeckApi {
    async fn list_decks(&self) -> Result<Vec<Deck>, ClientError>;

    async fn get_deck(&self, id: DeckId) -> Result<Deck, ClientError>;

    async fn list_decks_by_owner(&self, owner_id: UserId) -> Result<Vec<Deck>, ClientError>;

    async fn create_deck(&self, deck: &NewDeck) -> Result<Deck, ClientError>;

    async fn update_deck(&self, id: DeckId, deck: &NewDeck) -> Result<Deck, ClientError>;

    async fn delete_deck(&self, id: DeckId) -> Result<serde_json::Value, ClientError>;

    async fn add_card(
        &self,
        deck_id: DeckId,
        card_id: CardId,
        variation: Option<&str>,
    ) -> Result<serde_json::Value, ClientError>;

    async fn remove_card(
        &self,
        deck_id: DeckId,
        card_id: CardId,
    ) -> Result<serde_json::Value, ClientError>;

    async fn list_cards(&self, deck_id: DeckId) -> Result<Vec<DeckCardRow>, ClientError>;
}
