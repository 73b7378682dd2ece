//! Stateful deck session over a [`DeckApi`], with change notifications.
//!
//! A [`DeckSession`] remembers the last fetched deck list and the selected
//! deck with its cards. Each operation returns its outcome to the caller and
//! also publishes a [`SessionEvent`] to every subscriber channel.

use baraja_catalog::{CardId, Deck, DeckCardRow, DeckId, NewDeck, UserId};
use tokio::sync::mpsc;

use crate::api::DeckApi;
use crate::error::ClientError;

/// Notifications published by a [`DeckSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    DecksLoaded(Vec<Deck>),
    DeckSelected {
        deck: Deck,
        cards: Vec<DeckCardRow>,
    },
    DeckCreated(Deck),
    DeckUpdated(Deck),
    DeckDeleted {
        id: DeckId,
    },
    /// The local deck list changed after a create, update or delete.
    DecksUpdated(Vec<Deck>),
    CardAdded {
        deck_id: DeckId,
        card_id: CardId,
        cards: Vec<DeckCardRow>,
    },
    CardRemoved {
        deck_id: DeckId,
        card_id: CardId,
        cards: Vec<DeckCardRow>,
    },
    Error {
        message: String,
        error: String,
    },
}

impl SessionEvent {
    /// Stable event name, for logs and frontends that dispatch on strings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DecksLoaded(_) => "decksLoaded",
            Self::DeckSelected { .. } => "deckSelected",
            Self::DeckCreated(_) => "deckCreated",
            Self::DeckUpdated(_) => "deckUpdated",
            Self::DeckDeleted { .. } => "deckDeleted",
            Self::DecksUpdated(_) => "decksUpdated",
            Self::CardAdded { .. } => "cardAdded",
            Self::CardRemoved { .. } => "cardRemoved",
            Self::Error { .. } => "error",
        }
    }
}

/// Deck state plus subscribers, driven through a [`DeckApi`].
///
/// Single consumer: operations take `&mut self` and are not guarded
/// against interleaving.
pub struct DeckSession<A> {
    api: A,
    decks: Vec<Deck>,
    current: Option<Deck>,
    current_cards: Vec<DeckCardRow>,
    subscribers: Vec<mpsc::UnboundedSender<SessionEvent>>,
}

impl<A: DeckApi> DeckSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            decks: Vec::new(),
            current: None,
            current_cards: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Register a new subscriber. Events published from now on are delivered
    /// to the returned receiver; dropping it unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// The last fetched deck list.
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn current_deck(&self) -> Option<&Deck> {
        self.current.as_ref()
    }

    pub fn current_cards(&self) -> &[DeckCardRow] {
        &self.current_cards
    }

    // ── Deck list ───────────────────────────────────────────────────────────

    pub async fn load_decks(&mut self) -> Result<&[Deck], ClientError> {
        let result = self.api.list_decks().await;
        let decks = self.check(result, "Failed to load decks")?;
        self.decks = decks;
        self.publish(SessionEvent::DecksLoaded(self.decks.clone()));
        Ok(&self.decks)
    }

    pub async fn load_decks_by_owner(&mut self, owner_id: UserId) -> Result<&[Deck], ClientError> {
        let result = self.api.list_decks_by_owner(owner_id).await;
        let decks = self.check(result, "Failed to load the user's decks")?;
        self.decks = decks;
        self.publish(SessionEvent::DecksLoaded(self.decks.clone()));
        Ok(&self.decks)
    }

    /// Fetch a deck and its cards and make it the selected deck.
    pub async fn select_deck(
        &mut self,
        id: DeckId,
    ) -> Result<(Deck, Vec<DeckCardRow>), ClientError> {
        let result = self.api.get_deck(id).await;
        let deck = self.check(result, "Failed to select deck")?;
        let result = self.api.list_cards(id).await;
        let cards = self.check(result, "Failed to select deck")?;

        // Selection only changes once both fetches succeed
        self.current = Some(deck.clone());
        self.current_cards = cards.clone();

        self.publish(SessionEvent::DeckSelected {
            deck: deck.clone(),
            cards: cards.clone(),
        });
        Ok((deck, cards))
    }

    // ── Deck mutations ──────────────────────────────────────────────────────

    pub async fn create_deck(&mut self, deck: &NewDeck) -> Result<Deck, ClientError> {
        let result = self.api.create_deck(deck).await;
        let created = self.check(result, "Failed to create deck")?;
        self.decks.push(created.clone());
        self.publish(SessionEvent::DeckCreated(created.clone()));
        self.publish(SessionEvent::DecksUpdated(self.decks.clone()));
        Ok(created)
    }

    /// Update a deck, replacing it in the local list and as the selection.
    pub async fn update_deck(&mut self, id: DeckId, deck: &NewDeck) -> Result<Deck, ClientError> {
        let result = self.api.update_deck(id, deck).await;
        let updated = self.check(result, "Failed to update deck")?;

        if let Some(slot) = self.decks.iter_mut().find(|d| d.id == id) {
            *slot = updated.clone();
        }
        if self.current.as_ref().is_some_and(|d| d.id == id) {
            self.current = Some(updated.clone());
        }

        self.publish(SessionEvent::DeckUpdated(updated.clone()));
        self.publish(SessionEvent::DecksUpdated(self.decks.clone()));
        Ok(updated)
    }

    /// Delete a deck, dropping it from the local list and clearing the
    /// selection if it was selected.
    pub async fn delete_deck(&mut self, id: DeckId) -> Result<(), ClientError> {
        let result = self.api.delete_deck(id).await;
        self.check(result, "Failed to delete deck")?;

        self.decks.retain(|d| d.id != id);
        if self.current.as_ref().is_some_and(|d| d.id == id) {
            self.current = None;
            self.current_cards.clear();
        }

        self.publish(SessionEvent::DeckDeleted { id });
        self.publish(SessionEvent::DecksUpdated(self.decks.clone()));
        Ok(())
    }

    // ── Selected deck cards ─────────────────────────────────────────────────

    /// Add a card to the selected deck and reload its card list.
    pub async fn add_card(
        &mut self,
        card_id: CardId,
        variation: Option<&str>,
    ) -> Result<&[DeckCardRow], ClientError> {
        let deck_id = self.selected_id()?;

        let result = self.api.add_card(deck_id, card_id, variation).await;
        self.check(result, "Failed to add card to deck")?;
        let result = self.api.list_cards(deck_id).await;
        self.current_cards = self.check(result, "Failed to add card to deck")?;

        self.publish(SessionEvent::CardAdded {
            deck_id,
            card_id,
            cards: self.current_cards.clone(),
        });
        Ok(&self.current_cards)
    }

    /// Remove a card from the selected deck. Every local copy is dropped,
    /// matching the service, without a reload.
    pub async fn remove_card(&mut self, card_id: CardId) -> Result<&[DeckCardRow], ClientError> {
        let deck_id = self.selected_id()?;

        let result = self.api.remove_card(deck_id, card_id).await;
        self.check(result, "Failed to remove card from deck")?;
        self.current_cards.retain(|c| c.id != card_id);

        self.publish(SessionEvent::CardRemoved {
            deck_id,
            card_id,
            cards: self.current_cards.clone(),
        });
        Ok(&self.current_cards)
    }

    // ── Helpers ─────────────────────────────────────────────────────────────

    fn selected_id(&self) -> Result<DeckId, ClientError> {
        self.current
            .as_ref()
            .map(|d| d.id)
            .ok_or(ClientError::NoDeckSelected)
    }

    /// Publish an error event for a failed call before handing the error back.
    fn check<T>(&mut self, result: Result<T, ClientError>, message: &str) -> Result<T, ClientError> {
        result.map_err(|e| {
            log::warn!("{}: {}", message, e);
            self.publish(SessionEvent::Error {
                message: message.to_string(),
                error: e.to_string(),
            });
            e
        })
    }

    fn publish(&mut self, event: SessionEvent) {
        log::debug!(
            "Session event '{}' to {} subscribers",
            event.name(),
            self.subscribers.len()
        );
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
