//! Deck file format consumed by the game engine's card loader.
//!
//! Decks are written as `{"decks": [{"name", "cards": [...]}]}`. Spells map
//! to `"spell"`, allies to `"unit"` and characters to `"legend"`.

use serde::{Deserialize, Serialize};

use crate::types::{CardId, CardKind, CardView, DeckWithCards};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDeckFile {
    pub decks: Vec<GameDeck>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDeck {
    pub name: String,
    pub cards: Vec<GameCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCard {
    pub id: CardId,
    pub name: String,
    pub description: String,
    pub cost: i64,
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i64>,
    #[serde(default)]
    pub effects: Vec<GameEffect>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEffect {
    #[serde(rename = "type")]
    pub effect_type: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

impl GameCard {
    /// Convert a normalized card. Untyped cards have no game representation.
    pub fn from_card(card: &CardView) -> Option<Self> {
        // Characters carry no cost column.
        let (card_type, cost, attack, health) = match card.kind {
            CardKind::Spell(s) => ("spell", s.cost, None, None),
            CardKind::Ally(a) => ("unit", a.cost, Some(a.attack), Some(a.health)),
            CardKind::Character(c) => ("legend", 0, Some(c.attack), Some(c.health)),
            CardKind::Untyped => return None,
        };

        let effects = card
            .effects
            .iter()
            .map(|e| GameEffect {
                effect_type: e.name.clone(),
                target: e.target_or_default().to_string(),
                value: e.amount,
                trigger: e.trigger.clone(),
                direction: e.arrows.clone(),
            })
            .collect();

        Some(Self {
            id: card.id,
            name: card.name.clone(),
            description: card.description.clone().unwrap_or_default(),
            cost,
            card_type: card_type.to_string(),
            attack,
            health,
            effects,
        })
    }
}

impl GameDeck {
    pub fn from_deck(deck: &DeckWithCards) -> Self {
        let mut cards = Vec::with_capacity(deck.cards.len());
        for member in &deck.cards {
            match GameCard::from_card(&member.card) {
                Some(card) => cards.push(card),
                None => log::warn!(
                    "Skipping untyped card {} in deck {}",
                    member.card.id,
                    deck.deck.id
                ),
            }
        }
        Self {
            name: deck.deck.name.clone(),
            cards,
        }
    }
}

impl GameDeckFile {
    pub fn from_decks(decks: &[DeckWithCards]) -> Self {
        Self {
            decks: decks.iter().map(GameDeck::from_deck).collect(),
        }
    }
}
