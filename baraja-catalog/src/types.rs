//! Data model types for the card catalog and decks.
//!
//! Two families of types live here: the raw row shapes handed over by the
//! storage layer (Spanish column names, inconsistent alias casing), and the
//! normalized views produced from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

pub type CardId = i64;
pub type EffectId = i64;
pub type DeckId = i64;
pub type UserId = i64;

/// Target type assumed for an arrow or a game effect when the binding names none.
pub const DEFAULT_TARGET: &str = "Enemy";

// ── Subtypes ────────────────────────────────────────────────────────────────

/// Spell-only attributes (`Hechizo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDetails {
    #[serde(alias = "Costo")]
    pub cost: i64,
}

/// Ally attributes (`Aliado`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllyDetails {
    #[serde(alias = "Costo")]
    pub cost: i64,
    #[serde(alias = "Ataque")]
    pub attack: i64,
    #[serde(alias = "Vida")]
    pub health: i64,
}

/// Character attributes (`Personaje`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDetails {
    #[serde(alias = "Acciones")]
    pub actions: i64,
    #[serde(alias = "Ataque")]
    pub attack: i64,
    #[serde(alias = "Vida")]
    pub health: i64,
}

/// The three mutually exclusive card subtypes, in resolution precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtype {
    Spell,
    Ally,
    Character,
}

impl Subtype {
    pub const ALL: [Subtype; 3] = [Subtype::Spell, Subtype::Ally, Subtype::Character];

    /// Name of the table holding rows of this subtype.
    pub fn table(self) -> &'static str {
        match self {
            Self::Spell => "Hechizo",
            Self::Ally => "Aliado",
            Self::Character => "Personaje",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spell => "Spell",
            Self::Ally => "Ally",
            Self::Character => "Character",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a subtype name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid card type: {0}")]
pub struct InvalidSubtype(pub String);

impl FromStr for Subtype {
    type Err = InvalidSubtype;

    /// Accepts the table names and the English names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hechizo" | "spell" => Ok(Self::Spell),
            "aliado" | "ally" => Ok(Self::Ally),
            "personaje" | "character" => Ok(Self::Character),
            _ => Err(InvalidSubtype(s.to_string())),
        }
    }
}

/// Resolved card type with its subtype-specific details.
///
/// Serializes as `{"type": "...", "typeDetails": {...}}`; `Untyped` carries
/// no `typeDetails`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "typeDetails")]
pub enum CardKind {
    Spell(SpellDetails),
    Ally(AllyDetails),
    Character(CharacterDetails),
    Untyped,
}

impl CardKind {
    pub fn subtype(&self) -> Option<Subtype> {
        match self {
            Self::Spell(_) => Some(Subtype::Spell),
            Self::Ally(_) => Some(Subtype::Ally),
            Self::Character(_) => Some(Subtype::Character),
            Self::Untyped => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.subtype().map_or("Untyped", Subtype::as_str)
    }
}

// ── Raw rows ────────────────────────────────────────────────────────────────

/// A `Carta` row joined with its optional `Imagen` path.
///
/// The image column arrives under several aliases depending on the query and
/// on whether the store lower-cased it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCard {
    #[serde(rename = "IdCarta", alias = "id")]
    pub id: Option<CardId>,
    #[serde(rename = "Nombre", alias = "name")]
    pub name: Option<String>,
    #[serde(rename = "Descripcion", alias = "description")]
    pub description: Option<String>,
    #[serde(
        rename = "imagePath",
        alias = "imagepath",
        alias = "imagenRuta",
        alias = "imagenruta",
        alias = "Ruta"
    )]
    pub image_path: Option<String>,
}

/// The subtype rows found for one card; each table yields zero or one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtypeRows {
    pub spell: Option<SpellDetails>,
    pub ally: Option<AllyDetails>,
    pub character: Option<CharacterDetails>,
}

impl SubtypeRows {
    /// Subtypes with a row present, in precedence order.
    pub fn present(&self) -> Vec<Subtype> {
        let mut found = Vec::new();
        if self.spell.is_some() {
            found.push(Subtype::Spell);
        }
        if self.ally.is_some() {
            found.push(Subtype::Ally);
        }
        if self.character.is_some() {
            found.push(Subtype::Character);
        }
        found
    }

    /// Subtypes that have a row but lose to a higher-precedence one.
    ///
    /// Non-empty only when the store violates the one-subtype invariant.
    pub fn shadowed(&self) -> Vec<Subtype> {
        self.present().into_iter().skip(1).collect()
    }

    /// Pick the subtype by precedence: Spell, then Ally, then Character.
    pub fn resolve(&self) -> CardKind {
        if let Some(spell) = self.spell {
            CardKind::Spell(spell)
        } else if let Some(ally) = self.ally {
            CardKind::Ally(ally)
        } else if let Some(character) = self.character {
            CardKind::Character(character)
        } else {
            CardKind::Untyped
        }
    }
}

/// An `Efecto` row joined with one `Tiene` binding for a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectBindingRow {
    #[serde(rename = "IdEfecto", alias = "effectId")]
    pub effect_id: EffectId,
    #[serde(rename = "Nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "Descripcion", alias = "description")]
    pub description: Option<String>,
    #[serde(rename = "EsBasico", alias = "isBasic")]
    pub is_basic: bool,
    #[serde(alias = "Cantidad")]
    pub amount: Option<i64>,
    #[serde(alias = "Objetivo")]
    pub target: Option<String>,
    #[serde(alias = "Duracion")]
    pub duration: Option<i64>,
    #[serde(alias = "Repetible", alias = "repetible")]
    pub repeatable: Option<bool>,
    #[serde(rename = "Trigger", alias = "trigger")]
    pub trigger: Option<String>,
    #[serde(alias = "Flechas")]
    pub arrows: Option<String>,
}

impl EffectBindingRow {
    /// The directional arrow value, if the binding carries a non-empty one.
    ///
    /// Both the per-effect `arrows` field and the derived arrow list go
    /// through this.
    pub fn arrow_direction(&self) -> Option<&str> {
        non_empty(self.arrows.as_deref())
    }

    /// The binding target, treating an empty string as absent.
    pub fn target_name(&self) -> Option<&str> {
        non_empty(self.target.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ── Normalized views ────────────────────────────────────────────────────────

/// An effect as attached to a card, with the binding parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEffect {
    pub effect_id: EffectId,
    pub name: String,
    pub description: Option<String>,
    pub is_basic: bool,
    pub amount: Option<i64>,
    pub target: Option<String>,
    pub duration: Option<i64>,
    pub repeatable: Option<bool>,
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrows: Option<String>,
}

impl CardEffect {
    pub fn target_or_default(&self) -> &str {
        non_empty(self.target.as_deref()).unwrap_or(DEFAULT_TARGET)
    }
}

/// A directional targeting marker derived from an effect binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub target_type: String,
    pub direction: String,
    pub card_id: CardId,
}

/// A card with its resolved type, effects and arrows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: CardId,
    pub name: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
    #[serde(flatten)]
    pub kind: CardKind,
    pub effects: Vec<CardEffect>,
    pub arrows: Vec<Arrow>,
}

/// A card joined with exactly one subtype table, without effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedCard {
    pub id: CardId,
    pub name: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
    #[serde(flatten)]
    pub kind: CardKind,
}

/// A reusable effect definition (`Efecto`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    pub id: EffectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "is_basic")]
    pub is_basic: bool,
}

/// A card carrying a given effect, with the binding parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithBinding {
    pub card_id: CardId,
    pub name: String,
    pub amount: Option<i64>,
    pub target: Option<String>,
    pub duration: Option<i64>,
    pub repeatable: Option<bool>,
    pub trigger: Option<String>,
    pub arrows: Option<String>,
}

// ── Decks ───────────────────────────────────────────────────────────────────

/// A deck (`Baraja`) record.
///
/// `card_count` is only filled in by the listing queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(rename = "IdBaraja", alias = "id")]
    pub id: DeckId,
    #[serde(rename = "IdUsuario", alias = "userId")]
    pub owner_id: UserId,
    #[serde(rename = "NombreBaraja", alias = "name")]
    pub name: String,
    #[serde(rename = "RutaSleeve", alias = "sleevePath", default)]
    pub sleeve_path: Option<String>,
    #[serde(
        rename = "cantidadCartas",
        alias = "cantidadcartas",
        default,
        deserialize_with = "count_from_number_or_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_count: Option<i64>,
}

/// Counts may arrive as a JSON number or as a numeric string (`"3"`).
fn count_from_number_or_text<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(i64),
        Text(String),
    }

    match Option::<Count>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Count::Number(n)) => Ok(Some(n)),
        Some(Count::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid card count '{}'", text))),
    }
}

/// Fields for creating or replacing a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDeck {
    #[serde(rename = "IdUsuario", alias = "userId")]
    pub owner_id: UserId,
    #[serde(rename = "NombreBaraja", alias = "name")]
    pub name: String,
    #[serde(rename = "RutaSleeve", alias = "sleevePath", default)]
    pub sleeve_path: Option<String>,
}

/// A deck membership row (`Contiene`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    #[serde(rename = "IdBaraja")]
    pub deck_id: DeckId,
    #[serde(rename = "IdCarta")]
    pub card_id: CardId,
    #[serde(rename = "VariacionImagen", default)]
    pub variation: Option<String>,
}

/// A member card as listed for a deck, without type resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCardRow {
    #[serde(rename = "IdCarta", alias = "id")]
    pub id: CardId,
    #[serde(rename = "Nombre", alias = "name", default)]
    pub name: String,
    #[serde(rename = "Descripcion", alias = "description", default)]
    pub description: Option<String>,
    #[serde(rename = "VariacionImagen", alias = "variacionImagen", default)]
    pub variation: Option<String>,
    #[serde(rename = "imagePath", alias = "imagepath", default)]
    pub image_path: Option<String>,
}

/// A normalized member card plus its per-membership image variation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCard {
    #[serde(flatten)]
    pub card: CardView,
    pub image_variation: Option<String>,
}

/// A deck with its member cards resolved through the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckWithCards {
    #[serde(flatten)]
    pub deck: Deck,
    pub cards: Vec<DeckCard>,
}

// ── Catalog (seed data) ─────────────────────────────────────────────────────

/// Reference data loaded from a YAML catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub cards: Vec<CatalogCard>,
}

/// A card definition in the catalog, with its subtype block and bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCard {
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub spell: Option<SpellDetails>,
    #[serde(default)]
    pub ally: Option<AllyDetails>,
    #[serde(default)]
    pub character: Option<CharacterDetails>,
    #[serde(default)]
    pub effects: Vec<CatalogBinding>,
}

/// A card-to-effect binding in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBinding {
    pub effect: EffectId,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub arrows: Option<String>,
}
