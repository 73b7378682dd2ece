use baraja_catalog::*;
use baraja_db::*;
use rusqlite::Connection;
use serde_json::json;

const CATALOG: &str = r#"
effects:
  - id: 1
    name: Burn
  - id: 2
    name: Shove
cards:
  - id: 7
    name: Fireball
    image: img/fireball.png
    spell:
      cost: 3
    effects:
      - effect: 1
        amount: 2
        trigger: OnPlay
  - id: 9
    name: Squire
    ally:
      cost: 2
      attack: 1
      health: 3
    effects:
      - effect: 2
        target: Ally
        arrows: N
  - id: 11
    name: Hero
    description: The leader
    character:
      actions: 2
      attack: 4
      health: 20
  - id: 12
    name: Blank
"#;

fn seeded() -> Connection {
    let conn = open_memory().unwrap();
    seed_catalog(&conn, &parse_catalog(CATALOG, "test").unwrap()).unwrap();
    conn
}

fn deck_with(conn: &Connection, name: &str, cards: &[(i64, Option<&str>)]) -> Deck {
    let deck = create_deck(
        conn,
        &NewDeck {
            owner_id: 10,
            name: name.to_string(),
            sleeve_path: Some("sleeves/blue.png".to_string()),
        },
    )
    .unwrap();
    for &(card_id, variation) in cards {
        add_card_to_deck(conn, deck.id, card_id, variation).unwrap();
    }
    deck
}

#[test]
fn deck_members_are_normalized() {
    let conn = seeded();
    let deck = deck_with(&conn, "Starter", &[(9, None), (7, Some("foil"))]);

    let full = get_deck_with_cards(&conn, deck.id).unwrap().unwrap();
    assert_eq!(full.deck.name, "Starter");
    assert_eq!(full.deck.card_count, Some(2));

    let ids: Vec<_> = full.cards.iter().map(|c| c.card.id).collect();
    assert_eq!(ids, vec![7, 9]);
    assert_eq!(full.cards[0].image_variation.as_deref(), Some("foil"));
    assert_eq!(full.cards[0].card.kind, CardKind::Spell(SpellDetails { cost: 3 }));
    assert_eq!(full.cards[1].card.arrows.len(), 1);
}

#[test]
fn duplicate_copies_keep_their_own_variation() {
    let conn = seeded();
    let deck = deck_with(&conn, "Twins", &[(7, Some("a")), (7, Some("b"))]);

    let full = get_deck_with_cards(&conn, deck.id).unwrap().unwrap();
    let variations: Vec<_> = full
        .cards
        .iter()
        .map(|c| c.image_variation.as_deref())
        .collect();
    assert_eq!(variations, vec![Some("a"), Some("b")]);
}

#[test]
fn missing_deck_is_none() {
    let conn = seeded();
    assert_eq!(get_deck_with_cards(&conn, 404).unwrap(), None);
}

#[test]
fn deck_with_cards_serializes_deck_fields_inline() {
    let conn = seeded();
    let deck = deck_with(&conn, "Starter", &[(7, None)]);

    let json = serde_json::to_value(get_deck_with_cards(&conn, deck.id).unwrap().unwrap()).unwrap();
    assert_eq!(json["IdBaraja"], deck.id);
    assert_eq!(json["NombreBaraja"], "Starter");
    assert_eq!(json["RutaSleeve"], "sleeves/blue.png");
    assert_eq!(json["cards"][0]["type"], "Spell");
    assert_eq!(json["cards"][0]["typeDetails"], json!({"cost": 3}));
    assert_eq!(json["cards"][0]["imageVariation"], serde_json::Value::Null);
}

#[test]
fn game_export_maps_both_decks() {
    let conn = seeded();
    let first = deck_with(&conn, "Fire", &[(7, None), (12, None)]);
    let second = deck_with(&conn, "Steel", &[(9, None), (11, None)]);

    let file = decks_for_game(&conn, &[first.id, second.id]).unwrap();
    assert_eq!(file.decks.len(), 2);

    // The untyped card is skipped
    let fire = &file.decks[0];
    assert_eq!(fire.name, "Fire");
    assert_eq!(fire.cards.len(), 1);
    assert_eq!(fire.cards[0].card_type, "spell");
    assert_eq!(fire.cards[0].effects[0].target, "Enemy");
    assert_eq!(fire.cards[0].effects[0].value, Some(2));

    let steel = &file.decks[1];
    let types: Vec<_> = steel.cards.iter().map(|c| c.card_type.as_str()).collect();
    assert_eq!(types, vec!["unit", "legend"]);
    assert_eq!(steel.cards[1].description, "The leader");
    assert_eq!(steel.cards[0].effects[0].direction.as_deref(), Some("N"));
}

#[test]
fn game_export_with_missing_deck_fails() {
    let conn = seeded();
    let deck = deck_with(&conn, "Fire", &[(7, None)]);

    let err = decks_for_game(&conn, &[deck.id, 404]).unwrap_err();
    match err {
        OperationError::NotFound { entity_type, id } => {
            assert_eq!(entity_type, "deck");
            assert_eq!(id, "404");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}
