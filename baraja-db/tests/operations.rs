use baraja_catalog::*;
use baraja_db::*;
use rusqlite::Connection;
use tempfile::TempDir;

fn test_catalog() -> Catalog {
    Catalog {
        effects: vec![Effect {
            id: 1,
            name: "Burn".to_string(),
            description: Some("Deal damage".to_string()),
            is_basic: true,
        }],
        cards: vec![CatalogCard {
            id: 7,
            name: "Fireball".to_string(),
            description: Some("Hurls fire".to_string()),
            image: Some("img/fireball.png".to_string()),
            spell: Some(SpellDetails { cost: 3 }),
            ally: None,
            character: None,
            effects: vec![CatalogBinding {
                effect: 1,
                amount: Some(2),
                target: None,
                duration: None,
                repeatable: false,
                trigger: Some("OnPlay".to_string()),
                arrows: None,
            }],
        }],
    }
}

fn new_deck(owner_id: i64, name: &str) -> NewDeck {
    NewDeck {
        owner_id,
        name: name.to_string(),
        sleeve_path: None,
    }
}

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

#[test]
fn create_deck_assigns_id() {
    let conn = open_memory().unwrap();
    let first = create_deck(&conn, &new_deck(10, "Starter")).unwrap();
    let second = create_deck(&conn, &new_deck(10, "Aggro")).unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.owner_id, 10);
    assert_eq!(first.name, "Starter");
    assert_eq!(first.card_count, None);
}

#[test]
fn update_deck_replaces_fields() {
    let conn = open_memory().unwrap();
    let deck = create_deck(&conn, &new_deck(10, "Starter")).unwrap();

    let changes = NewDeck {
        owner_id: 11,
        name: "Renamed".to_string(),
        sleeve_path: Some("sleeves/red.png".to_string()),
    };
    let updated = update_deck(&conn, deck.id, &changes).unwrap().unwrap();
    assert_eq!(updated.id, deck.id);
    assert_eq!(updated.owner_id, 11);
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.sleeve_path.as_deref(), Some("sleeves/red.png"));
}

#[test]
fn update_missing_deck_returns_none() {
    let conn = open_memory().unwrap();
    assert_eq!(update_deck(&conn, 404, &new_deck(1, "Ghost")).unwrap(), None);
}

#[test]
fn delete_deck_removes_memberships() {
    let conn = open_memory().unwrap();
    seed_catalog(&conn, &test_catalog()).unwrap();
    let deck = create_deck(&conn, &new_deck(10, "Starter")).unwrap();
    add_card_to_deck(&conn, deck.id, 7, None).unwrap();
    add_card_to_deck(&conn, deck.id, 7, Some("foil")).unwrap();

    assert!(delete_deck(&conn, deck.id).unwrap());
    assert_eq!(get_deck(&conn, deck.id).unwrap(), None);
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Baraja""#), 0);
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Contiene""#), 0);

    // Cards themselves are untouched
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Carta""#), 1);
}

#[test]
fn delete_missing_deck_returns_false() {
    let conn = open_memory().unwrap();
    assert!(!delete_deck(&conn, 404).unwrap());
}

#[test]
fn add_card_records_variation() {
    let conn = open_memory().unwrap();
    seed_catalog(&conn, &test_catalog()).unwrap();
    let deck = create_deck(&conn, &new_deck(10, "Starter")).unwrap();

    let membership = add_card_to_deck(&conn, deck.id, 7, Some("alt-art")).unwrap();
    assert_eq!(
        membership,
        Membership {
            deck_id: deck.id,
            card_id: 7,
            variation: Some("alt-art".to_string()),
        }
    );
}

#[test]
fn add_unknown_card_fails() {
    let conn = open_memory().unwrap();
    let deck = create_deck(&conn, &new_deck(10, "Starter")).unwrap();
    let err = add_card_to_deck(&conn, deck.id, 999, None).unwrap_err();
    assert!(matches!(err, OperationError::Sqlite(_)));
}

#[test]
fn remove_card_removes_every_copy() {
    let conn = open_memory().unwrap();
    seed_catalog(&conn, &test_catalog()).unwrap();
    let deck = create_deck(&conn, &new_deck(10, "Starter")).unwrap();
    add_card_to_deck(&conn, deck.id, 7, None).unwrap();
    add_card_to_deck(&conn, deck.id, 7, None).unwrap();

    assert!(remove_card_from_deck(&conn, deck.id, 7).unwrap());
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Contiene""#), 0);
    assert!(!remove_card_from_deck(&conn, deck.id, 7).unwrap());
}

#[test]
fn seed_catalog_reports_stats() {
    let conn = open_memory().unwrap();
    let stats = seed_catalog(&conn, &test_catalog()).unwrap();
    assert_eq!(
        stats,
        SeedStats {
            effects: 1,
            cards: 1,
            bindings: 1,
        }
    );
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Hechizo""#), 1);
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Imagen""#), 1);
}

#[test]
fn reseeding_replaces_subtype_and_bindings() {
    let conn = open_memory().unwrap();
    seed_catalog(&conn, &test_catalog()).unwrap();

    let mut catalog = test_catalog();
    let card = &mut catalog.cards[0];
    card.spell = None;
    card.ally = Some(AllyDetails {
        cost: 4,
        attack: 3,
        health: 3,
    });
    card.image = None;
    card.effects.clear();
    seed_catalog(&conn, &catalog).unwrap();

    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Carta""#), 1);
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Hechizo""#), 0);
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Aliado""#), 1);
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Imagen""#), 0);
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Tiene""#), 0);
}

#[test]
fn reseeding_keeps_deck_memberships() {
    let conn = open_memory().unwrap();
    seed_catalog(&conn, &test_catalog()).unwrap();
    let deck = create_deck(&conn, &new_deck(10, "Starter")).unwrap();
    add_card_to_deck(&conn, deck.id, 7, None).unwrap();

    seed_catalog(&conn, &test_catalog()).unwrap();
    assert_eq!(count(&conn, r#"SELECT COUNT(*) FROM "Contiene""#), 1);
}

#[test]
fn seed_from_yaml_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.yaml");
    std::fs::write(
        &path,
        r#"
effects:
  - id: 1
    name: Burn
cards:
  - id: 7
    name: Fireball
    spell:
      cost: 3
    effects:
      - effect: 1
        amount: 2
"#,
    )
    .unwrap();

    let conn = open_memory().unwrap();
    let stats = seed_from_catalog(&conn, &path).unwrap();
    assert_eq!(stats.cards, 1);
    assert_eq!(stats.bindings, 1);
}

#[test]
fn seed_from_missing_file_is_catalog_error() {
    let tmp = TempDir::new().unwrap();
    let conn = open_memory().unwrap();
    let err = seed_from_catalog(&conn, &tmp.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, OperationError::Catalog(YamlError::Io { .. })));
}
