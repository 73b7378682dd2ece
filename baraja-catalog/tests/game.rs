use baraja_catalog::*;
use serde_json::json;

fn view(id: i64, kind: CardKind, effects: Vec<CardEffect>) -> CardView {
    CardView {
        id,
        name: format!("Card {id}"),
        description: None,
        image_path: None,
        kind,
        effects,
        arrows: vec![],
    }
}

fn deck(cards: Vec<CardView>) -> DeckWithCards {
    DeckWithCards {
        deck: Deck {
            id: 1,
            owner_id: 10,
            name: "Starter".to_string(),
            sleeve_path: None,
            card_count: None,
        },
        cards: cards
            .into_iter()
            .map(|card| DeckCard {
                card,
                image_variation: None,
            })
            .collect(),
    }
}

#[test]
fn card_types_map_to_loader_names() {
    let ally = view(
        2,
        CardKind::Ally(AllyDetails {
            cost: 2,
            attack: 1,
            health: 3,
        }),
        vec![],
    );
    let unit = GameCard::from_card(&ally).unwrap();
    assert_eq!(unit.card_type, "unit");
    assert_eq!((unit.cost, unit.attack, unit.health), (2, Some(1), Some(3)));

    let hero = view(
        3,
        CardKind::Character(CharacterDetails {
            actions: 2,
            attack: 4,
            health: 20,
        }),
        vec![],
    );
    let legend = GameCard::from_card(&hero).unwrap();
    assert_eq!(legend.card_type, "legend");
    assert_eq!(legend.cost, 0);

    let spell = view(4, CardKind::Spell(SpellDetails { cost: 3 }), vec![]);
    let json = serde_json::to_value(GameCard::from_card(&spell).unwrap()).unwrap();
    assert_eq!(json["type"], "spell");
    assert!(json.get("attack").is_none());
}

#[test]
fn effects_default_target_and_carry_direction() {
    let effect = CardEffect {
        effect_id: 1,
        name: "Shove".to_string(),
        description: None,
        is_basic: false,
        amount: Some(1),
        target: None,
        duration: None,
        repeatable: Some(false),
        trigger: Some("OnPlay".to_string()),
        arrows: Some("N".to_string()),
    };
    let card = view(5, CardKind::Spell(SpellDetails { cost: 1 }), vec![effect]);
    let json = serde_json::to_value(GameCard::from_card(&card).unwrap()).unwrap();
    assert_eq!(
        json["effects"],
        json!([{"type": "Shove", "target": "Enemy", "value": 1, "trigger": "OnPlay", "direction": "N"}])
    );
}

#[test]
fn untyped_cards_are_left_out_of_the_deck() {
    let file = GameDeckFile::from_decks(&[deck(vec![
        view(1, CardKind::Untyped, vec![]),
        view(2, CardKind::Spell(SpellDetails { cost: 1 }), vec![]),
    ])]);
    assert_eq!(file.decks.len(), 1);
    assert_eq!(file.decks[0].name, "Starter");
    let ids: Vec<_> = file.decks[0].cards.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2]);
}
