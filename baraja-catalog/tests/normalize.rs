use baraja_catalog::*;
use serde_json::json;

fn raw(id: i64, name: &str) -> RawCard {
    RawCard {
        id: Some(id),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn binding(effect_id: i64, target: Option<&str>, arrows: Option<&str>) -> EffectBindingRow {
    EffectBindingRow {
        effect_id,
        name: format!("Effect {effect_id}"),
        target: target.map(str::to_string),
        arrows: arrows.map(str::to_string),
        ..Default::default()
    }
}

fn spell(cost: i64) -> SpellDetails {
    SpellDetails { cost }
}

fn ally() -> AllyDetails {
    AllyDetails {
        cost: 2,
        attack: 1,
        health: 3,
    }
}

fn character() -> CharacterDetails {
    CharacterDetails {
        actions: 2,
        attack: 4,
        health: 20,
    }
}

#[test]
fn single_subtype_row_sets_type() {
    let cases = [
        (
            SubtypeRows {
                spell: Some(spell(1)),
                ..Default::default()
            },
            "Spell",
        ),
        (
            SubtypeRows {
                ally: Some(ally()),
                ..Default::default()
            },
            "Ally",
        ),
        (
            SubtypeRows {
                character: Some(character()),
                ..Default::default()
            },
            "Character",
        ),
    ];
    for (rows, expected) in cases {
        let card = normalize_card(&raw(1, "Card"), &rows, &[]).unwrap();
        assert_eq!(card.kind.type_name(), expected);
        assert!(rows.shadowed().is_empty());
    }
}

#[test]
fn no_subtype_row_is_untyped() {
    let card = normalize_card(&raw(4, "Blank"), &SubtypeRows::default(), &[]).unwrap();
    assert_eq!(card.kind, CardKind::Untyped);

    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["type"], "Untyped");
    assert!(json.get("typeDetails").is_none());
}

#[test]
fn spell_wins_over_ally() {
    let rows = SubtypeRows {
        spell: Some(spell(5)),
        ally: Some(ally()),
        character: None,
    };
    let card = normalize_card(&raw(2, "Confused"), &rows, &[]).unwrap();
    assert_eq!(card.kind, CardKind::Spell(spell(5)));
    assert_eq!(rows.shadowed(), vec![Subtype::Ally]);
}

#[test]
fn ally_wins_over_character() {
    let rows = SubtypeRows {
        spell: None,
        ally: Some(ally()),
        character: Some(character()),
    };
    let card = normalize_card(&raw(2, "Confused"), &rows, &[]).unwrap();
    assert_eq!(card.kind, CardKind::Ally(ally()));
    assert_eq!(rows.shadowed(), vec![Subtype::Character]);
}

#[test]
fn missing_id_is_rejected() {
    let card = RawCard {
        name: Some("Nameless".to_string()),
        ..Default::default()
    };
    let err = normalize_card(&card, &SubtypeRows::default(), &[]).unwrap_err();
    assert_eq!(err, NormalizeError::MissingId);
}

#[test]
fn arrows_are_the_bindings_with_directions_in_order() {
    let bindings = [
        binding(1, Some("Ally"), Some("N")),
        binding(2, Some("Ally"), None),
        binding(3, None, Some("SE")),
        binding(4, None, Some("")),
        binding(5, Some("Self"), Some("W")),
    ];
    let card = normalize_card(&raw(9, "Compass"), &SubtypeRows::default(), &bindings).unwrap();

    assert_eq!(card.effects.len(), 5);
    let directions: Vec<_> = card.arrows.iter().map(|a| a.direction.as_str()).collect();
    assert_eq!(directions, vec!["N", "SE", "W"]);
    let targets: Vec<_> = card.arrows.iter().map(|a| a.target_type.as_str()).collect();
    assert_eq!(targets, vec!["Ally", "Enemy", "Self"]);
    assert!(card.arrows.iter().all(|a| a.card_id == 9));

    // The per-effect field agrees with the arrow list.
    let effect_arrows: Vec<_> = card
        .effects
        .iter()
        .filter_map(|e| e.arrows.as_deref())
        .collect();
    assert_eq!(effect_arrows, directions);
}

#[test]
fn normalizing_twice_gives_equal_output() {
    let rows = SubtypeRows {
        ally: Some(ally()),
        ..Default::default()
    };
    let bindings = [binding(1, None, Some("N")), binding(2, Some("Ally"), None)];
    let first = normalize_card(&raw(3, "Squire"), &rows, &bindings).unwrap();
    let second = normalize_card(&raw(3, "Squire"), &rows, &bindings).unwrap();
    assert_eq!(first, second);
}

#[test]
fn image_path_casing_is_canonicalized() {
    let lower: RawCard =
        serde_json::from_value(json!({"IdCarta": 1, "imagepath": "img/a.png"})).unwrap();
    let camel: RawCard =
        serde_json::from_value(json!({"IdCarta": 1, "imagePath": "img/a.png"})).unwrap();
    let spanish: RawCard =
        serde_json::from_value(json!({"IdCarta": 1, "imagenRuta": "img/a.png"})).unwrap();
    assert_eq!(lower.image_path.as_deref(), Some("img/a.png"));
    assert_eq!(lower, camel);
    assert_eq!(lower, spanish);

    let card = normalize_card(&lower, &SubtypeRows::default(), &[]).unwrap();
    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["imagePath"], "img/a.png");

    let bare: RawCard = serde_json::from_value(json!({"IdCarta": 1})).unwrap();
    let card = normalize_card(&bare, &SubtypeRows::default(), &[]).unwrap();
    let json = serde_json::to_value(&card).unwrap();
    assert!(json["imagePath"].is_null());
}

#[test]
fn fireball_end_to_end() {
    let raw: RawCard = serde_json::from_value(json!({"id": 7, "name": "Fireball"})).unwrap();
    let spell: SpellDetails = serde_json::from_value(json!({"IdCarta": 7, "Costo": 3})).unwrap();
    let bindings: Vec<EffectBindingRow> = serde_json::from_value(json!([{
        "IdEfecto": 1,
        "Nombre": "Burn",
        "Descripcion": "...",
        "EsBasico": true,
        "amount": 2,
        "target": null,
        "duration": 1,
        "repetible": false,
        "Trigger": "OnPlay",
        "arrows": null
    }]))
    .unwrap();
    let rows = SubtypeRows {
        spell: Some(spell),
        ..Default::default()
    };

    let card = normalize_card(&raw, &rows, &bindings).unwrap();
    assert!(card.arrows.is_empty());

    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["type"], "Spell");
    assert_eq!(json["typeDetails"], json!({"cost": 3}));
    assert_eq!(json["arrows"], json!([]));
    assert_eq!(
        json["effects"],
        json!([{
            "effectId": 1,
            "name": "Burn",
            "description": "...",
            "isBasic": true,
            "amount": 2,
            "target": null,
            "duration": 1,
            "repeatable": false,
            "trigger": "OnPlay"
        }])
    );
}

#[test]
fn directional_binding_produces_arrow() {
    let bindings: Vec<EffectBindingRow> = serde_json::from_value(json!([{
        "IdEfecto": 2,
        "Nombre": "Shove",
        "target": "Ally",
        "arrows": "N"
    }]))
    .unwrap();
    let card = normalize_card(&raw(9, "Shover"), &SubtypeRows::default(), &bindings).unwrap();
    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(
        json["arrows"],
        json!([{"targetType": "Ally", "direction": "N", "cardId": 9}])
    );
}

#[test]
fn subtype_names_parse_in_both_languages() {
    assert_eq!("Hechizo".parse::<Subtype>().unwrap(), Subtype::Spell);
    assert_eq!("ALIADO".parse::<Subtype>().unwrap(), Subtype::Ally);
    assert_eq!("character".parse::<Subtype>().unwrap(), Subtype::Character);
    assert!("trampa".parse::<Subtype>().is_err());
}
