//! Card normalization: raw card, subtype and effect-binding rows in, one
//! typed [`CardView`] out.

use thiserror::Error;

use crate::types::{
    Arrow, CardEffect, CardId, CardView, DEFAULT_TARGET, EffectBindingRow, RawCard, SubtypeRows,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("card record has no id")]
    MissingId,
}

/// Build the normalized view of one card.
///
/// The subtype is picked by precedence (Spell, Ally, Character). Several
/// subtype rows for the same card break the store's invariant but still
/// resolve; the losing subtypes are logged. A card with no subtype row
/// resolves to `Untyped`.
pub fn normalize_card(
    raw: &RawCard,
    subtypes: &SubtypeRows,
    bindings: &[EffectBindingRow],
) -> Result<CardView, NormalizeError> {
    let id = raw.id.ok_or(NormalizeError::MissingId)?;

    let kind = subtypes.resolve();
    let shadowed = subtypes.shadowed();
    if !shadowed.is_empty() {
        log::warn!(
            "Card {} has {} subtype rows; using {} over {:?}",
            id,
            shadowed.len() + 1,
            kind.type_name(),
            shadowed,
        );
    } else if kind.subtype().is_none() {
        log::warn!("Card {} has no subtype row", id);
    }

    Ok(CardView {
        id,
        name: raw.name.clone().unwrap_or_default(),
        description: raw.description.clone(),
        image_path: raw.image_path.clone(),
        kind,
        effects: bindings.iter().map(card_effect).collect(),
        arrows: arrows_for(id, bindings),
    })
}

/// Arrows for every binding with a non-empty direction, in binding order.
pub fn arrows_for(card_id: CardId, bindings: &[EffectBindingRow]) -> Vec<Arrow> {
    bindings
        .iter()
        .filter_map(|row| {
            let direction = row.arrow_direction()?;
            Some(Arrow {
                target_type: row.target_name().unwrap_or(DEFAULT_TARGET).to_string(),
                direction: direction.to_string(),
                card_id,
            })
        })
        .collect()
}

fn card_effect(row: &EffectBindingRow) -> CardEffect {
    CardEffect {
        effect_id: row.effect_id,
        name: row.name.clone(),
        description: row.description.clone(),
        is_basic: row.is_basic,
        amount: row.amount,
        target: row.target.clone(),
        duration: row.duration,
        repeatable: row.repeatable,
        trigger: row.trigger.clone(),
        arrows: row.arrow_direction().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(target: Option<&str>, arrows: Option<&str>) -> EffectBindingRow {
        EffectBindingRow {
            effect_id: 1,
            name: "Push".to_string(),
            target: target.map(str::to_string),
            arrows: arrows.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn empty_arrow_value_is_not_an_arrow() {
        let rows = [binding(None, Some("")), binding(None, None)];
        assert!(arrows_for(3, &rows).is_empty());
    }

    #[test]
    fn empty_target_defaults_to_enemy() {
        let rows = [binding(Some(""), Some("S"))];
        let arrows = arrows_for(3, &rows);
        assert_eq!(arrows[0].target_type, "Enemy");
    }
}
