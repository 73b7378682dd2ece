use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use baraja_catalog::{CardKind, CardView};

use super::{not_found, open_db, print_json, resolve_db_path, truncate_str};
use crate::CliError;

pub(crate) fn run_init(db: Option<PathBuf>) -> Result<(), CliError> {
    let path = resolve_db_path(db)?;
    let existed = path.exists();
    baraja_db::open_database(&path)?;

    println!(
        "{} Database {} at {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        if existed { "ready" } else { "created" },
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) fn run_seed(db: Option<PathBuf>, catalog: &Path) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let stats = baraja_db::seed_from_catalog(&conn, catalog)?;

    println!(
        "{} Seeded from {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        catalog.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    println!("  Effects:   {:>6}", stats.effects);
    println!("  Cards:     {:>6}", stats.cards);
    println!("  Bindings:  {:>6}", stats.bindings);

    let conflicts = baraja_db::subtype_conflicts(&conn)?;
    if !conflicts.is_empty() {
        println!();
        println!(
            "{} {} cards have more than one subtype; run 'baraja verify'",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            conflicts.len(),
        );
    }
    Ok(())
}

pub(crate) fn run_cards_list(
    db: Option<PathBuf>,
    card_type: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let conn = open_db(db)?;

    match card_type {
        Some(t) => {
            let cards = baraja_db::get_cards_by_type(&conn, &t)?;
            if json {
                return print_json(&cards);
            }
            for card in &cards {
                print_card_line(card.id, &card.kind, &card.name);
            }
            println!();
            println!("{} cards", cards.len());
        }
        None => {
            let cards = baraja_db::get_all_cards(&conn)?;
            if json {
                return print_json(&cards);
            }
            for card in &cards {
                print_card_line(card.id, &card.kind, &card.name);
            }
            println!();
            println!("{} cards", cards.len());
        }
    }
    Ok(())
}

pub(crate) fn run_card_show(db: Option<PathBuf>, id: i64) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let card = baraja_db::get_card_by_id(&conn, id)?.ok_or_else(|| not_found("card", id))?;
    print_json(&card)
}

pub(crate) fn run_effects_list(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let effects = baraja_db::get_all_effects(&conn)?;
    if json {
        return print_json(&effects);
    }

    for effect in &effects {
        let basic = if effect.is_basic { "basic" } else { "" };
        println!(
            "{:>5}  {:<20} {:<6} {}",
            effect.id,
            truncate_str(&effect.name, 20),
            basic.if_supports_color(Stdout, |t| t.dimmed()),
            effect.description.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}

pub(crate) fn run_effect_cards(db: Option<PathBuf>, id: i64, json: bool) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let cards = baraja_db::get_cards_by_effect(&conn, id)?;
    if json {
        return print_json(&cards);
    }

    if cards.is_empty() {
        println!("No cards carry effect {}", id);
        return Ok(());
    }
    for card in &cards {
        let mut details = Vec::new();
        if let Some(amount) = card.amount {
            details.push(format!("amount {}", amount));
        }
        if let Some(ref target) = card.target {
            details.push(format!("target {}", target));
        }
        if let Some(ref trigger) = card.trigger {
            details.push(format!("on {}", trigger));
        }
        if let Some(ref arrows) = card.arrows {
            details.push(format!("arrow {}", arrows));
        }
        println!(
            "{:>5}  {:<24} {}",
            card.card_id,
            truncate_str(&card.name, 24),
            details.join(", ").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Print one summary line for a card.
pub(crate) fn print_card_line(id: i64, kind: &CardKind, name: &str) {
    let stats = match kind {
        CardKind::Spell(s) => format!("cost {}", s.cost),
        CardKind::Ally(a) => format!("cost {}  {}/{}", a.cost, a.attack, a.health),
        CardKind::Character(c) => format!("actions {}  {}/{}", c.actions, c.attack, c.health),
        CardKind::Untyped => String::new(),
    };
    let type_name = format!("{:<10}", kind.type_name());
    let type_name = match kind {
        CardKind::Untyped => type_name.if_supports_color(Stdout, |t| t.red()).to_string(),
        _ => type_name.if_supports_color(Stdout, |t| t.cyan()).to_string(),
    };
    println!(
        "{:>5}  {} {:<28} {}",
        id,
        type_name,
        truncate_str(name, 28),
        stats.if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Print a normalized card with its effects, indented.
pub(crate) fn print_card_detail(card: &CardView, variation: Option<&str>) {
    print_card_line(card.id, &card.kind, &card.name);
    if let Some(v) = variation {
        println!("         variation: {}", v);
    }
    for effect in &card.effects {
        println!(
            "         {} {} -> {}{}",
            "\u{2022}".if_supports_color(Stdout, |t| t.dimmed()),
            effect.name,
            effect.target_or_default(),
            effect
                .amount
                .map(|a| format!(" ({})", a))
                .unwrap_or_default(),
        );
    }
}
