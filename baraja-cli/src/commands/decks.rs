use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use baraja_catalog::{Deck, NewDeck};

use super::catalog::print_card_detail;
use super::{not_found, open_db, print_json, truncate_str};
use crate::CliError;

pub(crate) fn run_list(db: Option<PathBuf>, owner: Option<i64>, json: bool) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let decks = match owner {
        Some(owner) => baraja_db::list_decks_by_owner(&conn, owner)?,
        None => baraja_db::list_decks(&conn)?,
    };
    if json {
        return print_json(&decks);
    }

    if decks.is_empty() {
        println!("No decks");
        return Ok(());
    }
    print_deck_table(&decks);
    Ok(())
}

pub(crate) fn run_show(db: Option<PathBuf>, id: i64) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let deck = baraja_db::get_deck_with_cards(&conn, id)?.ok_or_else(|| not_found("deck", id))?;
    print_json(&deck)
}

pub(crate) fn run_create(
    db: Option<PathBuf>,
    owner: i64,
    name: String,
    sleeve: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let deck = baraja_db::create_deck(
        &conn,
        &NewDeck {
            owner_id: owner,
            name,
            sleeve_path: sleeve,
        },
    )?;
    if json {
        return print_json(&deck);
    }
    println!(
        "{} Created deck {} '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        deck.id,
        deck.name.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

pub(crate) fn run_update(
    db: Option<PathBuf>,
    id: i64,
    owner: i64,
    name: String,
    sleeve: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let deck = baraja_db::update_deck(
        &conn,
        id,
        &NewDeck {
            owner_id: owner,
            name,
            sleeve_path: sleeve,
        },
    )?
    .ok_or_else(|| not_found("deck", id))?;
    if json {
        return print_json(&deck);
    }
    println!(
        "{} Updated deck {} '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        deck.id,
        deck.name.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

pub(crate) fn run_delete(db: Option<PathBuf>, id: i64) -> Result<(), CliError> {
    let conn = open_db(db)?;
    if !baraja_db::delete_deck(&conn, id)? {
        return Err(not_found("deck", id));
    }
    println!(
        "{} Deleted deck {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        id,
    );
    Ok(())
}

pub(crate) fn run_add(
    db: Option<PathBuf>,
    deck: i64,
    card: i64,
    variation: Option<String>,
) -> Result<(), CliError> {
    let conn = open_db(db)?;
    if baraja_db::get_deck(&conn, deck)?.is_none() {
        return Err(not_found("deck", deck));
    }
    if baraja_db::get_card_by_id(&conn, card)?.is_none() {
        return Err(not_found("card", card));
    }
    baraja_db::add_card_to_deck(&conn, deck, card, variation.as_deref())?;
    println!(
        "{} Added card {} to deck {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        card,
        deck,
    );
    Ok(())
}

pub(crate) fn run_remove(db: Option<PathBuf>, deck: i64, card: i64) -> Result<(), CliError> {
    let conn = open_db(db)?;
    if baraja_db::remove_card_from_deck(&conn, deck, card)? {
        println!(
            "{} Removed card {} from deck {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            card,
            deck,
        );
    } else {
        println!("Card {} is not in deck {}", card, deck);
    }
    Ok(())
}

pub(crate) fn run_cards(db: Option<PathBuf>, id: i64, json: bool) -> Result<(), CliError> {
    let conn = open_db(db)?;
    if json {
        return print_json(&baraja_db::list_cards_in_deck(&conn, id)?);
    }

    let deck = baraja_db::get_deck_with_cards(&conn, id)?.ok_or_else(|| not_found("deck", id))?;
    println!(
        "{} ({} cards)",
        deck.deck.name.if_supports_color(Stdout, |t| t.bold()),
        deck.cards.len(),
    );
    for member in &deck.cards {
        print_card_detail(&member.card, member.image_variation.as_deref());
    }
    Ok(())
}

/// Print decks as an aligned table.
pub(crate) fn print_deck_table(decks: &[Deck]) {
    println!(
        "{}",
        format!("{:>5}  {:>6}  {:<28} {:>6}", "ID", "OWNER", "NAME", "CARDS")
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for deck in decks {
        let count = deck
            .card_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>5}  {:>6}  {:<28} {:>6}",
            deck.id,
            deck.owner_id,
            truncate_str(&deck.name, 28),
            count,
        );
    }
}
