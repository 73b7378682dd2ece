use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use baraja_client::{DeckClient, DeckSession, SessionEvent, Settings};

use super::decks::print_deck_table;
use super::print_json;
use crate::CliError;

fn session() -> Result<DeckSession<DeckClient>, CliError> {
    let settings = Settings::load()?;
    log::debug!("Deck service at {}", settings.api_base_url);
    Ok(DeckSession::new(DeckClient::from_settings(&settings)?))
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

fn log_events(rx: &mut tokio::sync::mpsc::UnboundedReceiver<SessionEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            SessionEvent::Error { message, error } => log::warn!("{}: {}", message, error),
            other => log::debug!("Session event: {}", other.name()),
        }
    }
}

pub(crate) fn run_list(owner: Option<i64>, json: bool) -> Result<(), CliError> {
    let mut session = session()?;
    let mut events = session.subscribe();

    let decks = runtime()?.block_on(async {
        match owner {
            Some(owner) => session.load_decks_by_owner(owner).await.map(<[_]>::to_vec),
            None => session.load_decks().await.map(<[_]>::to_vec),
        }
    });
    log_events(&mut events);
    let decks = decks?;

    if json {
        return print_json(&decks);
    }
    if decks.is_empty() {
        println!("No decks on {}", session.api().base_url());
        return Ok(());
    }
    print_deck_table(&decks);
    Ok(())
}

pub(crate) fn run_show(id: i64) -> Result<(), CliError> {
    let mut session = session()?;
    let mut events = session.subscribe();

    let selected = runtime()?.block_on(session.select_deck(id));
    log_events(&mut events);
    let (deck, cards) = selected?;

    println!(
        "{} {}",
        deck.name.if_supports_color(Stdout, |t| t.bold()),
        format!("(owner {}, {} cards)", deck.owner_id, cards.len())
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    print_json(&cards)
}
