use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use super::open_db;
use crate::CliError;

/// Write two decks as the game engine's deck file, to a file or stdout.
pub(crate) fn run_export_game(
    db: Option<PathBuf>,
    deck_a: i64,
    deck_b: i64,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let file = baraja_db::decks_for_game(&conn, &[deck_a, deck_b])?;
    let text = serde_json::to_string_pretty(&file)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, text)?;
            let cards: usize = file.decks.iter().map(|d| d.cards.len()).sum();
            eprintln!(
                "{} Wrote {} decks ({} cards) to {}",
                "\u{2714}".if_supports_color(Stderr, |t| t.green()),
                file.decks.len(),
                cards,
                path.display(),
            );
        }
        None => println!("{}", text),
    }
    Ok(())
}
