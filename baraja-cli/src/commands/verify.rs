use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::{open_db, print_json};
use crate::CliError;

#[derive(serde::Serialize)]
struct VerifyReport {
    conflicts: Vec<Conflict>,
    untyped: Vec<i64>,
}

#[derive(serde::Serialize)]
struct Conflict {
    card_id: i64,
    subtypes: Vec<&'static str>,
    resolved_as: &'static str,
}

/// Report cards whose subtype rows break the one-subtype rule.
///
/// Exits non-zero when any card has more than one subtype.
pub(crate) fn run_verify(db: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let conn = open_db(db)?;
    let conflicts = baraja_db::subtype_conflicts(&conn)?;
    let untyped = baraja_db::untyped_cards(&conn)?;

    let report = VerifyReport {
        conflicts: conflicts
            .iter()
            .map(|c| Conflict {
                card_id: c.card_id,
                subtypes: c.subtypes.iter().map(|s| s.as_str()).collect(),
                resolved_as: c.subtypes.first().map_or("Untyped", |s| s.as_str()),
            })
            .collect(),
        untyped,
    };

    if json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }

    if report.conflicts.is_empty() {
        Ok(())
    } else {
        Err(CliError::database(format!(
            "{} cards have more than one subtype",
            report.conflicts.len()
        )))
    }
}

fn print_report(report: &VerifyReport) {
    println!(
        "{}",
        "Subtype verification".if_supports_color(Stdout, |t| t.bold()),
    );

    if report.conflicts.is_empty() {
        println!(
            "  {} No cards with more than one subtype",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        );
    }
    for conflict in &report.conflicts {
        println!(
            "  {} Card {}: {} (read as {})",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            conflict.card_id,
            conflict.subtypes.join(", "),
            conflict.resolved_as,
        );
    }

    if !report.untyped.is_empty() {
        let ids: Vec<String> = report.untyped.iter().map(|id| id.to_string()).collect();
        println!(
            "  {} Untyped cards: {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            ids.join(", "),
        );
    }
}
