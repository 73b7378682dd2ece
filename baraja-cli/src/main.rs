//! baraja CLI
//!
//! Command-line interface for the card catalog, local decks, and the remote
//! deck service.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "baraja")]
#[command(about = "Browse the card catalog and build decks", long_about = None)]
struct Cli {
    /// Path to the deck database (overrides BARAJA_DB and the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print JSON instead of summaries
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and its schema
    Init,

    /// Load cards and effects from a YAML catalog file
    Seed {
        /// Catalog file
        catalog: PathBuf,
    },

    /// Browse cards
    Cards {
        #[command(subcommand)]
        action: CardsAction,
    },

    /// Browse effects
    Effects {
        #[command(subcommand)]
        action: EffectsAction,
    },

    /// Manage local decks
    Decks {
        #[command(subcommand)]
        action: DecksAction,
    },

    /// Report cards with conflicting or missing subtype rows
    Verify,

    /// Write two decks in the game engine's deck file format
    ExportGame {
        /// First deck id
        deck_a: i64,

        /// Second deck id
        deck_b: i64,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Query the remote deck service
    Remote {
        #[command(subcommand)]
        action: RemoteAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum CardsAction {
    /// List cards, optionally of one type (Hechizo/Spell, Aliado/Ally, Personaje/Character)
    List {
        #[arg(short, long = "type")]
        card_type: Option<String>,
    },

    /// Show one card with its effects and arrows
    Show { id: i64 },
}

#[derive(Subcommand)]
enum EffectsAction {
    /// List effect definitions
    List,

    /// List the cards bound to an effect
    Cards { id: i64 },
}

#[derive(Subcommand)]
enum DecksAction {
    /// List decks with their card counts
    List {
        /// Only decks owned by this user
        #[arg(long)]
        owner: Option<i64>,
    },

    /// Show a deck with its normalized cards
    Show { id: i64 },

    /// Create a deck
    Create {
        #[arg(long)]
        owner: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        sleeve: Option<String>,
    },

    /// Replace a deck's owner, name and sleeve
    Update {
        id: i64,

        #[arg(long)]
        owner: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        sleeve: Option<String>,
    },

    /// Delete a deck and its memberships
    Delete { id: i64 },

    /// Add one copy of a card to a deck
    Add {
        deck: i64,

        card: i64,

        /// Image variation tag for this copy
        #[arg(long)]
        variation: Option<String>,
    },

    /// Remove every copy of a card from a deck
    Remove { deck: i64, card: i64 },

    /// List a deck's member cards
    Cards { id: i64 },
}

#[derive(Subcommand)]
enum RemoteAction {
    /// List decks on the service
    List {
        #[arg(long)]
        owner: Option<i64>,
    },

    /// Show a deck and its cards from the service
    Show { id: i64 },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings and their sources
    Show,

    /// Print the config file path
    Path,

    /// Save the deck service base URL to the config file
    SetApiUrl { url: String },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    use commands::{catalog, config, decks, export, remote, verify};

    let db = cli.db;
    let json = cli.json;

    match cli.command {
        Commands::Init => catalog::run_init(db),
        Commands::Seed { catalog: path } => catalog::run_seed(db, &path),
        Commands::Cards { action } => match action {
            CardsAction::List { card_type } => catalog::run_cards_list(db, card_type, json),
            CardsAction::Show { id } => catalog::run_card_show(db, id),
        },
        Commands::Effects { action } => match action {
            EffectsAction::List => catalog::run_effects_list(db, json),
            EffectsAction::Cards { id } => catalog::run_effect_cards(db, id, json),
        },
        Commands::Decks { action } => match action {
            DecksAction::List { owner } => decks::run_list(db, owner, json),
            DecksAction::Show { id } => decks::run_show(db, id),
            DecksAction::Create {
                owner,
                name,
                sleeve,
            } => decks::run_create(db, owner, name, sleeve, json),
            DecksAction::Update {
                id,
                owner,
                name,
                sleeve,
            } => decks::run_update(db, id, owner, name, sleeve, json),
            DecksAction::Delete { id } => decks::run_delete(db, id),
            DecksAction::Add {
                deck,
                card,
                variation,
            } => decks::run_add(db, deck, card, variation),
            DecksAction::Remove { deck, card } => decks::run_remove(db, deck, card),
            DecksAction::Cards { id } => decks::run_cards(db, id, json),
        },
        Commands::Verify => verify::run_verify(db, json),
        Commands::ExportGame {
            deck_a,
            deck_b,
            output,
        } => export::run_export_game(db, deck_a, deck_b, output),
        Commands::Remote { action } => match action {
            RemoteAction::List { owner } => remote::run_list(owner, json),
            RemoteAction::Show { id } => remote::run_show(id),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => config::run_config_show(),
            ConfigAction::Path => config::run_config_path(),
            ConfigAction::SetApiUrl { url } => config::run_set_api_url(&url),
        },
    }
}
