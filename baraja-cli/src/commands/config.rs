use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use baraja_client::settings::{ApiConfig, read_config};
use baraja_client::{ConfigFile, Settings};

use crate::CliError;

/// Show current settings and their sources.
pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = baraja_client::config_path();
    let sources = baraja_client::setting_sources();
    let settings = Settings::load()?;

    println!(
        "{}",
        "Baraja Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    match &path {
        Some(p) if p.exists() => println!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        ),
        Some(p) => println!(
            "  Config file: {} {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => println!(
            "  Config file: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    println!();

    let database = settings
        .database_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "not set".to_string());
    let fields = [
        ("api.base_url", settings.api_base_url.clone(), &sources.api_base_url),
        ("api.timeout_secs", settings.timeout_secs.to_string(), &sources.timeout_secs),
        ("database.path", database, &sources.database_path),
    ];
    for (name, value, source) in fields {
        println!(
            "  {:<18} {} {}",
            name,
            value,
            format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path = baraja_client::config_path()
        .ok_or_else(|| CliError::config("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}

/// Save the API base URL, keeping the rest of the config file.
pub(crate) fn run_set_api_url(url: &str) -> Result<(), CliError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::config(format!(
            "'{}' is not an http(s) URL",
            url
        )));
    }

    let mut config = match baraja_client::config_path() {
        Some(p) if p.exists() => read_config(&p)?,
        _ => ConfigFile::default(),
    };
    let api = config.api.get_or_insert_with(ApiConfig::default);
    api.base_url = Some(url.trim_end_matches('/').to_string());

    let path = baraja_client::save_to_file(&config)?;
    println!(
        "{} Saved API URL to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
