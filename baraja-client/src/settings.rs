use std::path::PathBuf;

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://localhost:3030/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_URL: &str = "BARAJA_API_URL";
const ENV_API_TIMEOUT: &str = "BARAJA_API_TIMEOUT";
const ENV_DB: &str = "BARAJA_DB";

/// Resolved settings for the deck service and the local database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub timeout_secs: u64,
    /// `None` only when no data directory can be determined.
    pub database_path: Option<PathBuf>,
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default value.
    Default,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug)]
pub struct SettingSources {
    pub api_base_url: SettingSource,
    pub timeout_secs: SettingSource,
    pub database_path: SettingSource,
}

/// TOML config file format.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct DatabaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ConfigFile {
    fn base_url(&self) -> Option<&String> {
        self.api.as_ref().and_then(|a| a.base_url.as_ref())
    }

    fn timeout_secs(&self) -> Option<u64> {
        self.api.as_ref().and_then(|a| a.timeout_secs)
    }

    fn database_path(&self) -> Option<&PathBuf> {
        self.database.as_ref().and_then(|d| d.path.as_ref())
    }
}

impl Settings {
    /// Load settings from environment variables, the config file, or defaults.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load() -> Result<Self, ClientError> {
        let config = load_config_file().unwrap_or_default();
        Self::resolve(|var| std::env::var(var).ok(), &config)
    }

    /// Resolve settings from an environment lookup and a parsed config file.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        config: &ConfigFile,
    ) -> Result<Self, ClientError> {
        let api_base_url = env(ENV_API_URL)
            .or_else(|| config.base_url().cloned())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match env(ENV_API_TIMEOUT) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ClientError::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_API_TIMEOUT, raw
                ))
            })?,
            None => config.timeout_secs().unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(ClientError::Config(
                "API timeout must be at least 1 second".to_string(),
            ));
        }

        let database_path = env(ENV_DB)
            .map(PathBuf::from)
            .or_else(|| config.database_path().cloned())
            .or_else(default_database_path);

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            database_path,
        })
    }

    /// Override the database path (e.g., from CLI args).
    pub fn with_database(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path);
        }
        self
    }
}

/// Return the path to the config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("baraja").join("config.toml"))
}

/// Default location of the local deck database.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("baraja").join("baraja.db"))
}

/// Write a config file, creating parent directories as needed.
///
/// Returns the path the file was written to.
pub fn save_to_file(config: &ConfigFile) -> Result<PathBuf, ClientError> {
    let path = config_path()
        .ok_or_else(|| ClientError::Config("Could not determine config directory".to_string()))?;
    write_config(&path, config)?;
    Ok(path)
}

/// Write a config file at an explicit path.
pub fn write_config(path: &std::path::Path, config: &ConfigFile) -> Result<(), ClientError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Read a config file at an explicit path.
pub fn read_config(path: &std::path::Path) -> Result<ConfigFile, ClientError> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ClientError::Config(format!("Invalid config {}: {}", path.display(), e)))
}

/// Load the user's config file, if there is a readable one.
pub fn load_config_file() -> Option<ConfigFile> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }
    match read_config(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            None
        }
    }
}

/// Determine where each setting is coming from.
pub fn setting_sources() -> SettingSources {
    let config = load_config_file().unwrap_or_default();
    sources_for(|var| std::env::var(var).ok(), &config)
}

fn sources_for(env: impl Fn(&str) -> Option<String>, config: &ConfigFile) -> SettingSources {
    let pick = |var: &'static str, in_file: bool| {
        if env(var).is_some() {
            SettingSource::EnvVar(var)
        } else if in_file {
            SettingSource::ConfigFile
        } else {
            SettingSource::Default
        }
    };

    SettingSources {
        api_base_url: pick(ENV_API_URL, config.base_url().is_some()),
        timeout_secs: pick(ENV_API_TIMEOUT, config.timeout_secs().is_some()),
        database_path: pick(ENV_DB, config.database_path().is_some()),
    }
}
