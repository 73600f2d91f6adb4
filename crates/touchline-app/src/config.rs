// Configuration loading and parsing (league.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub data: DataPaths,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    #[serde(default)]
    data: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    /// Fantrax league identifier (informational).
    #[serde(default)]
    pub league_id: Option<String>,
    /// The league's live or most recent week. Weeks before it are complete.
    pub current_week: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataPaths {
    /// Optional CSV of per-week player predictions.
    #[serde(default)]
    pub predictions: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to the
/// given `base_dir`.
///
/// Does not copy defaults; call `ensure_config_files` first on a fresh checkout.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let league_text = read_file(&league_path)?;
    let config = parse_config(&league_text, &league_path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: LeagueFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Config {
        league: file.league,
        data: file.data,
    })
}

/// Seed `config/` from the shipped `defaults/` TOML files.
///
/// Only `*.toml` files are considered, so `league.toml.example` and similar
/// templates stay behind. Existing files in `config/` are never touched.
/// Returns the paths that were created.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no defaults/ or config/ directory under {}; run touchline from the league directory",
                base_dir.display()
            ),
        });
    }

    let copy_err = |message: String| ConfigError::DefaultsCopyError { message };

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| copy_err(format!("cannot create {}: {e}", config_dir.display())))?;
    let entries = std::fs::read_dir(&defaults_dir)
        .map_err(|e| copy_err(format!("cannot list {}: {e}", defaults_dir.display())))?;

    let mut copied = Vec::new();
    for entry in entries {
        let source = entry
            .map_err(|e| copy_err(format!("cannot list {}: {e}", defaults_dir.display())))?
            .path();
        let is_toml = source.extension().is_some_and(|ext| ext == "toml");
        let Some(file_name) = source.file_name().filter(|_| is_toml && source.is_file()) else {
            continue;
        };
        let target = config_dir.join(file_name);
        if copy_default(&source, &target)? {
            info!("seeded {} from defaults", target.display());
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Copy `source` to `target` unless `target` already exists.
fn copy_default(source: &Path, target: &Path) -> Result<bool, ConfigError> {
    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("cannot create {}: {e}", target.display()),
            })
        }
    };
    let content = std::fs::read(source).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("cannot read {}: {e}", source.display()),
    })?;
    std::io::Write::write_all(&mut dest, &content).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("cannot write {}: {e}", target.display()),
    })?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.name".into(),
            message: "must not be empty".into(),
        });
    }

    if config.league.current_week == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.current_week".into(),
            message: "must be greater than 0".into(),
        });
    }

    if let Some(path) = &config.data.predictions {
        if path.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "data.predictions".into(),
                message: "must be a path when present".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
