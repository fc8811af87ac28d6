//! User settings read from a JSON file.
//!
//! Every field is optional. A missing file means defaults; a file that cannot
//! be read or parsed also means defaults, with the failure handed back so the
//! caller can warn about it.

use crate::error::AppError;
use crate::logging::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "AGNES_CONFIG_PATH";
const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR: &str = "agnes";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Leading keywords rewritten before parsing, e.g. `"ls": "list"`.
    pub aliases: HashMap<String, String>,
    pub store_path: Option<String>,
    pub log_level: Option<String>,
}

/// Values given with `--config-override`; each one beats the file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub aliases: HashMap<String, String>,
    pub store_path: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub warning: Option<AppError>,
}

impl Config {
    /// Reads `path`. `Ok(None)` when there is no file there.
    pub fn read(path: &Path) -> Result<Option<Self>, AppError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AppError::io(format!("{}: {}", path.display(), err))),
        };

        serde_json::from_str(&content).map(Some).map_err(|err| {
            AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
        })
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.aliases.extend(overrides.aliases);
        if overrides.store_path.is_some() {
            self.store_path = overrides.store_path;
        }
        if overrides.log_level.is_some() {
            self.log_level = overrides.log_level;
        }
        self
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// `$AGNES_CONFIG_PATH` when set, else `config.json` in the per-user config dir.
pub fn config_file() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let (base_var, dirs): (&str, &[&str]) = if cfg!(windows) {
        ("APPDATA", &[APP_DIR])
    } else {
        ("HOME", &[".config", APP_DIR])
    };
    let base = std::env::var_os(base_var)
        .ok_or_else(|| AppError::invalid_data(format!("{base_var} is not set")))?;

    Ok(dirs
        .iter()
        .fold(PathBuf::from(base), |path, dir| path.join(dir))
        .join(CONFIG_FILE_NAME))
}

pub fn load_config() -> LoadedConfig {
    match config_file() {
        Ok(path) => load_config_at(&path),
        Err(err) => LoadedConfig {
            config: Config::default(),
            warning: Some(err),
        },
    }
}

pub fn load_config_at(path: &Path) -> LoadedConfig {
    match Config::read(path) {
        Ok(config) => LoadedConfig {
            config: config.unwrap_or_default(),
            warning: None,
        },
        Err(err) => LoadedConfig {
            config: Config::default(),
            warning: Some(err),
        },
    }
}

/// Replaces a leading alias keyword with its configured expansion.
///
/// Alias names match case-insensitively; only the first token is considered,
/// and the expansion is not itself expanded again.
pub fn expand_alias(line: &str, aliases: &HashMap<String, String>) -> String {
    let trimmed = line.trim();
    let (first, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest.trim()),
        None => (trimmed, ""),
    };

    let expansion = aliases
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(first))
        .map(|(_, value)| value.trim());

    match expansion {
        Some(value) if rest.is_empty() => value.to_string(),
        Some(value) => format!("{value} {rest}"),
        None => trimmed.to_string(),
    }
}
