use agnes_core::config::ConfigOverrides;
use agnes_core::error::AppError;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// Chat with Agnes, a tiny task tracker.
///
/// Without a LINE, starts an interactive session on stdin.
/// Example: agnes
/// Example: agnes todo buy milk
/// Example: agnes --store ./tasks.txt deadline report /by 2024-12-01 2359
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Task file to read and write
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE")]
    pub config_override: Vec<String>,

    /// A single command line to run, e.g. `list` or `mark 2`
    #[arg(
        value_name = "LINE",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub line: Vec<String>,
}

impl Cli {
    /// The one-shot command, if any words were given.
    pub fn one_shot(&self) -> Option<String> {
        if self.line.is_empty() {
            None
        } else {
            Some(self.line.join(" "))
        }
    }
}

/// A `--config-override` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideKey {
    StorePath,
    LogLevel,
    Alias(String),
}

impl FromStr for OverrideKey {
    type Err = String;

    /// Keys are case-insensitive and `-` may stand in for `_`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some((section, name)) = raw.split_once('.') {
            let name = name.trim();
            return match normalize_key(section).as_str() {
                "aliases" | "alias" if !name.is_empty() => Ok(Self::Alias(name.to_string())),
                "aliases" | "alias" => {
                    Err("an alias override needs a name, e.g. aliases.ls=list".to_string())
                }
                key @ ("store_path" | "store" | "log_level") => {
                    Err(format!("'{key}' has no sub-keys"))
                }
                other => Err(format!("unknown config key '{other}'")),
            };
        }

        match normalize_key(raw).as_str() {
            "store_path" | "store" => Ok(Self::StorePath),
            "log_level" => Ok(Self::LogLevel),
            "" => Err("override key cannot be empty".to_string()),
            other => Err(format!("unknown config key '{other}'")),
        }
    }
}

fn normalize_key(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('-', "_")
}

/// Splits `KEY=VALUE` and resolves the key.
pub fn parse_config_override(raw: &str) -> Result<(OverrideKey, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected KEY=VALUE".to_string())?;
    Ok((key.parse()?, value.trim().to_string()))
}

/// Folds every `--config-override` into one set of overrides; later keys win.
pub fn collect_overrides(raw: &[String]) -> Result<ConfigOverrides, AppError> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let (key, value) = parse_config_override(entry)
            .map_err(|message| AppError::invalid_data(format!("{entry}: {message}")))?;
        match key {
            OverrideKey::StorePath => overrides.store_path = Some(value),
            OverrideKey::LogLevel => overrides.log_level = Some(value),
            OverrideKey::Alias(name) => {
                overrides.aliases.insert(name, value);
            }
        }
    }

    Ok(overrides)
}
