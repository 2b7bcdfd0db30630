//! Config file lookup.
//!
//! Precedence (highest wins):
//! 1. `--config <path>`
//! 2. `PATHFINDER_CONFIG`
//! 3. `<user config dir>/pathfinder/config.toml`, when it exists
//! 4. Built-in defaults

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pathfinder_core::Config;
use serde::Serialize;
use tracing::debug;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "PATHFINDER_CONFIG";

/// Where the effective config came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "path", rename_all = "snake_case")]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    User(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(path) => write!(f, "{} (--config)", path.display()),
            Self::Env(path) => write!(f, "{} ({CONFIG_ENV})", path.display()),
            Self::User(path) => write!(f, "{} (user)", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// The user-level config path, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pathfinder/config.toml"))
}

/// Pick the config file to load without touching the file system beyond
/// an existence check on the user path.
fn select_source(
    flag: Option<&Path>,
    env: Option<&str>,
    user_path: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = flag {
        return ConfigSource::Flag(path.to_path_buf());
    }
    if let Some(path) = env.filter(|p| !p.is_empty()) {
        return ConfigSource::Env(PathBuf::from(path));
    }
    match user_path {
        Some(path) if path.is_file() => ConfigSource::User(path),
        _ => ConfigSource::Defaults,
    }
}

fn load_from(source: &ConfigSource) -> Result<Config> {
    let path = match source {
        ConfigSource::Flag(path) | ConfigSource::Env(path) | ConfigSource::User(path) => path,
        ConfigSource::Defaults => return Ok(Config::default()),
    };
    Config::load(path).with_context(|| format!("loading config from {source}"))
}

/// Resolve and load the effective config.
///
/// # Errors
///
/// Returns an error when the selected file cannot be read, parsed or
/// validated. An explicitly named file that does not exist is an error;
/// a missing user config silently falls back to defaults.
pub fn resolve_config(flag: Option<&Path>) -> Result<(Config, ConfigSource)> {
    let env = std::env::var(CONFIG_ENV).ok();
    let source = select_source(flag, env.as_deref(), user_config_path());
    debug!(%source, "resolved config source");
    let config = load_from(&source)?;
    Ok((config, source))
}
