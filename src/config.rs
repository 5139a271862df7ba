use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::options::PasswordOptions;

pub const CONFIG_ENV: &str = "PASSFORGE_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "passforge.json";

/// Defaults read from disk before command line flags are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(flatten)]
    pub options: PasswordOptions,
    #[serde(default)]
    pub copy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_after_secs: Option<u64>,
}

/// Path used when none is given on the command line.
pub fn default_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

pub fn load(path: &Path) -> Result<Config> {
    let data = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&data)?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Loads `explicit` if given, failing when it does not exist. Otherwise
/// falls back to [`default_path`], where a missing file yields defaults.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load(path);
    }

    let path = default_path();
    if path.exists() {
        load(&path)
    } else {
        Ok(Config::default())
    }
}

pub fn save(config: &Config, path: &Path) -> Result<()> {
    let serialized = serde_json::to_string_pretty(config)?;
    std::fs::write(path, serialized)?;
    Ok(())
}
