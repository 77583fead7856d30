use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file at {config_path}: {reason}")]
    ConfigInvalid {
        config_path: PathBuf,
        reason: String,
    },
}

fn default_tab_size() -> usize {
    4
}

/// Settings shared by every placemark front end.
///
/// ```toml
/// tab_size = 4
/// indented_code = false
///
/// [links]
/// home = "~/notes/index.md \"Home\""
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tab stop width for indentation.
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
    /// Treat lines indented by 4+ columns as code.
    #[serde(default)]
    pub indented_code: bool,
    /// Link targets for `[name]` references the document does not declare,
    /// written like a declaration: `url` or `url "title"`.
    #[serde(default)]
    pub links: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            indented_code: false,
            links: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if config.tab_size == 0 {
            return Err(ConfigError::ConfigInvalid {
                config_path: config_path.to_path_buf(),
                reason: "tab_size must be at least 1".to_string(),
            });
        }

        // Expand shell variables and tilde in link targets
        for spec in config.links.values_mut() {
            if let Some(expanded) = Self::expand_link(spec) {
                *spec = expanded;
            }
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the file at `config_path`, or the default location, falling back to defaults.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let loaded = match config_path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load()?,
        };
        Ok(loaded.unwrap_or_default())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/placemark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expands `~` and `$VARS` in the link part of a spec, keeping any title.
    fn expand_link(spec: &str) -> Option<String> {
        let (link, title) = match spec.split_once(' ') {
            Some((link, title)) => (link, Some(title)),
            None => (spec, None),
        };
        let expanded = shellexpand::full(link).ok()?;
        Some(match title {
            Some(title) => format!("{expanded} {title}"),
            None => expanded.into_owned(),
        })
    }
}
