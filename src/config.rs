use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default)]
    pub categories: CategorySeparator,
    #[serde(default)]
    pub unterminated: UnterminatedBlock,
}

/// How a `CATEGORIES` value is split into tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategorySeparator {
    /// Split on a single space only. Matches the historical output, where
    /// `Work,Home` stays one category.
    #[default]
    Space,
    /// Split on spaces and commas.
    SpaceOrComma,
}

impl CategorySeparator {
    pub fn split(&self, value: &str) -> Vec<String> {
        let tokens: Vec<&str> = match self {
            CategorySeparator::Space => value.split(' ').collect(),
            CategorySeparator::SpaceOrComma => value.split([' ', ',']).collect(),
        };
        tokens
            .into_iter()
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// What happens to a block still open when input runs out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnterminatedBlock {
    /// Discard the incomplete record.
    #[default]
    Drop,
    /// Append the incomplete record as-is.
    Flush,
}

impl Config {
    /// Load from the user config directory. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "calparse", "calparse")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
