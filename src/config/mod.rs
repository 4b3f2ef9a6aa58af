//! Configuration management
//!
//! Settings live in `~/.deskmate/config.yaml`. Every key is optional;
//! a missing file means all defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DESKMATE_DATA_DIR";

/// Default file name of the note store.
pub const DEFAULT_NOTES_FILE: &str = "notes.txt";

/// Default file name of the calculation history.
pub const DEFAULT_HISTORY_FILE: &str = "calc_history.txt";

/// Default length of generated passwords.
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &["data_dir", "notes_file", "history_file", "password_length"];

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the note and history files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// File name of the note store, relative to the data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_file: Option<String>,

    /// File name of the calculation history, relative to the data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<String>,

    /// Length used by `password` when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_length: Option<usize>,
}

/// Resolved locations of the files the core owns.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
    pub notes: PathBuf,
    pub history: PathBuf,
}

impl Config {
    /// Loads `~/.deskmate/config.yaml`, or the defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads a config file from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves to `~/.deskmate/config.yaml`.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the config to `path`, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_saphyr::to_string(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// `~/.deskmate`
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".deskmate"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Resolves where notes and history are stored.
    ///
    /// Precedence for the directory: `cli_override`, then the
    /// `DESKMATE_DATA_DIR` environment variable, then `data_dir` from the
    /// config file, then `~/.deskmate/data`.
    pub fn data_paths(&self, cli_override: Option<&Path>) -> Result<DataPaths> {
        let data_dir = match cli_override {
            Some(dir) => dir.to_path_buf(),
            None => match env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => match &self.data_dir {
                    Some(dir) => dir.clone(),
                    None => Self::config_dir()?.join("data"),
                },
            },
        };

        let notes = data_dir.join(self.notes_file.as_deref().unwrap_or(DEFAULT_NOTES_FILE));
        let history = data_dir.join(
            self.history_file
                .as_deref()
                .unwrap_or(DEFAULT_HISTORY_FILE),
        );

        Ok(DataPaths {
            data_dir,
            notes,
            history,
        })
    }

    pub fn password_length(&self) -> usize {
        self.password_length.unwrap_or(DEFAULT_PASSWORD_LENGTH)
    }

    /// Returns the value of `key`, or `None` if it is unset.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "data_dir" => self.data_dir.as_ref().map(|p| p.display().to_string()),
            "notes_file" => self.notes_file.clone(),
            "history_file" => self.history_file.clone(),
            "password_length" => self.password_length.map(|n| n.to_string()),
            _ => bail!(unknown_key(key)),
        };
        Ok(value)
    }

    /// Sets `key` to `value`, validating the value for its key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => self.data_dir = Some(PathBuf::from(value)),
            "notes_file" => self.notes_file = Some(file_name(key, value)?),
            "history_file" => self.history_file = Some(file_name(key, value)?),
            "password_length" => {
                let n: usize = value
                    .parse()
                    .with_context(|| format!("password_length must be a number, got '{value}'"))?;
                if n == 0 {
                    bail!("password_length must be at least 1");
                }
                self.password_length = Some(n);
            }
            _ => bail!(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    )
}

fn file_name(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() || value.contains(['/', '\\']) {
        bail!("{key} must be a plain file name, got '{value}'");
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut config = Config::default();
        config.set("notes_file", "todo.txt").unwrap();
        config.set("password_length", "20").unwrap();

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.password_length(), 20);
    }

    #[test]
    fn test_load_partial_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "history_file: calc.log\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.history_file.as_deref(), Some("calc.log"));
        assert_eq!(config.notes_file, None);
        assert_eq!(config.password_length(), DEFAULT_PASSWORD_LENGTH);
    }

    #[test]
    fn test_data_paths_cli_override_wins() {
        let config = Config {
            data_dir: Some(PathBuf::from("/from/config")),
            notes_file: Some("n.txt".to_string()),
            ..Default::default()
        };

        let paths = config.data_paths(Some(Path::new("/from/flag"))).unwrap();

        assert_eq!(paths.data_dir, PathBuf::from("/from/flag"));
        assert_eq!(paths.notes, PathBuf::from("/from/flag/n.txt"));
        assert_eq!(paths.history, PathBuf::from("/from/flag/calc_history.txt"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();

        assert!(config.set("password_length", "abc").is_err());
        assert!(config.set("password_length", "0").is_err());
        assert!(config.set("notes_file", "../escape.txt").is_err());
        assert!(config.set("colour", "red").is_err());
        assert!(config.get("colour").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_get_unset_key_is_none() {
        let config = Config::default();
        assert_eq!(config.get("data_dir").unwrap(), None);
    }
}
