//! Tool configuration (foxlba.toml)
//!
//! Every setting has a default, so the file and each of its tables are
//! optional. Command-line flags override what is loaded here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::batch::FailurePolicy;
use crate::dictionary::{CollisionPolicy, HashDictionary};
use crate::error::Result;

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "foxlba.toml";

/// Default name-hash word list.
pub const DEFAULT_NAME_DICTIONARY: &str = "lba_name_dictionary.txt";

/// Default path-hash word list.
pub const DEFAULT_PATH_DICTIONARY: &str = "lba_path_dictionary.txt";

fn default_name_dictionary() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_NAME_DICTIONARY))
}

fn default_path_dictionary() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_PATH_DICTIONARY))
}

/// The full configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dictionaries: DictionarySettings,
    #[serde(default)]
    pub batch: BatchSettings,
}

/// Word lists and how to build them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionarySettings {
    #[serde(default = "default_name_dictionary")]
    pub name: Option<PathBuf>,
    #[serde(default = "default_path_dictionary")]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub collision: CollisionPolicy,
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            name: default_name_dictionary(),
            path: default_path_dictionary(),
            collision: CollisionPolicy::default(),
        }
    }
}

/// Batch processing behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSettings {
    #[serde(default)]
    pub failure: FailurePolicy,
}

impl Config {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    /// Returns [`Error::Config`] on invalid TOML or unknown enum values.
    ///
    /// [`Error::Config`]: crate::Error::Config
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read a config file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if it does not parse.
    ///
    /// [`Error::Io`]: crate::Error::Io
    /// [`Error::Config`]: crate::Error::Config
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Self::from_toml_str(&content)
    }

    /// Load `explicit` if given, else [`CONFIG_FILE_NAME`] from the working
    /// directory if present, else the defaults.
    ///
    /// # Errors
    /// See [`Config::load`]. A missing explicit file is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE_NAME).is_file() => Self::load(CONFIG_FILE_NAME),
            None => Ok(Self::default()),
        }
    }

    /// Build the hash dictionary these settings describe.
    ///
    /// # Errors
    /// See [`HashDictionary::load`].
    pub fn load_dictionary(&self) -> Result<HashDictionary> {
        HashDictionary::load(
            self.dictionaries.name.as_deref(),
            self.dictionaries.path.as_deref(),
            self.dictionaries.collision,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.dictionaries.name.as_deref(),
            Some(Path::new(DEFAULT_NAME_DICTIONARY))
        );
        assert_eq!(config.batch.failure, FailurePolicy::Abort);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            [dictionaries]
            name = "dicts/names.txt"
            path = "dicts/paths.txt"
            collision = "lexicographic"

            [batch]
            failure = "isolate"
            "#,
        )
        .unwrap();

        assert_eq!(config.dictionaries.path.as_deref(), Some(Path::new("dicts/paths.txt")));
        assert_eq!(config.dictionaries.collision, CollisionPolicy::Lexicographic);
        assert_eq!(config.batch.failure, FailurePolicy::Isolate);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.batch.failure = FailurePolicy::Isolate;
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(Config::from_toml_str("[batch]\nfailure = \"sometimes\"").is_err());
    }
}
