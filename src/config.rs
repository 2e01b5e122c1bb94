use crate::rules::{Rules, RulesError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
pub struct Config {
    /// Gameplay parameters
    #[serde(default)]
    pub rules: Rules,

    /// Settings about data files
    #[serde(default)]
    pub files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    ///
    /// # Errors
    ///
    /// Returns `Err` if the local configuration directory could not be
    /// determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("mathsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, if the file's contents
    /// could not be deserialized, or if the rules it gives are invalid.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        let config = toml::from_str::<Config>(&content)?;
        let _ = config.rules.validate()?;
        Ok(config)
    }

    /// Return the path at which high scores should be stored: the file given
    /// in the configuration or, if that is not set, a file in the local data
    /// directory.  Returns `None` if neither is available.
    pub fn high_scores_file(&self) -> Option<PathBuf> {
        self.files
            .high_scores_file
            .clone()
            .or_else(|| data_file("highscores.json"))
    }

    /// Return the path to write log messages to, in the same manner as
    /// [`Config::high_scores_file()`]
    pub fn log_file(&self) -> Option<PathBuf> {
        self.files
            .log_file
            .clone()
            .or_else(|| data_file("mathsnake.log"))
    }
}

fn data_file(name: &str) -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("mathsnake").join(name))
}

/// Locations of the game's data files.  A leading `~` in either path is
/// expanded to the user's home directory.
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub struct FileConfig {
    /// Path at which the high scores are stored
    pub high_scores_file: Option<PathBuf>,

    /// Path to write log messages to
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    high_scores_file: Option<String>,
    log_file: Option<String>,
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = std::io::Error;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, std::io::Error> {
        Ok(FileConfig {
            high_scores_file: value
                .high_scores_file
                .map(expanduser::expanduser)
                .transpose()?,
            log_file: value.log_file.map(expanduser::expanduser).transpose()?,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid rules in configuration file")]
    Invalid(#[from] RulesError),
}
