use crate::game::Grid;
use crate::highscores::{HighScores, LoadError, SaveError};
use crate::tuning::{Tuning, TuningError, Variant};
use log::LevelFilter;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Minimum level of log messages to write to the log file
    #[serde(default)]
    pub(crate) log_level: Option<LevelFilter>,

    /// Which variant to play and any adjustments to it
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("powersnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which high scores should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// scores file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    fn high_scores_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .high_scores_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| default_data_file("highscores.json").map(Cow::from))
    }

    /// Return the filepath to which log messages should be written: the file
    /// given in the configuration or, if that is not set, the default log
    /// file path
    pub(crate) fn log_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .log_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| default_data_file("powersnake.log").map(Cow::from))
    }

    /// Load high scores from a file.  If the file does not exist, an empty
    /// set of high scores is returned.
    ///
    /// If `self.files.save_high_scores` is `false`, nothing is read from disk.
    pub(crate) fn load_high_scores(&self) -> Result<HighScores, LoadError> {
        if !self.files.save_high_scores {
            Ok(HighScores::default())
        } else if let Some(p) = self.high_scores_file() {
            HighScores::load(&p)
        } else {
            Err(LoadError::no_path())
        }
    }

    /// Save the given high scores to a file.
    ///
    /// If `self.files.save_high_scores` is `false`, nothing is saved.
    pub(crate) fn save_high_scores(&self, high_scores: &HighScores) -> Result<(), SaveError> {
        if !self.files.save_high_scores {
            return Ok(());
        }
        if let Some(p) = self.high_scores_file() {
            high_scores.save(&p)
        } else {
            Err(SaveError::no_path())
        }
    }
}

fn default_data_file(name: &str) -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("powersnake").join(name))
}

/// The `[game]` table: a variant plus optional overrides of its tuning
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    pub(crate) variant: Variant,
    width: Option<u16>,
    height: Option<u16>,
    tick_interval_ms: Option<u64>,
    score_per_food: Option<u32>,
    pause: Option<bool>,
    initial_length: Option<u16>,
}

impl GameConfig {
    /// Return the variant's tuning with any overrides applied
    ///
    /// # Errors
    ///
    /// Returns `Err` if the result is not playable
    pub(crate) fn tuning(&self) -> Result<Tuning, TuningError> {
        let base = self.variant.tuning();
        Tuning {
            grid: Grid::new(
                self.width.unwrap_or(base.grid.width),
                self.height.unwrap_or(base.grid.height),
            ),
            tick_interval: self
                .tick_interval_ms
                .map_or(base.tick_interval, Duration::from_millis),
            score_per_food: self.score_per_food.unwrap_or(base.score_per_food),
            pause_enabled: self.pause.unwrap_or(base.pause_enabled),
            initial_head: base.initial_head,
            initial_length: self.initial_length.unwrap_or(base.initial_length),
        }
        .validate()
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    high_scores_file: Option<PathBuf>,

    /// Whether to load & save high scores in a file
    save_high_scores: bool,

    /// Path to which log messages should be written
    log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_scores_file: None,
            save_high_scores: true,
            log_file: None,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    high_scores_file: Option<String>,
    save_high_scores: bool,
    log_file: Option<String>,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            high_scores_file: None,
            save_high_scores: true,
            log_file: None,
        }
    }
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = std::io::Error;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, std::io::Error> {
        Ok(FileConfig {
            high_scores_file: value
                .high_scores_file
                .map(expanduser::expanduser)
                .transpose()?,
            save_high_scores: value.save_high_scores,
            log_file: value.log_file.map(expanduser::expanduser).transpose()?,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
