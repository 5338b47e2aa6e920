use crate::console::MAX_CONSOLE_ENTRIES;
use crate::error::Error;
use crate::model::Language;
use crate::{muted_error, weak_error};
use log::error;
use serde::Deserialize;
use std::fs::read_to_string;
use std::path::Path;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of retained console entries.
    pub max_console_entries: usize,
    /// Refresh paused state after every console command.
    pub refresh_after_console_command: bool,
    /// Insert a breakpoint at `main` when a binary is loaded.
    pub auto_add_breakpoint_to_main: bool,
    /// Language assumed for a freshly loaded binary.
    pub default_language: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_console_entries: MAX_CONSOLE_ENTRIES,
            refresh_after_console_command: true,
            auto_add_breakpoint_to_main: true,
            default_language: Language::CFamily,
        }
    }
}

impl Config {
    const DEFAULT_PATH: &'static str = ".config/dbgsync/config.toml";

    /// Load configuration from file. Return [`None`] on errors.
    /// If `path` is not set, then `~/.config/dbgsync/config.toml` is used and its absence is not
    /// an error.
    pub fn from_file(path: Option<&str>) -> Option<Self> {
        match path {
            None => {
                let path = home::home_dir()?.join(Self::DEFAULT_PATH);
                let data = muted_error!(read_to_string(path))?;
                weak_error!(Self::parse(&data))
            }
            Some(path) => match Self::load(path) {
                Ok(config) => Some(config),
                Err(err) => {
                    error!(target: "session", "Error while load config file: {err}");
                    None
                }
            },
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let data = read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, Error> {
        Ok(toml::de::from_str(data)?)
    }
}
