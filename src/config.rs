use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    app_dirs::AppDirs,
    error::SessionError,
    session::{Mode, SessionConfig},
};

/// Stored round settings. Only the target of the selected mode is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mode: Mode,
    pub word_count: u32,
    pub time_limit_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Countdown,
            word_count: 15,
            time_limit_secs: 30,
        }
    }
}

impl Config {
    pub fn session_config(&self) -> Result<SessionConfig, SessionError> {
        let target = match self.mode {
            Mode::WordCount => self.word_count,
            Mode::Countdown => self.time_limit_secs,
        };
        SessionConfig::new(self.mode, target)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(err) => tracing::warn!(
                    %err,
                    path = %self.path.display(),
                    "ignoring unreadable config"
                ),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
