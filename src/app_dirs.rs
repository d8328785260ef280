use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typetick";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        match ProjectDirs::from("", "", APP_NAME) {
            Some(pd) => pd.config_dir().join("config.json"),
            None => PathBuf::from("typetick_config.json"),
        }
    }

    pub fn log_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".local").join("state").join(APP_NAME))
        } else {
            ProjectDirs::from("", "", APP_NAME).map(|pd| pd.data_local_dir().to_path_buf())
        }
    }
}
