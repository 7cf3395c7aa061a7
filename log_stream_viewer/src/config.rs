use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use lsv_client::SCRIPT_RUN_WINDOW;
use lsv_core::{
    IntoIoError, IntoJsonError, JsonFileError, VIEWER_DIR, VIEWER_VERSION_NAME, err, print,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

/// Viewer configuration stored in `LogStreamViewer/config.json`
/// (see [`VIEWER_DIR`]).
///
/// Optional fields are treated as their default when missing,
/// so older config files keep loading.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Base url of the log server.
    pub server: String,

    /// How long to follow the log stream after running a script.
    ///
    /// Default: 30
    pub script_run_window_secs: Option<u64>,

    /// Whether to also write the viewer's own logs to
    /// `LogStreamViewer/logs/`.
    ///
    /// Default: `true`
    pub log_to_file: Option<bool>,

    /// The version of the viewer that last wrote this file.
    pub version: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_owned(),
            script_run_window_secs: Some(SCRIPT_RUN_WINDOW.as_secs()),
            log_to_file: Some(true),
            version: Some(VIEWER_VERSION_NAME.to_owned()),
        }
    }
}

impl ViewerConfig {
    pub fn path() -> PathBuf {
        VIEWER_DIR.join("config.json")
    }

    /// Load the viewer configuration, falling back to defaults
    /// if it can't be read at all.
    ///
    /// A missing config is created, a corrupted one is backed up
    /// to `config.json.bak` and reset (with an error log message).
    pub fn load_s(no_log: bool) -> Self {
        Self::load_and_set_logging(&Self::path(), no_log)
    }

    /// File logging is settled before the config is read (off with
    /// `no_log`), then turned off too if the config says so.
    pub fn load_and_set_logging(config_path: &Path, no_log: bool) -> Self {
        print::set_file_logging(!no_log);
        let config = Self::load_from(config_path).unwrap_or_else(|error| {
            err!("Couldn't load config, using defaults: {error}");
            Self::default()
        });
        if !config.c_log_to_file() {
            print::set_file_logging(false);
        }
        config
    }

    /// # Errors
    /// - if the user doesn't have permission to access the viewer directory
    pub fn load_from(config_path: &Path) -> Result<Self, JsonFileError> {
        if !config_path.exists() {
            return Self::create(config_path);
        }

        let config = std::fs::read_to_string(config_path).path(config_path)?;
        match serde_json::from_str::<Self>(&config).json(config.clone()) {
            Ok(config) => Ok(config),
            Err(error) => {
                err!("Invalid viewer config, resetting it! {error}");
                let old_path = config_path.with_extension("json.bak");
                _ = std::fs::copy(config_path, &old_path);
                Self::create(config_path)
            }
        }
    }

    pub async fn save(&self) -> Result<(), JsonFileError> {
        self.save_to(&Self::path()).await
    }

    pub async fn save_to(&self, config_path: &Path) -> Result<(), JsonFileError> {
        let config = serde_json::to_string_pretty(&self).json_to()?;
        tokio::fs::write(config_path, config.as_bytes())
            .await
            .path(config_path)?;
        Ok(())
    }

    fn create(path: &Path) -> Result<Self, JsonFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).path(parent)?;
        }
        let config = Self::default();
        std::fs::write(path, serde_json::to_string_pretty(&config).json_to()?.as_bytes())
            .path(path)?;
        Ok(config)
    }

    pub fn c_script_run_window(&self) -> Duration {
        self.script_run_window_secs
            .map_or(SCRIPT_RUN_WINDOW, Duration::from_secs)
    }

    pub fn c_log_to_file(&self) -> bool {
        self.log_to_file.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert!(path.exists());
        assert_eq!(config.c_script_run_window(), Duration::from_secs(30));
    }

    #[test]
    fn corrupt_config_is_backed_up_and_reset() {
        print::set_print(false);
        print::set_file_logging(false);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(config, ViewerConfig::default());
        let backup = std::fs::read_to_string(dir.path().join("config.json.bak")).unwrap();
        assert_eq!(backup, "{ not json");
    }

    #[test]
    fn no_log_holds_while_a_broken_config_is_reset() {
        print::set_print(false);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "server": 5000 }"#).unwrap();

        let config = ViewerConfig::load_and_set_logging(&path, true);
        assert_eq!(config, ViewerConfig::default());
        assert!(!print::is_file_logging());
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "server": "http://logs.internal:8080" }"#).unwrap();

        let config = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(config.server, "http://logs.internal:8080");
        assert_eq!(config.c_script_run_window(), SCRIPT_RUN_WINDOW);
        assert!(config.c_log_to_file());
    }

    #[tokio::test]
    async fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = ViewerConfig {
            server: "https://example.com".to_owned(),
            script_run_window_secs: Some(5),
            log_to_file: Some(false),
            version: None,
        };
        config.save_to(&path).await.unwrap();

        let loaded = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.c_script_run_window(), Duration::from_secs(5));
        assert!(!loaded.c_log_to_file());
    }
}
