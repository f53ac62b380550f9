use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

const CONFIG_FILE: &str = "config.json";

/// Reads and writes `config.json`.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager for `<base>/config.json`, creating `base` when missing.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        Ok(Self::new(base.join(CONFIG_FILE)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Missing file means defaults; unknown keys are ignored.
    pub fn load(&self) -> Result<Config, ConfigError> {
        match fs::read_to_string(&self.config_path) {
            Ok(data) => serde_json::from_str(&data).map_err(|err| {
                ConfigError::Serde(format!("{}: {}", self.config_path.display(), err))
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Replaces the config file via a sibling `.tmp` copy. The previous
    /// settings stay in place if any step fails.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| ConfigError::Serde(err.to_string()))?;
        let staging = self.staging_path();
        let written =
            fs::write(&staging, json).and_then(|()| fs::rename(&staging, &self.config_path));
        if written.is_err() && staging.is_file() {
            let _ = fs::remove_file(&staging);
        }
        written.map_err(ConfigError::from)
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .config_path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(CONFIG_FILE));
        name.push(".tmp");
        self.config_path.with_file_name(name)
    }
}
