//! Loads game configuration from an optional JSON file on disk.
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use treasure_game::{ConfigError, ConfigSource, GameConfig};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Built-in profiles, or the ones in the given file.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    path: Option<PathBuf>,
}

impl FileConfig {
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ConfigSource for FileConfig {
    type Error = LoadError;

    fn load_config(&self) -> Result<GameConfig, Self::Error> {
        let Some(path) = &self.path else {
            return Ok(GameConfig::default());
        };
        log::debug!("loading config from {}", path.display());
        let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(GameConfig::from_json(&json)?)
    }
}
