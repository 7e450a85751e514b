//! File-backed implementations of the engine's loader and storage traits.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use soul_game::{
    CatalogError, ConfigError, DataLoader, PlayerStorage, SoulConfig, TagCompound, TalentCatalog,
};

/// Reads configuration and talents from optional JSON files, falling back to
/// the bundled assets.
#[derive(Debug, Clone, Default)]
pub struct FileDataLoader {
    config_path: Option<PathBuf>,
    talents_path: Option<PathBuf>,
    force_debug: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum FileDataError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Talent catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl FileDataLoader {
    #[must_use]
    pub const fn new(config_path: Option<PathBuf>, talents_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            talents_path,
            force_debug: false,
        }
    }

    /// Turn debug mode on regardless of what the config file says.
    #[must_use]
    pub fn with_debug(mut self, force_debug: bool) -> Self {
        self.force_debug = force_debug;
        self
    }
}

fn read_file(path: &Path) -> Result<String, FileDataError> {
    fs::read_to_string(path).map_err(|source| FileDataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl DataLoader for FileDataLoader {
    type Error = FileDataError;

    fn load_config(&self) -> Result<SoulConfig, Self::Error> {
        let mut config = match &self.config_path {
            Some(path) => SoulConfig::from_json(&read_file(path)?)?,
            None => SoulConfig::load_from_static(),
        };
        config.debug_mode |= self.force_debug;
        Ok(config)
    }

    fn load_talent_catalog(&self) -> Result<TalentCatalog, Self::Error> {
        match &self.talents_path {
            Some(path) => Ok(TalentCatalog::from_json(&read_file(path)?)?),
            None => Ok(TalentCatalog::load_from_static()),
        }
    }
}

/// One pretty-printed JSON file per player under a save directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid player name `{0}`")]
    InvalidName(String),
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save file path for `player`.
    ///
    /// # Errors
    ///
    /// Returns an error when the name is empty or would escape the save directory.
    pub fn path_for(&self, player: &str) -> Result<PathBuf, FileStorageError> {
        let valid = !player.is_empty()
            && player != "."
            && player != ".."
            && !player.contains(['/', '\\']);
        if !valid {
            return Err(FileStorageError::InvalidName(player.to_string()));
        }
        Ok(self.dir.join(format!("{player}.json")))
    }
}

impl PlayerStorage for FileStorage {
    type Error = FileStorageError;

    fn save_player(&self, player: &str, data: &TagCompound) -> Result<(), Self::Error> {
        let path = self.path_for(player)?;
        fs::create_dir_all(&self.dir)?;
        let payload = serde_json::to_string_pretty(data)?;
        fs::write(path, payload)?;
        Ok(())
    }

    fn load_player(&self, player: &str) -> Result<Option<TagCompound>, Self::Error> {
        let path = self.path_for(player)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn delete_player(&self, player: &str) -> Result<(), Self::Error> {
        let path = self.path_for(player)?;
        match fs::remove_file(path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}
