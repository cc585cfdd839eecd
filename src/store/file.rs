use std::fs;
use std::path::{Path, PathBuf};

use crate::app::{HopefulError, Result};
use crate::store::{PreferenceStore, Preferences};

/// Preferences kept in a small TOML file under the user data directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/hopeful/preferences.toml`
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| HopefulError::Config("Could not find data directory".into()))?;
        Ok(data_dir.join("hopeful").join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            HopefulError::Preferences(format!("{}: {}", self.path.display(), e))
        })
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string(prefs).map_err(|e| HopefulError::Preferences(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
