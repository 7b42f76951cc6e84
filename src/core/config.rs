//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::presentation::DEFAULT_THEME;
use super::session::{SessionDefaults, PLACEHOLDER_TITLE, STARTER_CONTENT};
use super::store::STORAGE_KEY;

/// Number of recently opened presentations remembered
const MAX_RECENT: usize = 10;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage settings
    pub storage: StorageConfig,
    /// Defaults for new presentations
    pub session: SessionConfig,
    /// Slide library settings
    pub library: LibraryConfig,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Recently opened presentation ids, most recent first
    pub recent_presentations: Vec<String>,
}

/// Where presentations are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory (defaults to the platform data dir)
    pub data_dir: Option<PathBuf>,
    /// Key of the presentation map inside the data directory
    pub storage_key: String,
}

/// Values applied when creating and saving presentations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub placeholder_title: String,
    pub starter_content: String,
    pub default_theme: String,
}

/// Slide library settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Directory of markdown slide files (defaults to `<data_dir>/slides`)
    pub slides_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            session: SessionConfig::default(),
            library: LibraryConfig::default(),
            log_level: "info".to_string(),
            recent_presentations: Vec::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            placeholder_title: PLACEHOLDER_TITLE.to_string(),
            starter_content: STARTER_CONTENT.to_string(),
            default_theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn defaults(&self) -> SessionDefaults {
        SessionDefaults {
            placeholder_title: self.placeholder_title.clone(),
            starter_content: self.starter_content.clone(),
            default_theme: self.default_theme.clone(),
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "slidedeck", "SlideDeck")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    /// Load configuration from a file, using defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Add a presentation to the recent list
    pub fn add_recent_presentation(&mut self, id: &str) {
        self.recent_presentations.retain(|p| p != id);
        self.recent_presentations.insert(0, id.to_string());
        self.recent_presentations.truncate(MAX_RECENT);
    }

    /// Drop a presentation from the recent list
    pub fn forget_presentation(&mut self, id: &str) {
        self.recent_presentations.retain(|p| p != id);
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            Self::project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Get the slide library directory
    pub fn slides_dir(&self) -> PathBuf {
        self.library
            .slides_dir
            .clone()
            .unwrap_or_else(|| self.data_dir().join("slides"))
    }

    /// Log level filter, falling back to INFO for unknown names
    pub fn level_filter(&self) -> tracing_subscriber::filter::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config.storage.storage_key, STORAGE_KEY);
        assert_eq!(config.session.placeholder_title, PLACEHOLDER_TITLE);
        assert!(config.recent_presentations.is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"session":{"default_theme":"black"},"log_level":"debug"}"#)
            .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.session.default_theme, "black");
        assert_eq!(config.session.starter_content, STARTER_CONTENT);
        assert_eq!(config.level_filter(), tracing_subscriber::filter::LevelFilter::DEBUG);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");
        let mut config = AppConfig::default();
        config.storage.data_dir = Some(dir.path().join("data"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.data_dir(), dir.path().join("data"));
        assert_eq!(loaded.slides_dir(), dir.path().join("data/slides"));
    }

    #[test]
    fn test_recent_presentations_are_bounded() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_presentation(&format!("p{i}"));
        }
        config.add_recent_presentation("p5");
        assert_eq!(config.recent_presentations.len(), MAX_RECENT);
        assert_eq!(config.recent_presentations[0], "p5");

        config.forget_presentation("p5");
        assert!(!config.recent_presentations.contains(&"p5".to_string()));
    }
}
