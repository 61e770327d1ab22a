use crate::error::{SongkeyError, SongkeyResult};
use crate::voice_search::{SearchOptions, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Library
    pub library_path: String,
    /// Optional JSON table of label strings; English when empty
    pub strings_path: String,

    // Search
    pub fuzzy_fallback: bool,
    pub match_threshold: f64,
    pub rank_limit: usize,

    // Meta
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: dirs::data_dir()
                .unwrap_or_default()
                .join("songkey/library.json")
                .to_string_lossy()
                .to_string(),
            strings_path: String::new(),
            fuzzy_fallback: true,
            match_threshold: DEFAULT_THRESHOLD,
            rank_limit: 5,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    /// Load config from `path`
    ///
    /// A missing file gives defaults. An unreadable one is moved aside to
    /// `*.json.corrupt` and defaults are used.
    pub fn load_from(path: &Path) -> SongkeyResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<Config>(&content) {
            Ok(config) => {
                config.validate()?;
                Ok(config)
            }
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> SongkeyResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> SongkeyResult<()> {
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(SongkeyError::Config(format!(
                "match_threshold must be within 0.0..=1.0, got {}",
                self.match_threshold
            )));
        }
        Ok(())
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            fuzzy_fallback: self.fuzzy_fallback,
            threshold: self.match_threshold,
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("songkey")
        .join("config.json")
}
