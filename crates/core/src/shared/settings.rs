use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::domain::word_aligner::AlignmentStrategy;
use crate::shared::constants::{
    APP_DIR_NAME, DEFAULT_BATCH_WORKERS, DEFAULT_LANGUAGE_TAG, LESSONS_PATH_ENV,
    PROGRESS_STORE_ENV, PROGRESS_STORE_FILENAME, SETTINGS_FILENAME, SPITCH_API_KEY_ENV,
    SPITCH_API_URL_ENV,
};
use crate::transcription::infrastructure::spitch_transcriber::TranscriptionConfig;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User-level configuration, passed explicitly to whatever needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub transcription: TranscriptionConfig,
    pub default_language: String,
    pub alignment: AlignmentStrategy,
    pub store_path: Option<PathBuf>,
    /// Lesson catalogue file; the built-in catalogue when unset.
    pub lessons_path: Option<PathBuf>,
    pub batch_workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transcription: TranscriptionConfig::default(),
            default_language: DEFAULT_LANGUAGE_TAG.to_string(),
            alignment: AlignmentStrategy::default(),
            store_path: None,
            lessons_path: None,
            batch_workers: DEFAULT_BATCH_WORKERS,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(SETTINGS_FILENAME))
    }

    /// Loads the user settings file, falling back to defaults when it is
    /// missing or unreadable, then applies environment overrides.
    pub fn load() -> Self {
        let settings: Settings = Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        settings.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Loads an explicitly named settings file. Unlike [`Settings::load`],
    /// a missing or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: Settings = serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(settings.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies environment overrides looked up through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(SPITCH_API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.transcription.api_key = Some(key);
        }
        if let Some(url) = lookup(SPITCH_API_URL_ENV).filter(|u| !u.is_empty()) {
            self.transcription.api_url = url;
        }
        if let Some(path) = lookup(PROGRESS_STORE_ENV).filter(|p| !p.is_empty()) {
            self.store_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(LESSONS_PATH_ENV).filter(|p| !p.is_empty()) {
            self.lessons_path = Some(PathBuf::from(path));
        }
        self
    }

    /// Where learner progress is kept: the configured path, or
    /// `<data dir>/Pronounce/progress.json`.
    pub fn progress_store_path(&self) -> Option<PathBuf> {
        self.store_path.clone().or_else(|| {
            dirs::data_dir().map(|d| d.join(APP_DIR_NAME).join(PROGRESS_STORE_FILENAME))
        })
    }
}
