use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progress::domain::attempt::AttemptRecord;
use crate::progress::domain::learner_preferences::LearnerPreferences;
use crate::progress::domain::learner_progress::LearnerProgress;
use crate::progress::domain::progress_repository::ProgressRepository;

#[derive(Error, Debug)]
pub enum ProgressStoreError {
    #[error("failed to create store directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read progress store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt progress store {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize progress store: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write progress store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProgressDocument {
    #[serde(default)]
    learners: BTreeMap<String, LearnerProgress>,
    #[serde(default)]
    attempts: Vec<AttemptRecord>,
    #[serde(default)]
    preferences: BTreeMap<String, LearnerPreferences>,
}

/// Keeps learner progress, attempt history and preferences in a single
/// JSON file.
///
/// The whole document is held in memory and rewritten after every change.
/// A change only reaches memory once the file write succeeded, so a failed
/// write leaves both the file and this store as they were. A missing file
/// is treated as an empty store.
pub struct JsonProgressStore {
    path: PathBuf,
    document: ProgressDocument,
}

impl JsonProgressStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ProgressStoreError> {
        let path = path.into();
        let document = if path.exists() {
            let json = fs::read_to_string(&path).map_err(|e| ProgressStoreError::Read {
                path: path.clone(),
                source: e,
            })?;
            serde_json::from_str(&json).map_err(|e| ProgressStoreError::Parse {
                path: path.clone(),
                source: e,
            })?
        } else {
            ProgressDocument::default()
        };
        log::debug!(
            "Opened progress store {} ({} learners, {} attempts)",
            path.display(),
            document.learners.len(),
            document.attempts.len()
        );
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the document, writes the copy, and
    /// keeps it only if the write succeeded.
    fn commit(
        &mut self,
        change: impl FnOnce(&mut ProgressDocument),
    ) -> Result<(), ProgressStoreError> {
        let mut next = self.document.clone();
        change(&mut next);
        self.persist(&next)?;
        self.document = next;
        Ok(())
    }

    fn persist(&self, document: &ProgressDocument) -> Result<(), ProgressStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ProgressStoreError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json =
            serde_json::to_string_pretty(document).map_err(ProgressStoreError::Serialize)?;

        // Write beside the store, then swap it in with a rename
        let temp_path = self.path.with_extension("part");
        let write_err = |e| ProgressStoreError::Write {
            path: temp_path.clone(),
            source: e,
        };
        let mut file = fs::File::create(&temp_path).map_err(write_err)?;
        if let Err(e) = file.write_all(json.as_bytes()).and_then(|_| file.flush()) {
            drop(file);
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| ProgressStoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl ProgressRepository for JsonProgressStore {
    fn load_progress(
        &self,
        learner_id: &str,
    ) -> Result<Option<LearnerProgress>, Box<dyn std::error::Error>> {
        Ok(self.document.learners.get(learner_id).cloned())
    }

    fn save_progress(
        &mut self,
        progress: &LearnerProgress,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.commit(|doc| {
            doc.learners
                .insert(progress.learner_id.clone(), progress.clone());
        })?)
    }

    fn record_attempt(
        &mut self,
        attempt: &AttemptRecord,
        progress: &LearnerProgress,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.commit(|doc| {
            doc.attempts.push(attempt.clone());
            doc.learners
                .insert(progress.learner_id.clone(), progress.clone());
        })?)
    }

    fn attempts(
        &self,
        learner_id: &str,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<AttemptRecord>, Box<dyn std::error::Error>> {
        let mut attempts: Vec<&AttemptRecord> = self
            .document
            .attempts
            .iter()
            .rev()
            .filter(|a| a.learner_id == learner_id)
            .collect();
        attempts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(attempts
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    fn leaderboard(
        &self,
        limit: usize,
    ) -> Result<Vec<LearnerProgress>, Box<dyn std::error::Error>> {
        let mut learners: Vec<&LearnerProgress> = self.document.learners.values().collect();
        learners.sort_by(|a, b| b.xp.cmp(&a.xp).then_with(|| a.learner_id.cmp(&b.learner_id)));
        Ok(learners.into_iter().take(limit).cloned().collect())
    }

    fn load_preferences(
        &self,
        learner_id: &str,
    ) -> Result<Option<LearnerPreferences>, Box<dyn std::error::Error>> {
        Ok(self.document.preferences.get(learner_id).cloned())
    }

    fn save_preferences(
        &mut self,
        preferences: &LearnerPreferences,
    ) -> Result<(), Box<dyn std::error::Error>> {
        Ok(self.commit(|doc| {
            doc.preferences
                .insert(preferences.learner_id.clone(), preferences.clone());
        })?)
    }
}
