use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::lessons::domain::lesson::{Lesson, LessonItem, LessonLevel};
use crate::lessons::domain::lesson_catalog::LessonCatalog;
use crate::scoring::domain::language::Language;

const BUILTIN_LESSONS: &str = include_str!("seed_lessons.json");

#[derive(Error, Debug)]
pub enum LessonSourceError {
    #[error("failed to read lessons from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid lessons file: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("unknown lesson language '{0}'")]
    UnknownLanguage(String),
    #[error("unknown lesson level '{0}'")]
    UnknownLevel(String),
    #[error("lesson '{title}' has an item with empty text")]
    EmptyItem { title: String },
}

#[derive(Deserialize)]
struct LessonFile {
    languages: Vec<LanguageGroup>,
}

#[derive(Deserialize)]
struct LanguageGroup {
    language: String,
    level: String,
    lessons: Vec<LessonEntry>,
}

#[derive(Deserialize)]
struct LessonEntry {
    title: String,
    #[serde(default)]
    items: Vec<ItemEntry>,
}

#[derive(Deserialize)]
struct ItemEntry {
    text: String,
    #[serde(default)]
    expected_answer: Option<String>,
    #[serde(default)]
    hint: Option<String>,
    #[serde(default)]
    audio_url: Option<String>,
}

/// Lesson catalogue loaded from JSON grouped by language and level.
///
/// Lessons and items are numbered from 1 in file order, so ids are stable
/// as long as the file only grows at the end. A group's language may be a
/// tag (`yoruba`) or a service code (`yo`).
pub struct JsonLessonSource;

impl JsonLessonSource {
    /// The catalogue shipped with the crate.
    pub fn builtin() -> Result<LessonCatalog, LessonSourceError> {
        Self::parse(BUILTIN_LESSONS)
    }

    pub fn load(path: &Path) -> Result<LessonCatalog, LessonSourceError> {
        let json = fs::read_to_string(path).map_err(|e| LessonSourceError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog = Self::parse(&json)?;
        log::info!("Loaded {} lessons from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn parse(json: &str) -> Result<LessonCatalog, LessonSourceError> {
        let file: LessonFile = serde_json::from_str(json).map_err(LessonSourceError::Parse)?;

        let mut lessons = Vec::new();
        let mut next_item_id = 1;
        for group in file.languages {
            let language = Language::from_tag(&group.language)
                .or_else(|| Language::from_code(&group.language))
                .ok_or_else(|| LessonSourceError::UnknownLanguage(group.language.clone()))?;
            let level = LessonLevel::from_tag(&group.level)
                .ok_or_else(|| LessonSourceError::UnknownLevel(group.level.clone()))?;

            for entry in group.lessons {
                let lesson_id = lessons.len() as u64 + 1;
                let mut items = Vec::with_capacity(entry.items.len());
                for raw in entry.items {
                    if raw.text.trim().is_empty() {
                        return Err(LessonSourceError::EmptyItem { title: entry.title });
                    }
                    let expected_answer = raw.expected_answer.unwrap_or_else(|| raw.text.clone());
                    items.push(LessonItem {
                        id: next_item_id,
                        lesson_id,
                        text: raw.text,
                        expected_answer,
                        hint: raw.hint,
                        audio_url: raw.audio_url,
                    });
                    next_item_id += 1;
                }
                lessons.push(Lesson {
                    id: lesson_id,
                    language,
                    title: entry.title,
                    level,
                    items,
                });
            }
        }
        Ok(LessonCatalog::new(lessons))
    }
}
