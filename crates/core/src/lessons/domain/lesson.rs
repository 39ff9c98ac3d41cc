use serde::{Deserialize, Serialize};

use crate::scoring::domain::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl LessonLevel {
    pub const ALL: &[LessonLevel] = &[
        LessonLevel::Beginner,
        LessonLevel::Intermediate,
        LessonLevel::Advanced,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            LessonLevel::Beginner => "beginner",
            LessonLevel::Intermediate => "intermediate",
            LessonLevel::Advanced => "advanced",
        }
    }

    /// Parses a level tag, ignoring case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<LessonLevel> {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.tag().eq_ignore_ascii_case(tag))
    }
}

/// One phrase a learner practises.
///
/// `text` is what gets shown and scored against; `expected_answer` is the
/// plain spelling a learner would type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonItem {
    pub id: u64,
    pub lesson_id: u64,
    pub text: String,
    pub expected_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u64,
    pub language: Language,
    pub title: String,
    pub level: LessonLevel,
    pub items: Vec<LessonItem>,
}
