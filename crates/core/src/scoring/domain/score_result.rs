use serde::{Deserialize, Serialize};

use crate::shared::constants::{DEFAULT_CONFIDENCE, DEFAULT_LANGUAGE_TAG};

/// Verdict for one target word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Correct,
    Close,
    Wrong,
}

impl std::fmt::Display for WordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WordStatus::Correct => write!(f, "correct"),
            WordStatus::Close => write!(f, "close"),
            WordStatus::Wrong => write!(f, "wrong"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFeedback {
    /// Normalized target word.
    pub word: String,
    pub status: WordStatus,
    /// Empty when `status` is `correct`.
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Overall score in `[0, 100]`, rounded to one decimal.
    pub score: f64,
    /// One entry per normalized target word, in target order.
    pub word_feedback: Vec<WordFeedback>,
    pub suggestions: String,
}

impl ScoreResult {
    pub fn count(&self, status: WordStatus) -> usize {
        self.word_feedback
            .iter()
            .filter(|fb| fb.status == status)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub target_text: String,
    pub transcript: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}

fn default_language() -> String {
    DEFAULT_LANGUAGE_TAG.to_string()
}

impl ScoreRequest {
    pub fn new(
        target_text: impl Into<String>,
        transcript: impl Into<String>,
        confidence: f64,
        language: impl Into<String>,
    ) -> Self {
        Self {
            target_text: target_text.into(),
            transcript: transcript.into(),
            confidence,
            language: language.into(),
        }
    }
}
