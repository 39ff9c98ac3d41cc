use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::domain::score_result::{ScoreResult, WordFeedback};

/// One scored pronunciation attempt, as handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub learner_id: String,
    pub lesson_item_id: u64,
    pub target_text: String,
    pub transcript: String,
    pub language: String,
    pub score: f64,
    pub word_feedback: Vec<WordFeedback>,
    pub created_at: DateTime<Utc>,
}

impl AttemptRecord {
    pub fn new(
        learner_id: impl Into<String>,
        lesson_item_id: u64,
        target_text: impl Into<String>,
        transcript: impl Into<String>,
        language: impl Into<String>,
        result: &ScoreResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            learner_id: learner_id.into(),
            lesson_item_id,
            target_text: target_text.into(),
            transcript: transcript.into(),
            language: language.into(),
            score: result.score,
            word_feedback: result.word_feedback.clone(),
            created_at,
        }
    }
}
