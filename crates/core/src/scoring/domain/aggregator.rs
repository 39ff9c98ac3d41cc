use super::language_profile::LanguageProfile;
use super::score_result::{ScoreResult, WordFeedback, WordStatus};
use super::word_scorer::WordScore;

/// Share of the score that does not depend on transcription confidence.
pub const CONFIDENCE_FLOOR: f64 = 0.7;
/// Share of the score scaled by transcription confidence.
pub const CONFIDENCE_WEIGHT: f64 = 0.3;
pub const MAX_SCORE: f64 = 100.0;

pub struct Aggregator;

impl Aggregator {
    /// Combines per-word scores into the overall result.
    ///
    /// `confidence` is expected in `[0, 1]` and is not validated here:
    /// values above 1 raise the multiplier past 1.0 (the score is still
    /// capped at 100).
    pub fn aggregate(
        word_scores: Vec<WordScore>,
        confidence: f64,
        profile: &LanguageProfile,
    ) -> ScoreResult {
        Self::aggregate_with_extra(word_scores, 0, confidence, profile)
    }

    /// Like [`Aggregator::aggregate`], counting `extra_words` inserted
    /// transcript words as zero-similarity entries in the mean.
    pub fn aggregate_with_extra(
        word_scores: Vec<WordScore>,
        extra_words: usize,
        confidence: f64,
        profile: &LanguageProfile,
    ) -> ScoreResult {
        let raw = Self::raw_score(&word_scores, extra_words);
        let score = round_one_decimal(clamp_score(
            raw * (CONFIDENCE_FLOOR + CONFIDENCE_WEIGHT * confidence),
        ));

        let word_feedback: Vec<WordFeedback> =
            word_scores.into_iter().map(|ws| ws.feedback).collect();
        let suggestions = Self::suggestions(&word_feedback, profile);

        ScoreResult {
            score,
            word_feedback,
            suggestions,
        }
    }

    /// Mean similarity scaled to `[0, 100]`; zero when there are no target
    /// words. Each extra word adds a zero to the mean.
    pub fn raw_score(word_scores: &[WordScore], extra_words: usize) -> f64 {
        if word_scores.is_empty() {
            return 0.0;
        }
        let total: f64 = word_scores.iter().map(|ws| ws.similarity).sum();
        total / (word_scores.len() + extra_words) as f64 * MAX_SCORE
    }

    pub fn suggestions(word_feedback: &[WordFeedback], profile: &LanguageProfile) -> String {
        let wrong: Vec<&str> = word_feedback
            .iter()
            .filter(|fb| fb.status == WordStatus::Wrong)
            .map(|fb| fb.word.as_str())
            .collect();

        if wrong.is_empty() {
            profile.encouragement.to_string()
        } else {
            format!("Focus on: {}", wrong.join(", "))
        }
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, MAX_SCORE)
}

/// Rounds the exact binary value to one decimal, ties to even.
///
/// `(v * 10.0).round()` would round twice and push exact ties away from
/// zero; decimal formatting works on the stored value directly.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
