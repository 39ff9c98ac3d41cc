use super::aggregator::Aggregator;
use super::language_profile::LanguageProfile;
use super::normalizer::{normalize_with, words};
use super::score_result::{ScoreRequest, ScoreResult};
use super::sequence_aligner::SequenceAligner;
use super::word_aligner::{AlignmentStrategy, PositionalAligner, WordAligner};
use super::word_scorer::WordScorer;

/// Scores a transcript against a target phrase with positional alignment.
pub fn score_attempt(
    target_text: &str,
    transcript: &str,
    confidence: f64,
    language: &str,
) -> ScoreResult {
    ScoringEngine::default().score_attempt(target_text, transcript, confidence, language)
}

/// Normalize → align → score words → aggregate.
///
/// Holds no mutable state; one engine can be shared across threads.
pub struct ScoringEngine {
    aligner: Box<dyn WordAligner>,
}

impl ScoringEngine {
    pub fn new(aligner: Box<dyn WordAligner>) -> Self {
        Self { aligner }
    }

    pub fn with_strategy(strategy: AlignmentStrategy) -> Self {
        match strategy {
            AlignmentStrategy::Positional => Self::new(Box::new(PositionalAligner)),
            AlignmentStrategy::Sequence => Self::new(Box::new(SequenceAligner)),
        }
    }

    pub fn score(&self, request: &ScoreRequest) -> ScoreResult {
        self.score_attempt(
            &request.target_text,
            &request.transcript,
            request.confidence,
            &request.language,
        )
    }

    pub fn score_attempt(
        &self,
        target_text: &str,
        transcript: &str,
        confidence: f64,
        language: &str,
    ) -> ScoreResult {
        let profile = LanguageProfile::for_tag(language);

        let target_norm = normalize_with(target_text, profile);
        let transcript_norm = normalize_with(transcript, profile);
        let target_words = words(&target_norm);
        let heard_words = words(&transcript_norm);

        let alignment = self.aligner.align(&target_words, &heard_words);
        let word_scores = alignment
            .pairs
            .into_iter()
            .map(|pair| WordScorer::score_word(pair, profile))
            .collect();

        let result =
            Aggregator::aggregate_with_extra(word_scores, alignment.extra_words, confidence, profile);
        log::debug!(
            "Scored {} target words against {} heard words: {:.1}",
            target_words.len(),
            heard_words.len(),
            result.score
        );
        result
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::with_strategy(AlignmentStrategy::Positional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::score_result::{WordFeedback, WordStatus};
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_hello_there_exact() {
        let result = score_attempt("Hello there", "Hello there", 1.0, "english");
        assert_relative_eq!(result.score, 100.0);
        assert_eq!(
            result.word_feedback,
            vec![
                WordFeedback {
                    word: "hello".to_string(),
                    status: WordStatus::Correct,
                    suggestion: String::new(),
                },
                WordFeedback {
                    word: "there".to_string(),
                    status: WordStatus::Correct,
                    suggestion: String::new(),
                },
            ]
        );
        assert_eq!(
            result.suggestions,
            "Great job! Your English pronunciation is improving!"
        );
    }

    #[test]
    fn test_hello_there_missing_second_word() {
        let result = score_attempt("Hello there", "Hello", 1.0, "english");
        assert_eq!(result.word_feedback[0].status, WordStatus::Correct);
        assert_eq!(result.word_feedback[1].status, WordStatus::Wrong);
        assert_eq!(result.word_feedback[1].suggestion, "Missing word");
        assert_relative_eq!(result.score, 50.0);
        assert_eq!(result.suggestions, "Focus on: there");
    }

    #[test]
    fn test_igbo_close_word_with_reduced_confidence() {
        let result = score_attempt("kedu", "keju", 0.8, "igbo");
        assert_eq!(result.word_feedback[0].status, WordStatus::Close);
        // raw 75.0 * (0.7 + 0.3 * 0.8)
        assert_relative_eq!(result.score, 70.5);
        assert_eq!(result.suggestions, "Great job! Keep practicing!");
    }

    #[rstest]
    #[case::english("Good morning, friend", "english")]
    #[case::yoruba("Ẹ kú àárọ̀", "yoruba")]
    #[case::igbo("Kedu ka ị mere?", "igbo")]
    #[case::hausa("Sannu da zuwa", "hausa")]
    fn test_identical_text_scores_hundred(#[case] text: &str, #[case] language: &str) {
        let result = score_attempt(text, text, 1.0, language);
        assert_relative_eq!(result.score, 100.0);
        assert!(result
            .word_feedback
            .iter()
            .all(|fb| fb.status == WordStatus::Correct));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    #[case::punctuation_only("?!...")]
    fn test_empty_transcript_marks_every_word_missing(#[case] transcript: &str) {
        let result = score_attempt("Ẹ kú àárọ̀", transcript, 1.0, "yoruba");
        assert_relative_eq!(result.score, 0.0);
        assert_eq!(result.word_feedback.len(), 3);
        assert!(result
            .word_feedback
            .iter()
            .all(|fb| fb.status == WordStatus::Wrong && fb.suggestion == "Missing word"));
        assert_eq!(result.suggestions, "Focus on: e, ku, aaro");
    }

    #[test]
    fn test_empty_target_scores_zero() {
        let result = score_attempt("", "something", 1.0, "english");
        assert_relative_eq!(result.score, 0.0);
        assert!(result.word_feedback.is_empty());
    }

    #[rstest]
    #[case::shorter("one two three four", "one")]
    #[case::equal("one two three four", "one two three four")]
    #[case::longer("one two", "one two three four five")]
    #[case::empty("one two", "")]
    fn test_feedback_length_tracks_target(#[case] target: &str, #[case] transcript: &str) {
        let expected = target.split_whitespace().count();
        for strategy in AlignmentStrategy::ALL {
            let engine = ScoringEngine::with_strategy(*strategy);
            let result = engine.score_attempt(target, transcript, 1.0, "english");
            assert_eq!(result.word_feedback.len(), expected);
        }
    }

    #[test]
    fn test_score_non_decreasing_in_confidence() {
        let mut previous = f64::MIN;
        for step in 0..=20 {
            let confidence = step as f64 / 20.0;
            let result = score_attempt("kedu ka i mere", "keju ka mere", confidence, "igbo");
            assert!(result.score >= previous);
            assert!((0.0..=100.0).contains(&result.score));
            previous = result.score;
        }
    }

    #[test]
    fn test_unknown_language_uses_default_thresholds() {
        let unknown = score_attempt("kedu", "keju", 1.0, "klingon");
        let igbo = score_attempt("kedu", "keju", 1.0, "igbo");
        assert_eq!(unknown, igbo);
    }

    #[test]
    fn test_english_contraction_matches() {
        let result = score_attempt("I'm fine", "Im fine", 1.0, "english");
        assert_relative_eq!(result.score, 100.0);
    }

    #[test]
    fn test_accents_ignored_in_transcript() {
        let result = score_attempt("Ẹ kú àárọ̀", "e ku aaro", 1.0, "yoruba");
        assert_relative_eq!(result.score, 100.0);
    }

    #[test]
    fn test_positional_misaligns_after_insertion() {
        let result = score_attempt("good morning", "uh good morning", 1.0, "english");
        assert_eq!(result.word_feedback[0].status, WordStatus::Wrong);
    }

    #[test]
    fn test_sequence_strategy_tolerates_insertion() {
        let engine = ScoringEngine::with_strategy(AlignmentStrategy::Sequence);
        let result = engine.score_attempt("good morning", "uh good morning", 1.0, "english");
        assert!(result
            .word_feedback
            .iter()
            .all(|fb| fb.status == WordStatus::Correct));
        // the filler word counts as one zero in the mean
        assert_relative_eq!(result.score, 66.7);
    }

    #[test]
    fn test_positional_strategy_ignores_trailing_words() {
        let result = score_attempt("hello", "hello there friend", 1.0, "english");
        assert_relative_eq!(result.score, 100.0);
    }

    #[rstest]
    #[case::tie_rounds_down("ab", "ba", 0.01, 35.1)]
    #[case::kedu_keju("kedu", "keju", 0.8, 70.5)]
    fn test_score_rounding_matches_decimal_rounding(
        #[case] target: &str,
        #[case] transcript: &str,
        #[case] confidence: f64,
        #[case] expected: f64,
    ) {
        let result = score_attempt(target, transcript, confidence, "igbo");
        assert_eq!(result.score, expected);
    }

    #[test]
    fn test_score_request_matches_direct_call() {
        let engine = ScoringEngine::default();
        let request = ScoreRequest::new("Sannu da zuwa", "sanu da zuwa", 0.9, "hausa");
        assert_eq!(
            engine.score(&request),
            engine.score_attempt("Sannu da zuwa", "sanu da zuwa", 0.9, "hausa")
        );
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(ScoringEngine::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.score_attempt("hello", "hello", 1.0, "english"))
            })
            .collect();
        for handle in handles {
            assert_relative_eq!(handle.join().unwrap().score, 100.0);
        }
    }
}
