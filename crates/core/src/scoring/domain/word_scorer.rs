use super::language_profile::LanguageProfile;
use super::score_result::{WordFeedback, WordStatus};
use super::similarity::similarity_ratio;
use super::word_aligner::AlignedWord;

pub const MISSING_WORD_SUGGESTION: &str = "Missing word";

/// Similarity and verdict for one aligned word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordScore {
    pub similarity: f64,
    pub feedback: WordFeedback,
}

pub struct WordScorer;

impl WordScorer {
    pub fn score_word(pair: AlignedWord<'_>, profile: &LanguageProfile) -> WordScore {
        let Some(heard) = pair.heard else {
            return WordScore {
                similarity: 0.0,
                feedback: WordFeedback {
                    word: pair.target.to_string(),
                    status: WordStatus::Wrong,
                    suggestion: MISSING_WORD_SUGGESTION.to_string(),
                },
            };
        };

        let similarity = similarity_ratio(pair.target, heard);
        let status = Self::classify(similarity, profile);
        let suggestion = match status {
            WordStatus::Correct => String::new(),
            WordStatus::Close => format!("Try pronouncing '{}' more clearly", pair.target),
            WordStatus::Wrong => format!("Expected '{}' but heard '{heard}'", pair.target),
        };

        WordScore {
            similarity,
            feedback: WordFeedback {
                word: pair.target.to_string(),
                status,
                suggestion,
            },
        }
    }

    pub fn classify(similarity: f64, profile: &LanguageProfile) -> WordStatus {
        if similarity >= profile.correct_threshold {
            WordStatus::Correct
        } else if similarity >= profile.close_threshold {
            WordStatus::Close
        } else {
            WordStatus::Wrong
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::language_profile::{DEFAULT_PROFILE, ENGLISH_PROFILE};
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn pair<'a>(target: &'a str, heard: Option<&'a str>) -> AlignedWord<'a> {
        AlignedWord { target, heard }
    }

    #[test]
    fn test_missing_word() {
        let score = WordScorer::score_word(pair("there", None), &ENGLISH_PROFILE);
        assert_relative_eq!(score.similarity, 0.0);
        assert_eq!(score.feedback.status, WordStatus::Wrong);
        assert_eq!(score.feedback.suggestion, "Missing word");
        assert_eq!(score.feedback.word, "there");
    }

    #[test]
    fn test_exact_match_is_correct_with_empty_suggestion() {
        let score = WordScorer::score_word(pair("hello", Some("hello")), &ENGLISH_PROFILE);
        assert_relative_eq!(score.similarity, 1.0);
        assert_eq!(score.feedback.status, WordStatus::Correct);
        assert!(score.feedback.suggestion.is_empty());
    }

    #[test]
    fn test_close_suggestion_text() {
        let score = WordScorer::score_word(pair("kedu", Some("keju")), &DEFAULT_PROFILE);
        assert_eq!(score.feedback.status, WordStatus::Close);
        assert_eq!(
            score.feedback.suggestion,
            "Try pronouncing 'kedu' more clearly"
        );
    }

    #[test]
    fn test_wrong_suggestion_names_heard_word() {
        let score = WordScorer::score_word(pair("there", Some("cat")), &ENGLISH_PROFILE);
        assert_eq!(score.feedback.status, WordStatus::Wrong);
        assert_eq!(
            score.feedback.suggestion,
            "Expected 'there' but heard 'cat'"
        );
    }

    #[rstest]
    #[case::english_correct_at_threshold(0.95, &ENGLISH_PROFILE, WordStatus::Correct)]
    #[case::english_close_below_correct(0.94, &ENGLISH_PROFILE, WordStatus::Close)]
    #[case::english_close_at_threshold(0.70, &ENGLISH_PROFILE, WordStatus::Close)]
    #[case::english_wrong_below_close(0.69, &ENGLISH_PROFILE, WordStatus::Wrong)]
    #[case::default_correct_at_threshold(0.90, &DEFAULT_PROFILE, WordStatus::Correct)]
    #[case::default_close(0.75, &DEFAULT_PROFILE, WordStatus::Close)]
    #[case::default_close_at_threshold(0.60, &DEFAULT_PROFILE, WordStatus::Close)]
    #[case::default_wrong(0.59, &DEFAULT_PROFILE, WordStatus::Wrong)]
    fn test_classify_thresholds(
        #[case] similarity: f64,
        #[case] profile: &LanguageProfile,
        #[case] expected: WordStatus,
    ) {
        assert_eq!(WordScorer::classify(similarity, profile), expected);
    }

    #[test]
    fn test_same_pair_classifies_differently_per_language() {
        // 18/19 ≈ 0.947: above the default bar, below the English one
        let heard = Some("abcdefghi");
        let other = WordScorer::score_word(pair("abcdefghij", heard), &DEFAULT_PROFILE);
        let english = WordScorer::score_word(pair("abcdefghij", heard), &ENGLISH_PROFILE);
        assert_eq!(other.feedback.status, WordStatus::Correct);
        assert_eq!(english.feedback.status, WordStatus::Close);
    }
}
