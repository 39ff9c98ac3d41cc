use super::similarity::similarity_ratio;
use super::word_aligner::{AlignedWord, Alignment, WordAligner};

const GAP_COST: f64 = 1.0;
const EPSILON: f64 = 1e-9;

/// Aligns words by minimum edit cost instead of by index.
///
/// Substituting a target word with a transcript word costs
/// `1 - similarity`, while skipping a target word or an extra transcript
/// word costs [`GAP_COST`]. A mispronounced word therefore still pairs
/// with its attempt, and filler words ("um", "uh") no longer shift the
/// rest of the phrase. Skipped transcript words are reported as
/// [`Alignment::extra_words`] so the score can penalize them.
pub struct SequenceAligner;

impl WordAligner for SequenceAligner {
    fn align<'a>(&self, target: &[&'a str], heard: &[&'a str]) -> Alignment<'a> {
        let n = target.len();
        let m = heard.len();

        let substitution: Vec<Vec<f64>> = target
            .iter()
            .map(|t| heard.iter().map(|h| 1.0 - similarity_ratio(t, h)).collect())
            .collect();

        let mut cost = vec![vec![0.0f64; m + 1]; n + 1];
        for (i, row) in cost.iter_mut().enumerate() {
            row[0] = i as f64 * GAP_COST;
        }
        for j in 0..=m {
            cost[0][j] = j as f64 * GAP_COST;
        }
        for i in 1..=n {
            for j in 1..=m {
                let diagonal = cost[i - 1][j - 1] + substitution[i - 1][j - 1];
                let skip_target = cost[i - 1][j] + GAP_COST;
                let skip_heard = cost[i][j - 1] + GAP_COST;
                cost[i][j] = diagonal.min(skip_target).min(skip_heard);
            }
        }

        let mut aligned = Vec::with_capacity(n);
        let mut extra_words = 0;
        let (mut i, mut j) = (n, m);
        while i > 0 {
            if j > 0 && close_to(cost[i][j], cost[i - 1][j - 1] + substitution[i - 1][j - 1]) {
                aligned.push(AlignedWord {
                    target: target[i - 1],
                    heard: Some(heard[j - 1]),
                });
                i -= 1;
                j -= 1;
            } else if close_to(cost[i][j], cost[i - 1][j] + GAP_COST) {
                aligned.push(AlignedWord {
                    target: target[i - 1],
                    heard: None,
                });
                i -= 1;
            } else {
                extra_words += 1;
                j -= 1;
            }
        }
        // Transcript words before the first target word
        extra_words += j;
        aligned.reverse();
        Alignment {
            pairs: aligned,
            extra_words,
        }
    }
}

fn close_to(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heard_words<'a>(alignment: &Alignment<'a>) -> Vec<Option<&'a str>> {
        alignment.pairs.iter().map(|p| p.heard).collect()
    }

    #[test]
    fn test_identical_sequences_pair_one_to_one() {
        let pairs = SequenceAligner.align(&["hello", "there"], &["hello", "there"]);
        assert_eq!(heard_words(&pairs), vec![Some("hello"), Some("there")]);
    }

    #[test]
    fn test_filler_word_is_skipped() {
        let pairs = SequenceAligner.align(&["good", "morning"], &["uh", "good", "morning"]);
        assert_eq!(heard_words(&pairs), vec![Some("good"), Some("morning")]);
        assert_eq!(pairs.extra_words, 1);
    }

    #[test]
    fn test_inserted_words_are_counted() {
        let alignment =
            SequenceAligner.align(&["e", "ku", "aaro"], &["e", "um", "ku", "aaro", "o", "o"]);
        assert_eq!(heard_words(&alignment), vec![Some("e"), Some("ku"), Some("aaro")]);
        assert_eq!(alignment.extra_words, 3);
    }

    #[test]
    fn test_empty_target_counts_every_heard_word() {
        let alignment = SequenceAligner.align(&[], &["hello", "there"]);
        assert!(alignment.pairs.is_empty());
        assert_eq!(alignment.extra_words, 2);
    }

    #[test]
    fn test_exact_match_has_no_extra_words() {
        let alignment = SequenceAligner.align(&["sannu", "da", "zuwa"], &["sannu", "da", "zuwa"]);
        assert_eq!(alignment.extra_words, 0);
    }

    #[test]
    fn test_skipped_word_is_absent_without_shifting() {
        let pairs = SequenceAligner.align(&["e", "ku", "aaro"], &["e", "aaro"]);
        assert_eq!(heard_words(&pairs), vec![Some("e"), None, Some("aaro")]);
    }

    #[test]
    fn test_mispronounced_word_still_pairs() {
        let pairs = SequenceAligner.align(&["kedu", "ka", "i", "mere"], &["keju", "ka", "i", "mere"]);
        assert_eq!(
            heard_words(&pairs),
            vec![Some("keju"), Some("ka"), Some("i"), Some("mere")]
        );
    }

    #[test]
    fn test_empty_transcript_marks_everything_absent() {
        let pairs = SequenceAligner.align(&["a", "b", "c"], &[]);
        assert_eq!(heard_words(&pairs), vec![None, None, None]);
        assert_eq!(pairs.extra_words, 0);
    }

    #[test]
    fn test_output_length_matches_target() {
        let target = ["one", "two", "three"];
        for heard in [&["x"][..], &["one", "x", "y", "z", "three"], &[]] {
            assert_eq!(SequenceAligner.align(&target, heard).pairs.len(), target.len());
        }
    }

    #[test]
    fn test_output_preserves_target_order() {
        let pairs = SequenceAligner.align(&["a", "b", "c"], &["c", "b", "a"]);
        let targets: Vec<&str> = pairs.pairs.iter().map(|p| p.target).collect();
        assert_eq!(targets, vec!["a", "b", "c"]);
    }
}
