use serde::{Deserialize, Serialize};

/// A target word paired with the transcript word it is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedWord<'a> {
    pub target: &'a str,
    /// `None` when the learner skipped the word.
    pub heard: Option<&'a str>,
}

/// Result of aligning a transcript against a target phrase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alignment<'a> {
    /// Exactly one entry per target word, in target order.
    pub pairs: Vec<AlignedWord<'a>>,
    /// Transcript words the aligner treated as insertions. These are
    /// penalized in the overall score but get no feedback entry.
    pub extra_words: usize,
}

/// Domain interface for pairing target words with transcript words.
pub trait WordAligner: Send + Sync {
    fn align<'a>(&self, target: &[&'a str], heard: &[&'a str]) -> Alignment<'a>;
}

/// Which [`WordAligner`] the scoring engine uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStrategy {
    /// Index-based pairing. Scoring thresholds are tuned against this.
    #[default]
    Positional,
    /// Edit-distance pairing that tolerates inserted and skipped words.
    Sequence,
}

impl AlignmentStrategy {
    pub const ALL: &[AlignmentStrategy] =
        &[AlignmentStrategy::Positional, AlignmentStrategy::Sequence];

    pub fn from_name(name: &str) -> Option<AlignmentStrategy> {
        match name {
            "positional" => Some(AlignmentStrategy::Positional),
            "sequence" => Some(AlignmentStrategy::Sequence),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlignmentStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignmentStrategy::Positional => write!(f, "positional"),
            AlignmentStrategy::Sequence => write!(f, "sequence"),
        }
    }
}

/// Pairs the i-th target word with the i-th transcript word.
///
/// An inserted or skipped word shifts every later pair, so a single slip
/// early in the phrase can mark the rest of it wrong. Trailing transcript
/// words beyond the target are ignored and never counted as insertions.
pub struct PositionalAligner;

impl WordAligner for PositionalAligner {
    fn align<'a>(&self, target: &[&'a str], heard: &[&'a str]) -> Alignment<'a> {
        let pairs = target
            .iter()
            .copied()
            .enumerate()
            .map(|(i, t)| AlignedWord {
                target: t,
                heard: heard.get(i).copied(),
            })
            .collect();
        Alignment {
            pairs,
            extra_words: 0,
        }
    }
}
