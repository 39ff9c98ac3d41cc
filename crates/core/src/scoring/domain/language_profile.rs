use super::language::Language;

/// Per-language scoring rules.
///
/// Languages differ only in data (thresholds, normalization flags and the
/// encouragement message), so they live in a lookup table rather than in
/// branching code. Tags with no row fall back to [`DEFAULT_PROFILE`].
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageProfile {
    /// Minimum similarity for a `correct` verdict.
    pub correct_threshold: f64,
    /// Minimum similarity for a `close` verdict.
    pub close_threshold: f64,
    /// Drop straight and curly apostrophes so contractions compare equal.
    pub strip_apostrophes: bool,
    /// Message returned when no word is `wrong`.
    pub encouragement: &'static str,
}

pub const ENGLISH_PROFILE: LanguageProfile = LanguageProfile {
    correct_threshold: 0.95,
    close_threshold: 0.70,
    strip_apostrophes: true,
    encouragement: "Great job! Your English pronunciation is improving!",
};

pub const DEFAULT_PROFILE: LanguageProfile = LanguageProfile {
    correct_threshold: 0.90,
    close_threshold: 0.60,
    strip_apostrophes: false,
    encouragement: "Great job! Keep practicing!",
};

const PROFILES: &[(Language, &LanguageProfile)] = &[
    (Language::English, &ENGLISH_PROFILE),
    (Language::Yoruba, &DEFAULT_PROFILE),
    (Language::Igbo, &DEFAULT_PROFILE),
    (Language::Hausa, &DEFAULT_PROFILE),
];

impl LanguageProfile {
    pub fn for_language(language: Language) -> &'static LanguageProfile {
        PROFILES
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, profile)| *profile)
            .unwrap_or(&DEFAULT_PROFILE)
    }

    /// Resolves a free-form tag; unrecognized tags get the default row.
    pub fn for_tag(tag: &str) -> &'static LanguageProfile {
        match Language::from_tag(tag) {
            Some(language) => Self::for_language(language),
            None => {
                log::warn!("Unrecognized language tag '{tag}', using default scoring profile");
                &DEFAULT_PROFILE
            }
        }
    }
}
