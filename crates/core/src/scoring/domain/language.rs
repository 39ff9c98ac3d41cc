use serde::{Deserialize, Serialize};

/// Languages the lesson catalogue and transcription service support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Yoruba,
    Igbo,
    Hausa,
}

impl Language {
    pub const ALL: &[Language] = &[
        Language::English,
        Language::Yoruba,
        Language::Igbo,
        Language::Hausa,
    ];

    /// Practice language for learners who have not picked one.
    pub const DEFAULT_TARGET: Language = Language::Yoruba;

    /// Parses a language tag, ignoring case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<Language> {
        let tag = tag.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.tag().eq_ignore_ascii_case(tag))
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Yoruba => "yoruba",
            Language::Igbo => "igbo",
            Language::Hausa => "hausa",
        }
    }

    /// Parses a two-letter code (`en`, `yo`, `ig`, `ha`).
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.transcription_code().eq_ignore_ascii_case(code))
    }

    /// Two-letter code expected by the transcription service.
    pub fn transcription_code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Yoruba => "yo",
            Language::Igbo => "ig",
            Language::Hausa => "ha",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Yoruba => write!(f, "Yoruba"),
            Language::Igbo => write!(f, "Igbo"),
            Language::Hausa => write!(f, "Hausa"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::lowercase("english", Language::English)]
    #[case::capitalized("Yoruba", Language::Yoruba)]
    #[case::uppercase("IGBO", Language::Igbo)]
    #[case::padded("  hausa ", Language::Hausa)]
    fn test_from_tag_recognizes_known_languages(#[case] tag: &str, #[case] expected: Language) {
        assert_eq!(Language::from_tag(tag), Some(expected));
    }

    #[rstest]
    #[case::unknown("french")]
    #[case::empty("")]
    #[case::code_not_tag("en")]
    fn test_from_tag_rejects_unknown(#[case] tag: &str) {
        assert_eq!(Language::from_tag(tag), None);
    }

    #[test]
    fn test_tag_round_trips_through_from_tag() {
        for lang in Language::ALL {
            assert_eq!(Language::from_tag(lang.tag()), Some(*lang));
        }
    }

    #[test]
    fn test_transcription_codes() {
        assert_eq!(Language::English.transcription_code(), "en");
        assert_eq!(Language::Yoruba.transcription_code(), "yo");
        assert_eq!(Language::Igbo.transcription_code(), "ig");
        assert_eq!(Language::Hausa.transcription_code(), "ha");
    }

    #[rstest]
    #[case::english("en", Some(Language::English))]
    #[case::yoruba_upper("YO", Some(Language::Yoruba))]
    #[case::igbo("ig", Some(Language::Igbo))]
    #[case::hausa(" ha", Some(Language::Hausa))]
    #[case::tag_not_code("hausa", None)]
    fn test_from_code(#[case] code: &str, #[case] expected: Option<Language>) {
        assert_eq!(Language::from_code(code), expected);
    }

    #[test]
    fn test_serializes_as_lowercase_tag() {
        let json = serde_json::to_string(&Language::Igbo).unwrap();
        assert_eq!(json, "\"igbo\"");
    }
}
