use unicode_normalization::UnicodeNormalization;

use super::language_profile::LanguageProfile;

const APOSTROPHES: &[char] = &['\'', '\u{2019}'];

/// Canonicalizes `text` for comparison under the rules of `language`.
pub fn normalize(text: &str, language: &str) -> String {
    normalize_with(text, LanguageProfile::for_tag(language))
}

/// Canonicalizes `text` with an already resolved profile.
///
/// Steps, in order:
/// 1. Lowercase and trim
/// 2. Unicode NFD, so precomposed and decomposed accents compare equal
/// 3. Drop everything that is not a word character or whitespace; this
///    removes the combining marks split off by NFD along with punctuation
/// 4. Collapse whitespace runs to a single space
///
/// The result never has leading or trailing whitespace, which makes the
/// function idempotent.
pub fn normalize_with(text: &str, profile: &LanguageProfile) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .trim()
        .nfd()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .filter(|c| !(profile.strip_apostrophes && APOSTROPHES.contains(c)))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized text into words.
pub fn words(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
