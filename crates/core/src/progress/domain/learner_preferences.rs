use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::domain::language::Language;

/// Language a learner has chosen to practise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerPreferences {
    pub learner_id: String,
    pub target_language: Language,
    pub updated_at: DateTime<Utc>,
}

impl LearnerPreferences {
    /// Preferences for a learner who has not chosen yet.
    pub fn new(learner_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            learner_id: learner_id.into(),
            target_language: Language::DEFAULT_TARGET,
            updated_at: now,
        }
    }

    pub fn set_target_language(&mut self, language: Language, now: DateTime<Utc>) {
        self.target_language = language;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_preferences_target_yoruba() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let prefs = LearnerPreferences::new("ada", now);
        assert_eq!(prefs.target_language, Language::Yoruba);
        assert_eq!(prefs.updated_at, now);
    }

    #[test]
    fn test_set_target_language_touches_timestamp() {
        let created = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2026, 5, 3, 18, 30, 0).unwrap();
        let mut prefs = LearnerPreferences::new("ada", created);
        prefs.set_target_language(Language::Hausa, later);
        assert_eq!(prefs.target_language, Language::Hausa);
        assert_eq!(prefs.updated_at, later);
    }

    #[test]
    fn test_serializes_language_as_tag() {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let json = serde_json::to_string(&LearnerPreferences::new("ada", now)).unwrap();
        assert!(json.contains(r#""target_language":"yoruba""#));
    }
}
