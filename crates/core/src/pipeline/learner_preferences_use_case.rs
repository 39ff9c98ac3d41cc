use chrono::{DateTime, Utc};

use crate::progress::domain::learner_preferences::LearnerPreferences;
use crate::progress::domain::progress_repository::ProgressRepository;
use crate::scoring::domain::language::Language;

/// Reads and changes the language a learner practises.
pub struct LearnerPreferencesUseCase {
    repository: Box<dyn ProgressRepository>,
}

impl LearnerPreferencesUseCase {
    pub fn new(repository: Box<dyn ProgressRepository>) -> Self {
        Self { repository }
    }

    /// The learner's preferences. A learner seen for the first time gets
    /// the defaults stored on their behalf.
    pub fn get(
        &mut self,
        learner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<LearnerPreferences, Box<dyn std::error::Error>> {
        check_learner_id(learner_id)?;
        if let Some(existing) = self.repository.load_preferences(learner_id)? {
            return Ok(existing);
        }
        let created = LearnerPreferences::new(learner_id, now);
        self.repository.save_preferences(&created)?;
        log::debug!("Created default preferences for {learner_id}");
        Ok(created)
    }

    pub fn set_target_language(
        &mut self,
        learner_id: &str,
        language: Language,
        now: DateTime<Utc>,
    ) -> Result<LearnerPreferences, Box<dyn std::error::Error>> {
        check_learner_id(learner_id)?;
        let mut preferences = self
            .repository
            .load_preferences(learner_id)?
            .unwrap_or_else(|| LearnerPreferences::new(learner_id, now));
        preferences.set_target_language(language, now);
        self.repository.save_preferences(&preferences)?;
        log::info!("{learner_id} now practises {language}");
        Ok(preferences)
    }

    /// Stored target language, without creating anything.
    pub fn stored_language(
        &self,
        learner_id: &str,
    ) -> Result<Option<Language>, Box<dyn std::error::Error>> {
        Ok(self
            .repository
            .load_preferences(learner_id)?
            .map(|p| p.target_language))
    }
}

fn check_learner_id(learner_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    if learner_id.trim().is_empty() {
        return Err("Learner id must not be empty".into());
    }
    Ok(())
}
