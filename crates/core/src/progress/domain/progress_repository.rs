use super::attempt::AttemptRecord;
use super::learner_preferences::LearnerPreferences;
use super::learner_progress::LearnerProgress;

/// Domain interface for persisting attempts, learner progress and
/// preferences.
pub trait ProgressRepository: Send {
    fn load_progress(
        &self,
        learner_id: &str,
    ) -> Result<Option<LearnerProgress>, Box<dyn std::error::Error>>;

    fn save_progress(
        &mut self,
        progress: &LearnerProgress,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Stores an attempt together with the progress it produced.
    ///
    /// Both are written or neither is: on error the repository is left as
    /// it was before the call.
    fn record_attempt(
        &mut self,
        attempt: &AttemptRecord,
        progress: &LearnerProgress,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// A learner's attempts, newest first, after skipping `skip`.
    fn attempts(
        &self,
        learner_id: &str,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<AttemptRecord>, Box<dyn std::error::Error>>;

    /// Learners with the most XP, ties broken by learner id.
    fn leaderboard(
        &self,
        limit: usize,
    ) -> Result<Vec<LearnerProgress>, Box<dyn std::error::Error>>;

    fn load_preferences(
        &self,
        learner_id: &str,
    ) -> Result<Option<LearnerPreferences>, Box<dyn std::error::Error>>;

    fn save_preferences(
        &mut self,
        preferences: &LearnerPreferences,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
