pub mod attempt;
pub mod learner_preferences;
pub mod learner_progress;
pub mod progress_repository;
