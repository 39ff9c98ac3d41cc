use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::progress::domain::attempt::AttemptRecord;
use crate::progress::domain::learner_progress::LearnerProgress;
use crate::progress::domain::progress_repository::ProgressRepository;
use crate::scoring::domain::score_result::{ScoreRequest, ScoreResult};
use crate::scoring::domain::scoring_engine::ScoringEngine;

/// The scored attempt together with the learner's updated standing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptOutcome {
    pub result: ScoreResult,
    pub progress: LearnerProgress,
}

/// Scores an attempt, stores it, and credits the learner with XP and streak.
///
/// The attempt and the updated progress are written in one repository
/// call, so a failed write never leaves an attempt without its credit.
pub struct RecordAttemptUseCase {
    repository: Box<dyn ProgressRepository>,
    engine: ScoringEngine,
}

impl RecordAttemptUseCase {
    pub fn new(repository: Box<dyn ProgressRepository>, engine: ScoringEngine) -> Self {
        Self { repository, engine }
    }

    pub fn execute(
        &mut self,
        learner_id: &str,
        lesson_item_id: u64,
        request: &ScoreRequest,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome, Box<dyn std::error::Error>> {
        if learner_id.trim().is_empty() {
            return Err("Learner id must not be empty".into());
        }

        let result = self.engine.score(request);

        let attempt = AttemptRecord::new(
            learner_id,
            lesson_item_id,
            request.target_text.as_str(),
            request.transcript.as_str(),
            request.language.as_str(),
            &result,
            now,
        );

        let mut progress = self
            .repository
            .load_progress(learner_id)?
            .unwrap_or_else(|| LearnerProgress::new(learner_id));
        progress.record_attempt(result.score, now.date_naive());
        self.repository.record_attempt(&attempt, &progress)?;

        log::info!(
            "Recorded attempt for {learner_id} on item {lesson_item_id}: {:.1} (xp {}, streak {})",
            result.score,
            progress.xp,
            progress.streak
        );

        Ok(AttemptOutcome { result, progress })
    }

    pub fn repository(&self) -> &dyn ProgressRepository {
        self.repository.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::domain::learner_preferences::LearnerPreferences;
    use crate::progress::infrastructure::json_progress_store::JsonProgressStore;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    #[derive(Default)]
    struct StoreState {
        learners: HashMap<String, LearnerProgress>,
        attempts: Vec<AttemptRecord>,
    }

    #[derive(Default)]
    struct InMemoryRepository {
        state: Arc<Mutex<StoreState>>,
        fail_writes: bool,
    }

    impl ProgressRepository for InMemoryRepository {
        fn load_progress(
            &self,
            learner_id: &str,
        ) -> Result<Option<LearnerProgress>, Box<dyn std::error::Error>> {
            Ok(self.state.lock().unwrap().learners.get(learner_id).cloned())
        }

        fn save_progress(
            &mut self,
            progress: &LearnerProgress,
        ) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail_writes {
                return Err("disk full".into());
            }
            self.state
                .lock()
                .unwrap()
                .learners
                .insert(progress.learner_id.clone(), progress.clone());
            Ok(())
        }

        fn record_attempt(
            &mut self,
            attempt: &AttemptRecord,
            progress: &LearnerProgress,
        ) -> Result<(), Box<dyn std::error::Error>> {
            if self.fail_writes {
                return Err("disk full".into());
            }
            let mut state = self.state.lock().unwrap();
            state.attempts.push(attempt.clone());
            state
                .learners
                .insert(progress.learner_id.clone(), progress.clone());
            Ok(())
        }

        fn attempts(
            &self,
            learner_id: &str,
            skip: usize,
            limit: usize,
        ) -> Result<Vec<AttemptRecord>, Box<dyn std::error::Error>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .attempts
                .iter()
                .rev()
                .filter(|a| a.learner_id == learner_id)
                .skip(skip)
                .take(limit)
                .cloned()
                .collect())
        }

        fn leaderboard(
            &self,
            _limit: usize,
        ) -> Result<Vec<LearnerProgress>, Box<dyn std::error::Error>> {
            Ok(Vec::new())
        }

        fn load_preferences(
            &self,
            _learner_id: &str,
        ) -> Result<Option<LearnerPreferences>, Box<dyn std::error::Error>> {
            Ok(None)
        }

        fn save_preferences(
            &mut self,
            _preferences: &LearnerPreferences,
        ) -> Result<(), Box<dyn std::error::Error>> {
            Ok(())
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, day, hour, 0, 0).unwrap()
    }

    fn use_case() -> (RecordAttemptUseCase, Arc<Mutex<StoreState>>) {
        let repository = InMemoryRepository::default();
        let state = repository.state.clone();
        (
            RecordAttemptUseCase::new(Box::new(repository), ScoringEngine::default()),
            state,
        )
    }

    #[test]
    fn test_first_attempt_creates_progress() {
        let (mut use_case, state) = use_case();
        let request = ScoreRequest::new("kedu", "keju", 0.8, "igbo");

        let outcome = use_case.execute("ada", 7, &request, at(1, 9)).unwrap();

        assert_eq!(outcome.result.score, 70.5);
        assert_eq!(outcome.progress.xp, 70);
        assert_eq!(outcome.progress.streak, 1);

        let state = state.lock().unwrap();
        assert_eq!(state.attempts.len(), 1);
        assert_eq!(state.attempts[0].lesson_item_id, 7);
        assert_eq!(state.attempts[0].transcript, "keju");
        assert_eq!(state.learners["ada"], outcome.progress);
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let (mut use_case, _) = use_case();
        let request = ScoreRequest::new("Hello there", "Hello there", 1.0, "english");

        use_case.execute("ada", 1, &request, at(1, 9)).unwrap();
        use_case.execute("ada", 1, &request, at(1, 20)).unwrap();
        let outcome = use_case.execute("ada", 2, &request, at(2, 8)).unwrap();

        assert_eq!(outcome.progress.xp, 300);
        assert_eq!(outcome.progress.streak, 2);
    }

    #[test]
    fn test_gap_resets_streak() {
        let (mut use_case, _) = use_case();
        let request = ScoreRequest::new("Sannu", "Sannu", 1.0, "hausa");

        use_case.execute("bola", 1, &request, at(1, 9)).unwrap();
        use_case.execute("bola", 1, &request, at(2, 9)).unwrap();
        let outcome = use_case.execute("bola", 1, &request, at(5, 9)).unwrap();

        assert_eq!(outcome.progress.streak, 1);
    }

    #[test]
    fn test_learners_are_tracked_separately() {
        let (mut use_case, _) = use_case();
        let request = ScoreRequest::new("Sannu", "Sannu", 1.0, "hausa");

        use_case.execute("ada", 1, &request, at(1, 9)).unwrap();
        let outcome = use_case.execute("bola", 1, &request, at(1, 9)).unwrap();

        assert_eq!(outcome.progress.xp, 100);
        assert_eq!(use_case.repository().attempts("ada", 0, 10).unwrap().len(), 1);
    }

    #[test]
    fn test_blank_learner_id_rejected() {
        let (mut use_case, state) = use_case();
        let request = ScoreRequest::new("Sannu", "Sannu", 1.0, "hausa");
        assert!(use_case.execute("  ", 1, &request, at(1, 9)).is_err());
        assert!(state.lock().unwrap().attempts.is_empty());
    }

    #[test]
    fn test_repository_error_propagates_and_stores_nothing() {
        let repository = InMemoryRepository {
            fail_writes: true,
            ..Default::default()
        };
        let state = repository.state.clone();
        let mut use_case = RecordAttemptUseCase::new(Box::new(repository), ScoringEngine::default());
        let request = ScoreRequest::new("Sannu", "Sannu", 1.0, "hausa");

        let err = use_case.execute("ada", 1, &request, at(1, 9)).unwrap_err();

        assert_eq!(err.to_string(), "disk full");
        let state = state.lock().unwrap();
        assert!(state.attempts.is_empty());
        assert!(state.learners.is_empty());
    }

    #[test]
    fn test_failed_store_write_leaves_no_uncredited_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let request = ScoreRequest::new("Sannu", "Sannu", 1.0, "hausa");
        {
            let store = JsonProgressStore::open(&path).unwrap();
            let mut use_case = RecordAttemptUseCase::new(Box::new(store), ScoringEngine::default());
            use_case.execute("ada", 1, &request, at(1, 9)).unwrap();

            std::fs::create_dir(path.with_extension("part")).unwrap();
            assert!(use_case.execute("ada", 2, &request, at(2, 9)).is_err());
            assert_eq!(use_case.repository().attempts("ada", 0, 10).unwrap().len(), 1);
            std::fs::remove_dir(path.with_extension("part")).unwrap();
        }

        let store = JsonProgressStore::open(&path).unwrap();
        assert_eq!(store.attempts("ada", 0, 10).unwrap().len(), 1);
        let progress = store.load_progress("ada").unwrap().unwrap();
        assert_eq!(progress.xp, 100);
        assert_eq!(progress.streak, 1);
    }
}
