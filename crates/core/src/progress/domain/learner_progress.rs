use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accumulated XP and daily practice streak for one learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProgress {
    pub learner_id: String,
    pub xp: u64,
    pub streak: u32,
    pub last_attempt_on: Option<NaiveDate>,
}

impl LearnerProgress {
    pub fn new(learner_id: impl Into<String>) -> Self {
        Self {
            learner_id: learner_id.into(),
            xp: 0,
            streak: 0,
            last_attempt_on: None,
        }
    }

    /// Credits an attempt scored `score` on day `on`.
    ///
    /// XP grows by the whole-number part of the score. The streak extends
    /// when the previous attempt was the day before, restarts at 1 after a
    /// longer gap (or on the first attempt), and holds for a second attempt
    /// on the same day.
    pub fn record_attempt(&mut self, score: f64, on: NaiveDate) {
        self.xp += xp_for(score);

        self.streak = match self.last_attempt_on {
            None => 1,
            Some(last) => match (on - last).num_days() {
                1 => self.streak + 1,
                gap if gap > 1 => 1,
                _ => self.streak.max(1),
            },
        };

        if self.last_attempt_on.map_or(true, |last| on > last) {
            self.last_attempt_on = Some(on);
        }
    }
}

fn xp_for(score: f64) -> u64 {
    if score.is_finite() && score > 0.0 {
        score.trunc() as u64
    } else {
        0
    }
}
