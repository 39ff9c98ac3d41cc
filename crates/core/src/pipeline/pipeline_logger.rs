use std::time::Instant;

use crate::scoring::domain::score_result::{ScoreResult, WordStatus};

/// Observer for batch scoring runs.
///
/// Executors report every scored request here and stay unaware of where the
/// report ends up.
pub trait PipelineLogger: Send {
    /// One request has been scored, taking `duration_ms`.
    fn scored(&mut self, result: &ScoreResult, duration_ms: f64);

    /// `current` of `total` requests are done.
    fn progress(&mut self, current: usize, total: usize);

    /// End-of-batch report. Default: no-op.
    fn summary(&self) {}
}

/// Discards every event.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn scored(&mut self, _result: &ScoreResult, _duration_ms: f64) {}
    fn progress(&mut self, _current: usize, _total: usize) {}
}

/// Score upper bounds (exclusive) for the "weak" and "fair" bands; anything
/// at or above the second is "strong".
const BANDS: [f64; 2] = [50.0, 80.0];

/// Running totals over the scored requests of one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStats {
    pub scores: Vec<f64>,
    /// Attempts per band: weak, fair, strong.
    pub bands: [usize; 3],
    pub wrong_words: usize,
    /// Attempts with at least one wrong word.
    pub attempts_with_wrong: usize,
    pub scoring_ms: f64,
    pub slowest_ms: f64,
}

impl BatchStats {
    fn add(&mut self, result: &ScoreResult, duration_ms: f64) {
        self.scores.push(result.score);
        let band = BANDS.iter().filter(|&&edge| result.score >= edge).count();
        self.bands[band] += 1;

        let wrong = result.count(WordStatus::Wrong);
        self.wrong_words += wrong;
        if wrong > 0 {
            self.attempts_with_wrong += 1;
        }

        self.scoring_ms += duration_ms;
        self.slowest_ms = self.slowest_ms.max(duration_ms);
    }

    pub fn mean_score(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        Some(self.scores.iter().sum::<f64>() / self.scores.len() as f64)
    }
}

/// Logs throttled progress through the `log` crate and renders a score
/// report once the batch is done.
pub struct LoggingPipelineLogger {
    throttle: usize,
    started: Instant,
    stats: BatchStats,
}

impl LoggingPipelineLogger {
    pub fn new(throttle: usize) -> Self {
        Self {
            throttle: throttle.max(1),
            started: Instant::now(),
            stats: BatchStats::default(),
        }
    }

    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    /// The end-of-batch report, or `None` before anything was scored.
    pub fn summary_string(&self) -> Option<String> {
        let stats = &self.stats;
        let mean = stats.mean_score()?;
        let count = stats.scores.len();
        let min = stats.scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = stats.scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let elapsed_s = self.started.elapsed().as_secs_f64();
        let [weak, fair, strong] = stats.bands;

        let mut lines = vec![
            format!("Scored {count} attempts in {elapsed_s:.1}s"),
            format!("  score: mean {mean:.1}  min {min:.1}  max {max:.1}"),
            format!("  strong (80+): {strong}  fair (50-80): {fair}  weak (<50): {weak}"),
            format!(
                "  wrong words: {} in {} attempts",
                stats.wrong_words, stats.attempts_with_wrong
            ),
            format!(
                "  scoring: {:.3}ms per attempt, slowest {:.3}ms",
                stats.scoring_ms / count as f64,
                stats.slowest_ms
            ),
        ];
        if elapsed_s > 0.0 {
            lines.push(format!("  throughput: {:.1} attempts/s", count as f64 / elapsed_s));
        }
        Some(lines.join("\n"))
    }
}

impl Default for LoggingPipelineLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PipelineLogger for LoggingPipelineLogger {
    fn scored(&mut self, result: &ScoreResult, duration_ms: f64) {
        self.stats.add(result, duration_ms);
    }

    fn progress(&mut self, current: usize, total: usize) {
        if total > 0 && (current % self.throttle == 0 || current == total) {
            log::info!("Scoring: {current}/{total} attempts");
        }
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
